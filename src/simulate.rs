//! Headless playback against the engine's virtual clock.

use std::time::Duration;

use tracing::info;

use crate::engine::SequencerEvent;
use crate::error::{Result, SequencerError};
use crate::presenter::Presenter;
use crate::script::{Input, ScriptedInput};
use crate::state::Frame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub at: Duration,
    pub event: SequencerEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub records: Vec<Record>,
    pub last_frame: Frame,
}

impl SimulationReport {
    /// Indices in the order they became active.
    pub fn indices_shown(&self) -> Vec<usize> {
        self.records
            .iter()
            .filter_map(|record| match record.event {
                SequencerEvent::Opened { index } => Some(index),
                SequencerEvent::Moved { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }
}

/// Runs `presenter` for `duration`, applying `script` at its timestamps and
/// advancing time in steps of at most `step`. Timestamps are relative to the
/// start of the run.
pub fn run<P: Presenter + ?Sized>(
    presenter: &mut P,
    script: &[ScriptedInput],
    duration: Duration,
    step: Duration,
) -> Result<SimulationReport> {
    if step.is_zero() {
        return Err(SequencerError::InvalidConfig("simulation step must be positive".into()));
    }

    let mut script = script.to_vec();
    script.sort_by_key(|input| input.at);
    let mut pending = script.into_iter().peekable();

    let origin = presenter.sequencer().now();
    let mut records = Vec::new();
    collect(presenter, origin, &mut records);

    let mut elapsed = Duration::ZERO;
    loop {
        while let Some(scripted) = pending.next_if(|scripted| scripted.at <= elapsed) {
            info!(at_ms = elapsed.as_millis() as u64, input = ?scripted.input, "input");
            apply(presenter, scripted.input)?;
            collect(presenter, origin, &mut records);
        }
        if elapsed >= duration {
            break;
        }

        let mut dt = step.min(duration - elapsed);
        if let Some(next) = pending.peek() {
            if next.at > elapsed {
                dt = dt.min(next.at - elapsed);
            }
        }
        presenter.update(dt);
        elapsed += dt;
        collect(presenter, origin, &mut records);
    }

    Ok(SimulationReport {
        records,
        last_frame: presenter.sequencer().frame(),
    })
}

fn apply<P: Presenter + ?Sized>(presenter: &mut P, input: Input) -> Result<()> {
    match input {
        Input::Command(command) => presenter.command(command),
        Input::Swipe { start_x, end_x } => presenter
            .sequencer_mut()
            .handle_gesture(start_x, end_x)
            .map(|_| ()),
        Input::Tap { x, width } => presenter
            .sequencer_mut()
            .handle_zone_tap(x, width)
            .map(|_| ()),
        Input::Open(index) => presenter.open_at(index),
    }
}

fn collect<P: Presenter + ?Sized>(presenter: &mut P, origin: Duration, records: &mut Vec<Record>) {
    let at = presenter.sequencer().now().saturating_sub(origin);
    let events = presenter.sequencer_mut().drain_events();
    for event in events {
        info!(
            instance = presenter.name(),
            at_ms = at.as_millis() as u64,
            ?event,
            caption = presenter.caption().unwrap_or("-"),
            "event"
        );
        records.push(Record { at, event });
    }
}
