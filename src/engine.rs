//! The sequencer engine shared by the hero carousel and the story viewer.
//!
//! Time never advances on its own: the host calls [`Sequencer::advance_time`]
//! with the frame delta (or a simulated step) and the engine fires whatever
//! timers fell due, in deadline order, on its own instance clock.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::{BoundaryPolicy, ResumePolicy, SequencerConfig};
use crate::error::{Result, SequencerError};
use crate::gesture::{GestureZones, NavigationCommand, TapZone, classify_swipe};
use crate::state::{Direction, Frame, PlaybackState, SequencerState};
use crate::timer::TimerSlot;

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// What caused an index change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Tick,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    EndOfSequence,
    Requested,
}

/// Transitions recorded for the host, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    Opened { index: usize },
    Moved { from: usize, to: usize, direction: Direction, trigger: Trigger },
    Suspended { resume_at: Duration },
    Resumed,
    Paused,
    Played,
    Closed { reason: CloseReason },
}

pub struct Sequencer {
    config: SequencerConfig,
    count: usize,
    state: PlaybackState,

    now: Duration,
    dwell: Duration,
    elapsed: Duration,
    changed_at: Duration,

    tick: TimerSlot,
    resume: TimerSlot,

    events: VecDeque<SequencerEvent>,
}

impl Sequencer {
    pub fn new(count: usize, config: SequencerConfig) -> Result<Self> {
        if count == 0 {
            return Err(SequencerError::EmptySequence);
        }
        config.validate()?;

        Ok(Self {
            config,
            count,
            state: PlaybackState::new(),
            now: Duration::ZERO,
            dwell: config.dwell,
            elapsed: Duration::ZERO,
            changed_at: Duration::ZERO,
            tick: TimerSlot::new(),
            resume: TimerSlot::new(),
            events: VecDeque::new(),
        })
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> SequencerState {
        self.state.phase()
    }

    pub fn frame(&self) -> Frame {
        self.state.frame()
    }

    /// Instance clock: time fed through `advance_time` since construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time since the current item became active.
    pub fn since_change(&self) -> Duration {
        self.now.saturating_sub(self.changed_at)
    }

    pub fn is_ticking(&self) -> bool {
        self.tick.is_armed()
    }

    pub fn pending_resume(&self) -> Option<Duration> {
        self.resume.deadline()
    }

    /// Takes the recorded transitions, oldest first. Hosts that never drain
    /// only see the latest [`MAX_PENDING_EVENTS`].
    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        self.events.drain(..).collect()
    }

    fn record(&mut self, event: SequencerEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    // --- Lifecycle ---

    pub fn open(&mut self, start_index: usize) -> Result<()> {
        self.check_index(start_index)?;

        self.state.is_open = true;
        self.state.current_index = start_index;
        self.state.direction = Direction::Forward;
        self.state.is_suspended = false;
        self.resume.cancel();
        self.reset_clock();
        self.start(self.config.dwell);

        info!(index = start_index, count = self.count, "sequence opened");
        self.record(SequencerEvent::Opened { index: start_index });
        Ok(())
    }

    pub fn close(&mut self) {
        self.close_with(CloseReason::Requested);
    }

    fn close_with(&mut self, reason: CloseReason) {
        if !self.state.is_open {
            return;
        }
        self.tick.cancel();
        self.resume.cancel();

        self.state.is_open = false;
        self.state.is_auto_playing = false;
        self.state.is_suspended = false;
        self.state.current_index = 0;
        self.state.direction = Direction::Forward;
        self.reset_clock();

        info!(?reason, "sequence closed");
        self.record(SequencerEvent::Closed { reason });
    }

    // --- Tick loop ---

    /// Arms the tick loop. Any loop or cooldown already pending is replaced.
    pub fn start(&mut self, dwell: Duration) {
        if !self.state.is_open {
            debug!("start ignored, sequence is closed");
            return;
        }
        if !dwell.is_zero() {
            self.dwell = dwell;
        }
        self.resume.cancel();
        self.state.is_suspended = false;
        self.state.is_auto_playing = true;
        self.tick.reschedule(self.now, self.config.tick, Some(self.config.tick));
        debug!(dwell_ms = self.dwell.as_millis() as u64, "tick loop started");
    }

    pub fn resume(&mut self) {
        self.start(self.dwell);
    }

    /// Cancels the tick loop. Progress stays where it is.
    pub fn stop(&mut self) {
        if self.tick.cancel() {
            debug!(progress = self.state.progress, "tick loop stopped");
        }
        self.state.is_auto_playing = false;
    }

    /// Moves the instance clock forward, firing due timers in order.
    pub fn advance_time(&mut self, dt: Duration) {
        let target = self.now + dt;
        loop {
            let next = [self.resume.deadline(), self.tick.deadline()]
                .into_iter()
                .flatten()
                .filter(|deadline| *deadline <= target)
                .min();
            let Some(deadline) = next else {
                break;
            };
            self.now = deadline;

            if self.resume.take_due(self.now) {
                self.on_resume();
            } else if self.tick.take_due(self.now) {
                self.on_tick();
            }
        }
        self.now = target;
    }

    fn on_tick(&mut self) {
        self.elapsed += self.config.tick;
        if self.elapsed >= self.dwell {
            self.state.progress = 100.0;
            self.step_forward(Trigger::Tick);
        } else {
            self.state.progress =
                (self.elapsed.as_secs_f32() / self.dwell.as_secs_f32() * 100.0).min(100.0);
        }
    }

    fn on_resume(&mut self) {
        debug!("cooldown expired, resuming autoplay");
        self.state.is_suspended = false;
        self.record(SequencerEvent::Resumed);
        self.start(self.dwell);
    }

    // --- Navigation primitives ---

    pub fn advance(&mut self) {
        self.step_forward(Trigger::User);
    }

    pub fn retreat(&mut self) {
        self.step_backward(Trigger::User);
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if !self.state.is_open {
            return Ok(());
        }
        let direction = if index > self.state.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(index, direction, Trigger::User);
        Ok(())
    }

    fn step_forward(&mut self, trigger: Trigger) {
        if !self.state.is_open {
            return;
        }
        let last = self.count - 1;
        match self.config.boundary {
            BoundaryPolicy::CloseOnEnd if self.state.current_index == last => {
                self.close_with(CloseReason::EndOfSequence);
            }
            _ => {
                let next = (self.state.current_index + 1) % self.count;
                self.move_to(next, Direction::Forward, trigger);
            }
        }
    }

    fn step_backward(&mut self, trigger: Trigger) {
        if !self.state.is_open {
            return;
        }
        match self.config.boundary {
            BoundaryPolicy::CloseOnEnd if self.state.current_index == 0 => {}
            _ => {
                let previous = (self.state.current_index + self.count - 1) % self.count;
                self.move_to(previous, Direction::Backward, trigger);
            }
        }
    }

    fn move_to(&mut self, index: usize, direction: Direction, trigger: Trigger) {
        let from = self.state.current_index;
        self.state.current_index = index;
        self.state.direction = direction;
        self.reset_clock();

        // Restart the loop so the next tick is a full interval away
        if self.tick.is_armed() {
            self.tick.reschedule(self.now, self.config.tick, Some(self.config.tick));
        }

        debug!(from, to = index, ?direction, ?trigger, "moved");
        self.record(SequencerEvent::Moved { from, to: index, direction, trigger });
    }

    fn reset_clock(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state.progress = 0.0;
        self.changed_at = self.now;
    }

    // --- User input ---

    /// Applies a user command, then the instance's resume policy.
    pub fn navigate(&mut self, command: NavigationCommand) -> Result<()> {
        match command {
            NavigationCommand::Advance => self.step_forward(Trigger::User),
            NavigationCommand::Retreat => self.step_backward(Trigger::User),
            NavigationCommand::JumpTo(index) => self.jump_to(index)?,
            NavigationCommand::TogglePause => {
                self.toggle_pause();
                return Ok(());
            }
            NavigationCommand::Close => {
                self.close();
                return Ok(());
            }
        }

        if let ResumePolicy::Cooldown(delay) = self.config.resume {
            self.suspend(delay);
        }
        Ok(())
    }

    fn suspend(&mut self, delay: Duration) {
        if !self.state.is_open {
            return;
        }
        self.stop();
        self.state.is_suspended = true;
        self.resume.reschedule(self.now, delay, None);

        let resume_at = self.now + delay;
        debug!(resume_at_ms = resume_at.as_millis() as u64, "autoplay suspended");
        self.record(SequencerEvent::Suspended { resume_at });
    }

    pub fn toggle_pause(&mut self) {
        if !self.state.is_open {
            return;
        }
        // A suspended carousel counts as paused here: toggling plays at once
        if self.state.is_auto_playing && !self.state.is_suspended {
            self.stop();
            if let ResumePolicy::Cooldown(_) = self.config.resume {
                self.reset_clock();
            }
            self.record(SequencerEvent::Paused);
        } else {
            self.start(self.dwell);
            self.record(SequencerEvent::Played);
        }
    }

    /// Swipe from `start_x` to `end_x`. Returns the command it produced.
    pub fn handle_gesture(&mut self, start_x: f32, end_x: f32) -> Result<Option<NavigationCommand>> {
        let command = classify_swipe(start_x, end_x, self.config.swipe_threshold);
        if let Some(command) = command {
            self.navigate(command)?;
        }
        Ok(command)
    }

    /// Tap at `tap_x` across a viewer `element_width` wide.
    pub fn handle_zone_tap(&mut self, tap_x: f32, element_width: f32) -> Result<Option<NavigationCommand>> {
        if self.config.gestures != GestureZones::SwipeAndTapZones {
            return Ok(None);
        }
        let command = TapZone::locate(tap_x, element_width).command();
        if let Some(command) = command {
            self.navigate(command)?;
        }
        Ok(command)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.count {
            return Err(SequencerError::InvalidIndex { index, count: self.count });
        }
        Ok(())
    }
}

impl Drop for Sequencer {
    fn drop(&mut self) {
        self.tick.cancel();
        self.resume.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn opened(count: usize, config: SequencerConfig) -> Sequencer {
        let mut sequencer = Sequencer::new(count, config).expect("sequencer");
        sequencer.open(0).expect("open");
        sequencer.drain_events();
        sequencer
    }

    fn tick_moves(events: &[SequencerEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, SequencerEvent::Moved { trigger: Trigger::Tick, .. }))
            .count()
    }

    #[test]
    fn rejects_empty_sequence() {
        assert_eq!(
            Sequencer::new(0, SequencerConfig::carousel()).err(),
            Some(SequencerError::EmptySequence)
        );
    }

    #[test]
    fn wrap_policy_wraps_both_ways() {
        let mut sequencer = opened(3, SequencerConfig::carousel());
        sequencer.jump_to(2).expect("jump");

        sequencer.advance();
        assert_eq!(sequencer.state().current_index, 0);
        assert_eq!(sequencer.state().direction, Direction::Forward);

        sequencer.retreat();
        assert_eq!(sequencer.state().current_index, 2);
        assert_eq!(sequencer.state().direction, Direction::Backward);
    }

    #[test]
    fn close_on_end_closes_after_last_and_ignores_retreat_at_start() {
        let mut sequencer = opened(3, SequencerConfig::story());

        sequencer.advance_time(ms(1000));
        let progress = sequencer.state().progress;
        sequencer.retreat();
        assert_eq!(sequencer.state().current_index, 0);
        assert_eq!(sequencer.state().progress, progress);
        assert!(sequencer.drain_events().is_empty());

        sequencer.jump_to(2).expect("jump");
        sequencer.advance();
        assert!(!sequencer.state().is_open);
        assert!(!sequencer.is_ticking());
        assert_eq!(sequencer.state().current_index, 0);
        assert!(sequencer
            .drain_events()
            .contains(&SequencerEvent::Closed { reason: CloseReason::EndOfSequence }));
    }

    #[test]
    fn jump_to_validates_and_picks_direction() {
        let mut sequencer = opened(4, SequencerConfig::carousel());

        assert_eq!(
            sequencer.jump_to(4),
            Err(SequencerError::InvalidIndex { index: 4, count: 4 })
        );
        assert_eq!(sequencer.state().current_index, 0);

        sequencer.jump_to(3).expect("jump");
        assert_eq!(sequencer.state().direction, Direction::Forward);
        sequencer.jump_to(1).expect("jump");
        assert_eq!(sequencer.state().direction, Direction::Backward);
    }

    #[test]
    fn progress_fills_over_the_dwell() {
        let mut sequencer = opened(2, SequencerConfig::story());

        sequencer.advance_time(ms(49));
        assert_eq!(sequencer.state().progress, 0.0);

        sequencer.advance_time(ms(2451));
        assert!((sequencer.state().progress - 50.0).abs() < 0.01);
    }

    #[test]
    fn every_navigation_resets_progress() {
        let mut sequencer = opened(5, SequencerConfig::story());
        for command in [
            NavigationCommand::Advance,
            NavigationCommand::JumpTo(4),
            NavigationCommand::Retreat,
        ] {
            sequencer.advance_time(ms(1234));
            assert!(sequencer.state().progress > 0.0);
            sequencer.navigate(command).expect("navigate");
            assert_eq!(sequencer.state().progress, 0.0);
        }
    }

    #[test]
    fn navigation_restarts_the_tick_phase() {
        let mut sequencer = opened(3, SequencerConfig::story());
        sequencer.advance_time(ms(30));
        sequencer.advance();

        // Old phase would tick at 50 ms; the restarted loop ticks at 80 ms
        sequencer.advance_time(ms(40));
        assert_eq!(sequencer.state().progress, 0.0);
        sequencer.advance_time(ms(10));
        assert!(sequencer.state().progress > 0.0);
    }

    #[test]
    fn double_start_keeps_one_tick_loop() {
        let mut sequencer = opened(3, SequencerConfig::carousel());
        sequencer.start(ms(5000));
        sequencer.start(ms(5000));

        sequencer.advance_time(ms(15_000));
        assert_eq!(tick_moves(&sequencer.drain_events()), 3);
        assert_eq!(sequencer.state().current_index, 0);
    }

    #[test]
    fn stop_keeps_progress_and_resume_continues() {
        let mut sequencer = opened(2, SequencerConfig::story());
        sequencer.advance_time(ms(2500));
        sequencer.stop();
        assert!(!sequencer.state().is_auto_playing);

        sequencer.advance_time(ms(10_000));
        assert!((sequencer.state().progress - 50.0).abs() < 0.01);
        assert_eq!(sequencer.state().current_index, 0);

        sequencer.resume();
        sequencer.advance_time(ms(2500));
        assert_eq!(sequencer.state().current_index, 1);
    }

    #[test]
    fn cooldown_suspends_then_resumes_from_zero() {
        let mut sequencer = opened(3, SequencerConfig::carousel());
        sequencer.advance_time(ms(1000));

        sequencer.navigate(NavigationCommand::Advance).expect("navigate");
        assert_eq!(sequencer.phase(), SequencerState::Suspended);
        assert!(!sequencer.is_ticking());
        assert_eq!(sequencer.pending_resume(), Some(ms(4000)));

        sequencer.advance_time(ms(3000));
        assert_eq!(sequencer.phase(), SequencerState::Playing);
        assert_eq!(sequencer.state().progress, 0.0);

        sequencer.advance_time(ms(5000));
        assert_eq!(sequencer.state().current_index, 2);
    }

    #[test]
    fn cooldown_is_debounced() {
        let mut sequencer = opened(3, SequencerConfig::carousel());

        sequencer.navigate(NavigationCommand::Advance).expect("navigate");
        sequencer.advance_time(ms(1000));
        sequencer.navigate(NavigationCommand::Advance).expect("navigate");
        sequencer.drain_events();

        sequencer.advance_time(ms(2999));
        assert!(sequencer.state().is_suspended);

        sequencer.advance_time(ms(1));
        let resumes = sequencer
            .drain_events()
            .iter()
            .filter(|event| **event == SequencerEvent::Resumed)
            .count();
        assert_eq!(resumes, 1);
        assert!(!sequencer.state().is_suspended);

        sequencer.advance_time(ms(10_000));
        assert!(!sequencer.drain_events().contains(&SequencerEvent::Resumed));
    }

    #[test]
    fn manual_toggle_keeps_ticking_after_navigation() {
        let mut sequencer = opened(4, SequencerConfig::story());
        sequencer.navigate(NavigationCommand::Advance).expect("navigate");

        assert_eq!(sequencer.phase(), SequencerState::Playing);
        assert!(sequencer.is_ticking());
        assert_eq!(sequencer.pending_resume(), None);
    }

    #[test]
    fn story_pause_survives_navigation() {
        let mut sequencer = opened(4, SequencerConfig::story());
        sequencer.advance_time(ms(1000));
        sequencer.toggle_pause();
        assert_eq!(sequencer.phase(), SequencerState::Paused);
        assert!((sequencer.state().progress - 20.0).abs() < 0.01);

        sequencer.navigate(NavigationCommand::Advance).expect("navigate");
        assert_eq!(sequencer.phase(), SequencerState::Paused);
        assert_eq!(sequencer.state().current_index, 1);

        sequencer.advance_time(ms(10_000));
        assert_eq!(sequencer.state().current_index, 1);

        sequencer.toggle_pause();
        assert_eq!(sequencer.phase(), SequencerState::Playing);
    }

    #[test]
    fn carousel_toggle_resets_progress_and_overrides_cooldown() {
        let mut sequencer = opened(3, SequencerConfig::carousel());
        sequencer.advance_time(ms(1000));

        sequencer.toggle_pause();
        assert_eq!(sequencer.phase(), SequencerState::Paused);
        assert_eq!(sequencer.state().progress, 0.0);

        sequencer.navigate(NavigationCommand::Retreat).expect("navigate");
        assert_eq!(sequencer.phase(), SequencerState::Suspended);

        sequencer.toggle_pause();
        assert_eq!(sequencer.phase(), SequencerState::Playing);
        assert_eq!(sequencer.pending_resume(), None);
    }

    #[test]
    fn gestures_respect_threshold() {
        let mut sequencer = opened(3, SequencerConfig::story());

        assert_eq!(sequencer.handle_gesture(200.0, 151.0), Ok(None));
        assert_eq!(sequencer.state().current_index, 0);

        assert_eq!(
            sequencer.handle_gesture(200.0, 149.0),
            Ok(Some(NavigationCommand::Advance))
        );
        assert_eq!(sequencer.state().current_index, 1);

        assert_eq!(
            sequencer.handle_gesture(149.0, 200.0),
            Ok(Some(NavigationCommand::Retreat))
        );
        assert_eq!(sequencer.state().current_index, 0);
    }

    #[test]
    fn zone_taps_only_apply_with_tap_zones() {
        let mut story = opened(3, SequencerConfig::story());
        assert_eq!(story.handle_zone_tap(290.0, 300.0), Ok(Some(NavigationCommand::Advance)));
        assert_eq!(story.handle_zone_tap(150.0, 300.0), Ok(None));
        assert_eq!(story.handle_zone_tap(10.0, 300.0), Ok(Some(NavigationCommand::Retreat)));
        assert_eq!(story.state().current_index, 0);

        let mut carousel = opened(3, SequencerConfig::carousel());
        assert_eq!(carousel.handle_zone_tap(290.0, 300.0), Ok(None));
        assert_eq!(carousel.state().current_index, 0);
    }

    #[test]
    fn closed_sequencer_is_inert() {
        let mut sequencer = Sequencer::new(3, SequencerConfig::story()).expect("sequencer");

        sequencer.start(ms(5000));
        sequencer.advance();
        sequencer.toggle_pause();
        sequencer.navigate(NavigationCommand::JumpTo(2)).expect("navigate");
        sequencer.advance_time(ms(60_000));

        assert_eq!(sequencer.phase(), SequencerState::Closed);
        assert_eq!(sequencer.state().current_index, 0);
        assert!(!sequencer.is_ticking());
        assert!(sequencer.drain_events().is_empty());
    }

    #[test]
    fn reopen_starts_fresh() {
        let mut sequencer = opened(4, SequencerConfig::story());
        sequencer.advance_time(ms(7000));
        sequencer.toggle_pause();
        sequencer.close();

        sequencer.open(2).expect("open");
        assert_eq!(sequencer.phase(), SequencerState::Playing);
        assert_eq!(sequencer.state().current_index, 2);
        assert_eq!(sequencer.state().progress, 0.0);
        assert!(sequencer.open(9).is_err());
    }

    #[test]
    fn undrained_events_keep_only_the_latest() {
        let mut sequencer = opened(3, SequencerConfig::carousel());
        sequencer.advance_time(ms(3_600_000));

        let events = sequencer.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(tick_moves(&events), MAX_PENDING_EVENTS);
        assert_eq!(
            events.last(),
            Some(&SequencerEvent::Moved {
                from: 2,
                to: 0,
                direction: Direction::Forward,
                trigger: Trigger::Tick,
            })
        );
        assert!(sequencer.drain_events().is_empty());
    }
}
