use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

use crate::constants::{COOLDOWN_DURATION, DWELL_DURATION, SWIPE_THRESHOLD, TICK_INTERVAL};
use crate::error::{Result, SequencerError};
use crate::gesture::GestureZones;

/// What happens when navigation runs off either end of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    Wrap,
    CloseOnEnd,
}

/// How autoplay comes back after the user takes over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePolicy {
    Cooldown(Duration),
    ManualToggle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    pub boundary: BoundaryPolicy,
    pub resume: ResumePolicy,
    pub gestures: GestureZones,
    pub dwell: Duration,
    pub tick: Duration,
    pub swipe_threshold: f32,
}

impl SequencerConfig {
    /// Hero carousel: wraps around and resumes itself after a cooldown.
    pub fn carousel() -> Self {
        Self {
            boundary: BoundaryPolicy::Wrap,
            resume: ResumePolicy::Cooldown(COOLDOWN_DURATION),
            gestures: GestureZones::SwipeOnly,
            dwell: DWELL_DURATION,
            tick: TICK_INTERVAL,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }

    /// Story viewer: closes after the last story, pauses only on request.
    pub fn story() -> Self {
        Self {
            boundary: BoundaryPolicy::CloseOnEnd,
            resume: ResumePolicy::ManualToggle,
            gestures: GestureZones::SwipeAndTapZones,
            dwell: DWELL_DURATION,
            tick: TICK_INTERVAL,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }

    pub fn with_timing(mut self, timing: &TimingSettings) -> Self {
        self.dwell = Duration::from_millis(timing.dwell_ms);
        self.tick = Duration::from_millis(timing.tick_ms);
        self.swipe_threshold = timing.swipe_threshold;
        if let ResumePolicy::Cooldown(_) = self.resume {
            self.resume = ResumePolicy::Cooldown(Duration::from_millis(timing.cooldown_ms));
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.dwell.is_zero() {
            return Err(SequencerError::InvalidConfig("dwell must be positive".into()));
        }
        if self.tick.is_zero() {
            return Err(SequencerError::InvalidConfig("tick interval must be positive".into()));
        }
        if self.tick > self.dwell {
            return Err(SequencerError::InvalidConfig(format!(
                "tick interval {:?} is longer than dwell {:?}",
                self.tick, self.dwell
            )));
        }
        if let ResumePolicy::Cooldown(delay) = self.resume {
            if delay.is_zero() {
                return Err(SequencerError::InvalidConfig("cooldown must be positive".into()));
            }
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(SequencerError::InvalidConfig(format!(
                "swipe threshold {} must be a non-negative number",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}

/// Per-instance timing knobs as they appear in `showreel.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub dwell_ms: u64,
    pub tick_ms: u64,
    pub cooldown_ms: u64,
    pub swipe_threshold: f32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            dwell_ms: DWELL_DURATION.as_millis() as u64,
            tick_ms: TICK_INTERVAL.as_millis() as u64,
            cooldown_ms: COOLDOWN_DURATION.as_millis() as u64,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: Option<PathBuf>,
    pub carousel: TimingSettings,
    pub story: TimingSettings,
}

impl Settings {
    pub fn carousel_config(&self) -> SequencerConfig {
        SequencerConfig::carousel().with_timing(&self.carousel)
    }

    pub fn story_config(&self) -> SequencerConfig {
        SequencerConfig::story().with_timing(&self.story)
    }
}

/// Reads `path` when it exists, falls back to defaults otherwise, then layers
/// `SHOWREEL_*` environment variables on top.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?
    } else {
        Settings::default()
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SHOWREEL_CATALOG") {
        settings.catalog = Some(PathBuf::from(v));
    }

    for (prefix, timing) in [
        ("SHOWREEL_CAROUSEL", &mut settings.carousel),
        ("SHOWREEL_STORY", &mut settings.story),
    ] {
        if let Some(v) = parse_env(&lookup, &format!("{prefix}_DWELL_MS")) {
            timing.dwell_ms = v;
        }
        if let Some(v) = parse_env(&lookup, &format!("{prefix}_TICK_MS")) {
            timing.tick_ms = v;
        }
        if let Some(v) = parse_env(&lookup, &format!("{prefix}_COOLDOWN_MS")) {
            timing.cooldown_ms = v;
        }
    }
}

fn parse_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    lookup(key)?.trim().parse::<u64>().ok()
}
