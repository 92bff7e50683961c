/// Which way the last index change went. Only used to pick a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Coarse playback phase, derived from the flags in [`PlaybackState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Closed,    // Not mounted, or the story overlay is dismissed
    Playing,   // Tick loop running
    Paused,    // Explicitly paused by the user
    Suspended, // Cooldown window after manual navigation
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub direction: Direction,
    pub progress: f32,
    pub is_auto_playing: bool,
    pub is_suspended: bool,
    pub is_open: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            direction: Direction::Forward,
            progress: 0.0,
            is_auto_playing: false,
            is_suspended: false,
            is_open: false,
        }
    }

    pub fn phase(&self) -> SequencerState {
        if !self.is_open {
            SequencerState::Closed
        } else if self.is_suspended {
            SequencerState::Suspended
        } else if self.is_auto_playing {
            SequencerState::Playing
        } else {
            SequencerState::Paused
        }
    }

    /// Everything a presenter needs to draw the current frame.
    pub fn frame(&self) -> Frame {
        Frame {
            current_index: self.current_index,
            progress: self.progress,
            direction: self.direction,
            is_open: self.is_open,
            is_auto_playing: self.is_auto_playing,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub current_index: usize,
    pub progress: f32,
    pub direction: Direction,
    pub is_open: bool,
    pub is_auto_playing: bool,
}
