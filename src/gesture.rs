//! Translation of raw pointer positions into navigation commands.
//!
//! Everything here works on plain coordinates so input backends (touch,
//! mouse, a test script) only have to report x positions.

/// The closed set of commands the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    Advance,
    Retreat,
    JumpTo(usize),
    TogglePause,
    Close,
}

/// Which pointer gestures an instance reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureZones {
    SwipeOnly,
    SwipeAndTapZones,
}

/// Horizontal swipe classification.
///
/// A leftward swipe (positive distance) advances, a rightward one retreats.
/// Travel must strictly exceed `threshold`; anything shorter is ignored.
pub fn classify_swipe(start_x: f32, end_x: f32, threshold: f32) -> Option<NavigationCommand> {
    let distance = start_x - end_x;
    if distance > threshold {
        Some(NavigationCommand::Advance)
    } else if distance < -threshold {
        Some(NavigationCommand::Retreat)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    Left,
    Middle,
    Right,
}

impl TapZone {
    /// Splits `width` into equal thirds. Exact boundaries belong to the middle.
    pub fn locate(tap_x: f32, width: f32) -> Self {
        if width <= 0.0 {
            return TapZone::Middle;
        }
        if tap_x < width / 3.0 {
            TapZone::Left
        } else if tap_x > width * 2.0 / 3.0 {
            TapZone::Right
        } else {
            TapZone::Middle
        }
    }

    pub fn command(self) -> Option<NavigationCommand> {
        match self {
            TapZone::Left => Some(NavigationCommand::Retreat),
            TapZone::Right => Some(NavigationCommand::Advance),
            TapZone::Middle => None,
        }
    }
}

/// Remembers where a press started so a release can be measured against it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<f32>,
}

impl SwipeTracker {
    pub fn press(&mut self, x: f32) {
        self.start = Some(x);
    }

    /// Ends the interaction and returns `(start_x, end_x)`, or nothing when no
    /// press is pending.
    pub fn release(&mut self, x: f32) -> Option<(f32, f32)> {
        self.start.take().map(|start| (start, x))
    }

    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }
}
