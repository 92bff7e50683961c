//! The seam between the engine and whatever draws it.
//!
//! A presenter owns one [`Sequencer`] plus the items it plays, turns pointer
//! input into navigation commands and describes its chrome as plain shapes,
//! so the raylib viewer and the headless simulator can host either instance.

use std::path::Path;
use std::time::Duration;

use crate::engine::Sequencer;
use crate::error::Result;
use crate::gesture::NavigationCommand;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,   // Beige highlight
    Muted,    // Dimmed accent for inactive dots and empty tracks
    Text,     // White copy
    Backdrop, // Burgundy button fill
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Play,
    Pause,
    Close,
    ChevronLeft,
    ChevronRight,
}

/// Chrome primitives, in viewport coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Disc { x: f32, y: f32, radius: f32, tone: Tone },
    /// Progress arc starting at twelve o'clock, clockwise
    Ring { x: f32, y: f32, radius: f32, thickness: f32, sweep_degrees: f32, tone: Tone },
    /// Track with a left-aligned fill, `fill` in `[0, 1]`
    Bar { x: f32, y: f32, width: f32, height: f32, fill: f32 },
    Icon { glyph: Glyph, x: f32, y: f32, size: f32, tone: Tone },
    Label { text: String, x: f32, y: f32, size: f32, tone: Tone },
}

/// Placement of the active image while it transitions in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Horizontal offset as a fraction of the viewport width
    pub offset_x: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl TransitionFrame {
    pub const SETTLED: TransitionFrame = TransitionFrame {
        offset_x: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };
}

pub fn ease_out_cubic(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let t = (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0);
    1.0 - (1.0 - t).powi(3)
}

pub(crate) fn within(x: f32, y: f32, (cx, cy): (f32, f32), radius: f32) -> bool {
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= radius * radius
}

pub trait Presenter {
    fn sequencer(&self) -> &Sequencer;
    fn sequencer_mut(&mut self) -> &mut Sequencer;

    fn name(&self) -> &'static str;
    fn caption(&self) -> Option<&str>;
    fn image_path(&self, viewport: Viewport) -> Option<&Path>;
    fn image_paths(&self) -> Vec<&Path>;

    /// Mounts (carousel) or opens (story) the instance at `index`.
    fn open_at(&mut self, index: usize) -> Result<()>;

    fn pointer_pressed(&mut self, x: f32, y: f32);
    fn pointer_released(&mut self, x: f32, y: f32, viewport: Viewport) -> Result<Option<NavigationCommand>>;

    fn chrome(&self, viewport: Viewport) -> Vec<Shape>;
    fn transition(&self) -> TransitionFrame;

    fn command(&mut self, command: NavigationCommand) -> Result<()> {
        self.sequencer_mut().navigate(command)
    }

    /// Advances time by `dt`. Returns whether the instance is still showing.
    fn update(&mut self, dt: Duration) -> bool {
        self.sequencer_mut().advance_time(dt);
        self.sequencer().state().is_open
    }
}
