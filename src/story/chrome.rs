use std::time::Duration;

use crate::constants::{FADE_TRANSITION, WIDE_VIEWPORT};
use crate::gesture::NavigationCommand;
use crate::presenter::{Glyph, Shape, Tone, TransitionFrame, Viewport, ease_out_cubic, within};
use crate::state::Frame;

const BAR_MARGIN: f32 = 16.0;
const BAR_TOP: f32 = 12.0;
const BAR_HEIGHT: f32 = 4.0;
const BAR_GAP: f32 = 6.0;
const HEADER_Y: f32 = 48.0;
const BUTTON_RADIUS: f32 = 18.0;
const ARROW_INSET: f32 = 40.0;
const ARROW_RADIUS: f32 = 24.0;

/// Fill of segment `index`, in percent: finished stories are full, the active
/// one shows live progress, later ones are empty.
pub fn segment_fill(frame: &Frame, index: usize) -> f32 {
    if index < frame.current_index {
        100.0
    } else if index == frame.current_index {
        frame.progress
    } else {
        0.0
    }
}

pub struct StoryLayout {
    viewport: Viewport,
    count: usize,
}

impl StoryLayout {
    pub fn new(viewport: Viewport, count: usize) -> Self {
        Self { viewport, count }
    }

    pub fn segment(&self, index: usize) -> (f32, f32, f32) {
        let gaps = self.count.saturating_sub(1) as f32 * BAR_GAP;
        let width = ((self.viewport.width - 2.0 * BAR_MARGIN - gaps) / self.count.max(1) as f32).max(0.0);
        (BAR_MARGIN + index as f32 * (width + BAR_GAP), BAR_TOP, width)
    }

    pub fn pause_button(&self) -> (f32, f32) {
        (self.viewport.width - 80.0, HEADER_Y)
    }

    pub fn close_button(&self) -> (f32, f32) {
        (self.viewport.width - 36.0, HEADER_Y)
    }

    /// Arrow buttons exist only on wide viewports.
    pub fn has_arrows(&self) -> bool {
        self.viewport.width >= WIDE_VIEWPORT
    }

    pub fn prev_button(&self) -> (f32, f32) {
        (ARROW_INSET, self.viewport.height * 0.5)
    }

    pub fn next_button(&self) -> (f32, f32) {
        (self.viewport.width - ARROW_INSET, self.viewport.height * 0.5)
    }

    /// The previous arrow is hidden and inert on the first story.
    pub fn hit(&self, x: f32, y: f32, current_index: usize) -> Option<NavigationCommand> {
        if within(x, y, self.pause_button(), BUTTON_RADIUS) {
            return Some(NavigationCommand::TogglePause);
        }
        if within(x, y, self.close_button(), BUTTON_RADIUS) {
            return Some(NavigationCommand::Close);
        }
        if self.has_arrows() {
            if current_index > 0 && within(x, y, self.prev_button(), ARROW_RADIUS) {
                return Some(NavigationCommand::Retreat);
            }
            if within(x, y, self.next_button(), ARROW_RADIUS) {
                return Some(NavigationCommand::Advance);
            }
        }
        None
    }
}

pub fn chrome(frame: &Frame, layout: &StoryLayout, caption: &str) -> Vec<Shape> {
    let viewport = layout.viewport;
    let mut shapes = Vec::new();

    for index in 0..layout.count {
        let (x, y, width) = layout.segment(index);
        shapes.push(Shape::Bar {
            x,
            y,
            width,
            height: BAR_HEIGHT,
            fill: segment_fill(frame, index) / 100.0,
        });
    }

    shapes.push(Shape::Label {
        text: caption.to_string(),
        x: BAR_MARGIN + 48.0,
        y: HEADER_Y,
        size: 18.0,
        tone: Tone::Text,
    });

    let (x, y) = layout.pause_button();
    let glyph = if frame.is_auto_playing { Glyph::Pause } else { Glyph::Play };
    shapes.push(Shape::Icon { glyph, x, y, size: 18.0, tone: Tone::Text });
    let (x, y) = layout.close_button();
    shapes.push(Shape::Icon { glyph: Glyph::Close, x, y, size: 22.0, tone: Tone::Text });

    if layout.has_arrows() {
        let mut arrows = vec![(layout.next_button(), Glyph::ChevronRight)];
        if frame.current_index > 0 {
            arrows.push((layout.prev_button(), Glyph::ChevronLeft));
        }
        for ((x, y), glyph) in arrows {
            shapes.push(Shape::Disc { x, y, radius: ARROW_RADIUS, tone: Tone::Muted });
            shapes.push(Shape::Icon { glyph, x, y, size: 24.0, tone: Tone::Text });
        }
    }

    shapes.push(Shape::Label {
        text: caption.to_string(),
        x: viewport.width * 0.5,
        y: viewport.height - 80.0,
        size: 32.0,
        tone: Tone::Text,
    });

    shapes
}

/// Stories fade and scale in place regardless of direction.
pub fn fade_in(since_change: Duration) -> TransitionFrame {
    let eased = ease_out_cubic(since_change, FADE_TRANSITION);
    TransitionFrame {
        offset_x: 0.0,
        opacity: eased,
        scale: 1.0 - 0.05 * (1.0 - eased),
    }
}
