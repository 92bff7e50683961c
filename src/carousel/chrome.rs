use std::time::Duration;

use crate::constants::SLIDE_TRANSITION;
use crate::gesture::NavigationCommand;
use crate::presenter::{Glyph, Shape, Tone, TransitionFrame, Viewport, ease_out_cubic, within};
use crate::state::{Direction, Frame};

const ARROW_INSET: f32 = 56.0;   // Arrow centre distance from the side
const ARROW_RADIUS: f32 = 24.0;
const ROW_BOTTOM: f32 = 32.0;    // Dot row centre distance from the bottom
const SLOT_WIDTH: f32 = 24.0;    // One slot per control in the dot row
const DOT_RADIUS: f32 = 4.0;
const RING_RADIUS: f32 = 8.0;
const RING_THICKNESS: f32 = 2.0;

/// Where the carousel's controls sit for a given viewport
pub struct CarouselLayout {
    viewport: Viewport,
    count: usize,
}

impl CarouselLayout {
    pub fn new(viewport: Viewport, count: usize) -> Self {
        Self { viewport, count }
    }

    pub fn prev_button(&self) -> (f32, f32) {
        (ARROW_INSET, self.viewport.height * 0.5)
    }

    pub fn next_button(&self) -> (f32, f32) {
        (self.viewport.width - ARROW_INSET, self.viewport.height * 0.5)
    }

    /// The play/pause toggle takes the first slot of the bottom row.
    pub fn toggle_button(&self) -> (f32, f32) {
        self.slot(0)
    }

    pub fn dot(&self, index: usize) -> (f32, f32) {
        self.slot(index + 1)
    }

    fn slot(&self, slot: usize) -> (f32, f32) {
        let row_width = (self.count + 1) as f32 * SLOT_WIDTH;
        let first = self.viewport.width * 0.5 - row_width * 0.5 + SLOT_WIDTH * 0.5;
        (first + slot as f32 * SLOT_WIDTH, self.viewport.height - ROW_BOTTOM)
    }

    pub fn hit(&self, x: f32, y: f32) -> Option<NavigationCommand> {
        if within(x, y, self.prev_button(), ARROW_RADIUS) {
            return Some(NavigationCommand::Retreat);
        }
        if within(x, y, self.next_button(), ARROW_RADIUS) {
            return Some(NavigationCommand::Advance);
        }
        if within(x, y, self.toggle_button(), SLOT_WIDTH * 0.5) {
            return Some(NavigationCommand::TogglePause);
        }
        (0..self.count)
            .find(|index| within(x, y, self.dot(*index), SLOT_WIDTH * 0.5))
            .map(NavigationCommand::JumpTo)
    }
}

/// Arc of the active dot's progress ring. The ring only exists while autoplay
/// is running.
pub fn ring_sweep(frame: &Frame, index: usize) -> Option<f32> {
    (index == frame.current_index && frame.is_auto_playing).then(|| 360.0 * frame.progress / 100.0)
}

pub fn chrome(frame: &Frame, layout: &CarouselLayout, title: &str, subtitle: &str) -> Vec<Shape> {
    let viewport = layout.viewport;
    let mut shapes = Vec::new();

    shapes.push(Shape::Label {
        text: title.to_string(),
        x: viewport.width * 0.5,
        y: viewport.height * 0.5 - 24.0,
        size: 48.0,
        tone: Tone::Text,
    });
    if !subtitle.is_empty() {
        shapes.push(Shape::Label {
            text: subtitle.to_string(),
            x: viewport.width * 0.5,
            y: viewport.height * 0.5 + 32.0,
            size: 24.0,
            tone: Tone::Accent,
        });
    }

    for ((x, y), glyph) in [
        (layout.prev_button(), Glyph::ChevronLeft),
        (layout.next_button(), Glyph::ChevronRight),
    ] {
        shapes.push(Shape::Disc { x, y, radius: ARROW_RADIUS, tone: Tone::Backdrop });
        shapes.push(Shape::Icon { glyph, x, y, size: 20.0, tone: Tone::Accent });
    }

    let (x, y) = layout.toggle_button();
    let glyph = if frame.is_auto_playing { Glyph::Pause } else { Glyph::Play };
    shapes.push(Shape::Icon { glyph, x, y, size: 16.0, tone: Tone::Accent });

    for index in 0..layout.count {
        let (x, y) = layout.dot(index);
        let tone = if index == frame.current_index { Tone::Accent } else { Tone::Muted };
        shapes.push(Shape::Disc { x, y, radius: DOT_RADIUS, tone });

        if let Some(sweep_degrees) = ring_sweep(frame, index) {
            shapes.push(Shape::Ring {
                x,
                y,
                radius: RING_RADIUS,
                thickness: RING_THICKNESS,
                sweep_degrees,
                tone: Tone::Accent,
            });
        }
    }

    shapes
}

/// Slides enter from the right when moving forward and from the left when
/// moving back, growing slightly less zoomed as they settle.
pub fn slide_in(direction: Direction, since_change: Duration) -> TransitionFrame {
    let eased = ease_out_cubic(since_change, SLIDE_TRANSITION);
    let side = match direction {
        Direction::Forward => 1.0,
        Direction::Backward => -1.0,
    };
    TransitionFrame {
        offset_x: side * (1.0 - eased),
        opacity: eased,
        scale: 1.0 + 0.05 * (1.0 - eased),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(current_index: usize, progress: f32, is_auto_playing: bool) -> Frame {
        Frame {
            current_index,
            progress,
            direction: Direction::Forward,
            is_open: true,
            is_auto_playing,
        }
    }

    #[test]
    fn ring_only_on_active_dot_while_playing() {
        let playing = frame(1, 25.0, true);
        assert_eq!(ring_sweep(&playing, 1), Some(90.0));
        assert_eq!(ring_sweep(&playing, 0), None);

        let paused = frame(1, 25.0, false);
        assert_eq!(ring_sweep(&paused, 1), None);
    }

    #[test]
    fn chrome_draws_one_ring() {
        let layout = CarouselLayout::new(Viewport::new(1280.0, 720.0), 4);
        let shapes = chrome(&frame(2, 50.0, true), &layout, "Timeless Design", "");

        let rings: Vec<_> = shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Ring { .. }))
            .collect();
        assert_eq!(rings.len(), 1);
        let (x, _) = layout.dot(2);
        assert!(matches!(rings[0], Shape::Ring { x: rx, sweep_degrees, .. } if *rx == x && *sweep_degrees == 180.0));

        let labels = shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Label { .. }))
            .count();
        assert_eq!(labels, 1);
    }

    #[test]
    fn hit_testing_maps_controls() {
        let layout = CarouselLayout::new(Viewport::new(1280.0, 720.0), 3);

        let (x, y) = layout.prev_button();
        assert_eq!(layout.hit(x + 10.0, y), Some(NavigationCommand::Retreat));
        let (x, y) = layout.next_button();
        assert_eq!(layout.hit(x, y - 10.0), Some(NavigationCommand::Advance));
        let (x, y) = layout.toggle_button();
        assert_eq!(layout.hit(x, y), Some(NavigationCommand::TogglePause));
        let (x, y) = layout.dot(2);
        assert_eq!(layout.hit(x, y), Some(NavigationCommand::JumpTo(2)));

        assert_eq!(layout.hit(640.0, 360.0), None);
    }

    #[test]
    fn slide_direction_follows_navigation() {
        let forward = slide_in(Direction::Forward, Duration::ZERO);
        assert_eq!(forward.offset_x, 1.0);
        assert_eq!(forward.opacity, 0.0);

        let backward = slide_in(Direction::Backward, Duration::ZERO);
        assert_eq!(backward.offset_x, -1.0);

        assert_eq!(slide_in(Direction::Backward, SLIDE_TRANSITION), TransitionFrame::SETTLED);
    }
}
