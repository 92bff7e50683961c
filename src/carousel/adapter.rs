use std::path::Path;

use tracing::debug;

use crate::carousel::chrome::{self, CarouselLayout};
use crate::carousel::slide::Slide;
use crate::config::SequencerConfig;
use crate::engine::Sequencer;
use crate::error::Result;
use crate::gesture::{NavigationCommand, SwipeTracker};
use crate::presenter::{Presenter, Shape, TransitionFrame, Viewport};

/// The always-mounted hero carousel on the landing page.
pub struct HeroCarousel {
    slides: Vec<Slide>,
    sequencer: Sequencer,
    swipe: SwipeTracker,
}

impl HeroCarousel {
    /// Builds the carousel and starts autoplay at the first slide.
    pub fn mount(slides: Vec<Slide>, config: SequencerConfig) -> Result<Self> {
        let mut sequencer = Sequencer::new(slides.len(), config)?;
        sequencer.open(0)?;
        Ok(Self {
            slides,
            sequencer,
            swipe: SwipeTracker::default(),
        })
    }

    pub fn unmount(&mut self) {
        self.sequencer.close();
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.sequencer.state().current_index]
    }

    pub fn layout(&self, viewport: Viewport) -> CarouselLayout {
        CarouselLayout::new(viewport, self.slides.len())
    }
}

impl Presenter for HeroCarousel {
    fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    fn name(&self) -> &'static str {
        "carousel"
    }

    fn caption(&self) -> Option<&str> {
        self.sequencer
            .state()
            .is_open
            .then(|| self.current_slide().title.as_str())
    }

    fn image_path(&self, viewport: Viewport) -> Option<&Path> {
        self.sequencer
            .state()
            .is_open
            .then(|| self.current_slide().image.pick(viewport.width))
    }

    fn image_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();
        for slide in &self.slides {
            for path in [&slide.image.desktop, &slide.image.tablet, &slide.image.mobile] {
                if !paths.contains(&path.as_path()) {
                    paths.push(path);
                }
            }
        }
        paths
    }

    fn open_at(&mut self, index: usize) -> Result<()> {
        self.sequencer.open(index)
    }

    fn pointer_pressed(&mut self, x: f32, _y: f32) {
        self.swipe.press(x);
    }

    fn pointer_released(&mut self, x: f32, y: f32, viewport: Viewport) -> Result<Option<NavigationCommand>> {
        let Some((start, end)) = self.swipe.release(x) else {
            return Ok(None);
        };
        if let Some(command) = self.sequencer.handle_gesture(start, end)? {
            return Ok(Some(command));
        }

        let command = self.layout(viewport).hit(x, y);
        if let Some(command) = command {
            debug!(?command, "carousel control");
            self.sequencer.navigate(command)?;
        }
        Ok(command)
    }

    fn chrome(&self, viewport: Viewport) -> Vec<Shape> {
        if !self.sequencer.state().is_open {
            return Vec::new();
        }
        let slide = self.current_slide();
        chrome::chrome(
            &self.sequencer.frame(),
            &self.layout(viewport),
            &slide.title,
            &slide.subtitle,
        )
    }

    fn transition(&self) -> TransitionFrame {
        chrome::slide_in(self.sequencer.state().direction, self.sequencer.since_change())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::carousel::slide::ResponsiveImage;
    use crate::engine::SequencerEvent;
    use crate::state::SequencerState;

    fn carousel(count: usize) -> HeroCarousel {
        let slides = (0..count)
            .map(|i| Slide::new(format!("Slide {i}"), "", ResponsiveImage::uniform(format!("{i}.jpg"))))
            .collect();
        HeroCarousel::mount(slides, SequencerConfig::carousel()).expect("carousel")
    }

    #[test]
    fn mount_starts_playing_first_slide() {
        let carousel = carousel(3);
        assert_eq!(carousel.sequencer().phase(), SequencerState::Playing);
        assert_eq!(carousel.caption(), Some("Slide 0"));
    }

    #[test]
    fn mount_rejects_empty_slides() {
        assert!(HeroCarousel::mount(Vec::new(), SequencerConfig::carousel()).is_err());
    }

    #[test]
    fn pointer_swipe_advances_and_suspends() {
        let mut carousel = carousel(3);
        let viewport = Viewport::new(1280.0, 720.0);

        carousel.pointer_pressed(300.0, 200.0);
        assert_eq!(carousel.pointer_released(200.0, 200.0, viewport), Ok(Some(NavigationCommand::Advance)));
        assert_eq!(carousel.caption(), Some("Slide 1"));
        assert_eq!(carousel.sequencer().phase(), SequencerState::Suspended);

        // A release with no press before it is ignored
        assert_eq!(carousel.pointer_released(100.0, 200.0, viewport), Ok(None));
    }

    #[test]
    fn dot_click_jumps_and_suspends() {
        let mut carousel = carousel(4);
        let viewport = Viewport::new(1280.0, 720.0);
        let (x, y) = carousel.layout(viewport).dot(3);

        carousel.pointer_pressed(x, y);
        let command = carousel.pointer_released(x, y, viewport).expect("release");

        assert_eq!(command, Some(NavigationCommand::JumpTo(3)));
        assert_eq!(carousel.caption(), Some("Slide 3"));
        assert_eq!(carousel.sequencer().phase(), SequencerState::Suspended);

        assert!(carousel.update(Duration::from_millis(3000)));
        assert_eq!(carousel.sequencer().phase(), SequencerState::Playing);
    }

    #[test]
    fn tap_on_empty_area_does_nothing() {
        let mut carousel = carousel(3);
        let viewport = Viewport::new(1280.0, 720.0);
        carousel.pointer_pressed(640.0, 300.0);
        assert_eq!(carousel.pointer_released(650.0, 300.0, viewport), Ok(None));
        assert_eq!(carousel.sequencer().phase(), SequencerState::Playing);
    }

    #[test]
    fn image_paths_are_deduplicated() {
        let carousel = carousel(2);
        assert_eq!(carousel.image_paths(), [Path::new("0.jpg"), Path::new("1.jpg")]);
    }

    #[test]
    fn unmount_closes() {
        let mut carousel = carousel(2);
        carousel.unmount();
        assert!(!carousel.update(Duration::from_millis(100)));
        assert_eq!(carousel.caption(), None);
        assert!(carousel.chrome(Viewport::new(800.0, 600.0)).is_empty());
    }

    #[test]
    fn unmount_during_cooldown_cancels_resume() {
        let mut carousel = carousel(3);
        carousel.command(NavigationCommand::Advance).expect("advance");
        assert_eq!(carousel.sequencer().pending_resume(), Some(Duration::from_millis(3000)));

        carousel.unmount();
        carousel.sequencer_mut().drain_events();
        assert!(!carousel.update(Duration::from_secs(10)));

        let events = carousel.sequencer_mut().drain_events();
        assert!(!events.iter().any(|event| matches!(
            event,
            SequencerEvent::Resumed | SequencerEvent::Moved { .. }
        )));
        assert!(!carousel.sequencer().is_ticking());
        assert_eq!(carousel.sequencer().pending_resume(), None);
    }
}
