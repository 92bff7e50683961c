use std::path::Path;

use tracing::debug;

use crate::config::SequencerConfig;
use crate::engine::Sequencer;
use crate::error::Result;
use crate::gesture::{NavigationCommand, SwipeTracker};
use crate::presenter::{Presenter, Shape, TransitionFrame, Viewport};
use crate::story::chrome::{self, StoryLayout};
use crate::story::item::StoryItem;

/// Full-screen story overlay opened from the gallery grid.
pub struct StoryViewer {
    stories: Vec<StoryItem>,
    sequencer: Sequencer,
    swipe: SwipeTracker,
}

impl StoryViewer {
    /// The viewer starts closed; nothing plays until a story is opened.
    pub fn new(stories: Vec<StoryItem>, config: SequencerConfig) -> Result<Self> {
        let sequencer = Sequencer::new(stories.len(), config)?;
        Ok(Self {
            stories,
            sequencer,
            swipe: SwipeTracker::default(),
        })
    }

    pub fn stories(&self) -> &[StoryItem] {
        &self.stories
    }

    pub fn open_story(&mut self, index: usize) -> Result<()> {
        self.swipe = SwipeTracker::default();
        self.sequencer.open(index)
    }

    pub fn close(&mut self) {
        self.sequencer.close();
    }

    pub fn is_open(&self) -> bool {
        self.sequencer.state().is_open
    }

    pub fn current_story(&self) -> Option<&StoryItem> {
        self.is_open()
            .then(|| &self.stories[self.sequencer.state().current_index])
    }

    pub fn layout(&self, viewport: Viewport) -> StoryLayout {
        StoryLayout::new(viewport, self.stories.len())
    }

    /// Segment fills in percent, one per story.
    pub fn segments(&self) -> Vec<f32> {
        let frame = self.sequencer.frame();
        (0..self.stories.len())
            .map(|index| chrome::segment_fill(&frame, index))
            .collect()
    }
}

impl Presenter for StoryViewer {
    fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    fn name(&self) -> &'static str {
        "story"
    }

    fn caption(&self) -> Option<&str> {
        self.current_story().map(|story| story.caption.as_str())
    }

    fn image_path(&self, _viewport: Viewport) -> Option<&Path> {
        self.current_story().map(|story| story.image.as_path())
    }

    fn image_paths(&self) -> Vec<&Path> {
        self.stories.iter().map(|story| story.image.as_path()).collect()
    }

    fn open_at(&mut self, index: usize) -> Result<()> {
        self.open_story(index)
    }

    fn pointer_pressed(&mut self, x: f32, _y: f32) {
        if self.is_open() {
            self.swipe.press(x);
        }
    }

    /// Swipes win, then header and arrow buttons, then the tap zones.
    fn pointer_released(&mut self, x: f32, y: f32, viewport: Viewport) -> Result<Option<NavigationCommand>> {
        let Some((start, end)) = self.swipe.release(x) else {
            return Ok(None);
        };
        if let Some(command) = self.sequencer.handle_gesture(start, end)? {
            return Ok(Some(command));
        }

        let current_index = self.sequencer.state().current_index;
        if let Some(command) = self.layout(viewport).hit(x, y, current_index) {
            debug!(?command, "story control");
            self.sequencer.navigate(command)?;
            return Ok(Some(command));
        }

        self.sequencer.handle_zone_tap(x, viewport.width)
    }

    fn chrome(&self, viewport: Viewport) -> Vec<Shape> {
        match self.current_story() {
            Some(story) => chrome::chrome(&self.sequencer.frame(), &self.layout(viewport), &story.caption),
            None => Vec::new(),
        }
    }

    fn transition(&self) -> TransitionFrame {
        chrome::fade_in(self.sequencer.since_change())
    }
}
