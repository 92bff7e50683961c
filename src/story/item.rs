use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoryItem {
    pub image: PathBuf,
    pub caption: String,
}

impl StoryItem {
    pub fn new(image: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            caption: caption.into(),
        }
    }

    pub(crate) fn rebase(&mut self, base: &Path) {
        if self.image.is_relative() {
            self.image = base.join(&self.image);
        }
    }
}
