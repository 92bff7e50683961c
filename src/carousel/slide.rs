use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{DESKTOP_VIEWPORT, WIDE_VIEWPORT};

/// One image per breakpoint, picked by viewport width
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponsiveImage {
    pub desktop: PathBuf,
    pub tablet: PathBuf,
    pub mobile: PathBuf,
}

impl ResponsiveImage {
    pub fn uniform(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            desktop: path.clone(),
            tablet: path.clone(),
            mobile: path,
        }
    }

    pub fn pick(&self, viewport_width: f32) -> &Path {
        if viewport_width >= DESKTOP_VIEWPORT {
            &self.desktop
        } else if viewport_width >= WIDE_VIEWPORT {
            &self.tablet
        } else {
            &self.mobile
        }
    }

    pub(crate) fn rebase(&mut self, base: &Path) {
        for path in [&mut self.desktop, &mut self.tablet, &mut self.mobile] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub image: ResponsiveImage,
}

impl Slide {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, image: ResponsiveImage) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            image,
        }
    }
}
