//! Item sources for the two instances.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::asset::load_sorted_image_paths;
use crate::carousel::slide::{ResponsiveImage, Slide};
use crate::error::AssetError;
use crate::story::item::StoryItem;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub slides: Vec<Slide>,
    pub stories: Vec<StoryItem>,
}

impl Catalog {
    /// Parses a TOML catalog. Relative image paths are resolved against the
    /// catalog's own directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog '{}'", path.display()))?;
        let mut catalog = Self::parse(&raw)
            .with_context(|| format!("failed to parse catalog '{}'", path.display()))?;

        if let Some(base) = path.parent() {
            catalog.rebase(base);
        }
        Ok(catalog)
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Every image in `dir` becomes both a slide and a story, captioned with
    /// its file stem.
    pub fn from_image_dir(dir: &Path) -> Result<Self, AssetError> {
        let paths = load_sorted_image_paths(dir)?;

        let mut catalog = Catalog::default();
        for path in paths {
            let caption = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            catalog.slides.push(Slide::new(
                caption.clone(),
                String::new(),
                ResponsiveImage::uniform(path.clone()),
            ));
            catalog.stories.push(StoryItem::new(path, caption));
        }
        Ok(catalog)
    }

    /// The storefront's own showcase content.
    pub fn demo() -> Self {
        let slides = [
            ("mood (2).jpeg", "Artisan Craftsmanship", "Handcrafted with precision and passion"),
            ("mood (3).jpeg", "Premium Materials", "Only the finest materials make the cut"),
            ("mood(4).jpeg", "Timeless Design", "Elegance that transcends trends"),
            ("mood (1).jpeg", "Luxury Collection", "Discover our signature pieces"),
        ];
        let stories = [
            ("storyofjamalie1.webp", "Moodboard"),
            ("story (3).jpg", "Behind the Brand"),
            ("story (4).jpg", "Inspo"),
            ("story(6).jpg", "Lookbook"),
            ("story (1).jpg", "Textures"),
            ("story (2).jpg", "Craftsmanship"),
        ];

        Self {
            slides: slides
                .into_iter()
                .map(|(image, title, subtitle)| {
                    Slide::new(title, subtitle, ResponsiveImage::uniform(format!("assets/{image}")))
                })
                .collect(),
            stories: stories
                .into_iter()
                .map(|(image, caption)| StoryItem::new(format!("assets/{image}"), caption))
                .collect(),
        }
    }

    fn rebase(&mut self, base: &Path) {
        for slide in &mut self.slides {
            slide.image.rebase(base);
        }
        for story in &mut self.stories {
            story.rebase(base);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    const CATALOG: &str = r#"
        [[slides]]
        title = "Premium Materials"
        subtitle = "Only the finest materials make the cut"
        image = { desktop = "hero-xl.jpg", tablet = "hero-md.jpg", mobile = "hero-sm.jpg" }

        [[slides]]
        title = "Timeless Design"
        image = { desktop = "/cdn/a.jpg", tablet = "/cdn/a.jpg", mobile = "/cdn/a.jpg" }

        [[stories]]
        image = "story1.jpg"
        caption = "Moodboard"
    "#;

    #[test]
    fn parses_slides_and_stories() {
        let catalog = Catalog::parse(CATALOG).expect("catalog");

        assert_eq!(catalog.slides.len(), 2);
        assert_eq!(catalog.slides[1].subtitle, "");
        assert_eq!(catalog.stories, vec![StoryItem::new("story1.jpg", "Moodboard")]);
    }

    #[test]
    fn missing_sections_are_empty() {
        let catalog = Catalog::parse("[[stories]]\nimage = \"a.jpg\"\ncaption = \"A\"\n").expect("catalog");
        assert!(catalog.slides.is_empty());
        assert_eq!(catalog.stories.len(), 1);
    }

    #[test]
    fn load_resolves_relative_paths() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("showreel_catalog_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("catalog.toml");
        fs::write(&path, CATALOG).expect("write");

        let catalog = Catalog::load(&path).expect("catalog");
        assert_eq!(catalog.slides[0].image.mobile, dir.join("hero-sm.jpg"));
        assert_eq!(catalog.slides[1].image.mobile, PathBuf::from("/cdn/a.jpg"));
        assert_eq!(catalog.stories[0].image, dir.join("story1.jpg"));

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn demo_has_both_instances() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.slides.len(), 4);
        assert_eq!(catalog.stories.len(), 6);
        assert_eq!(catalog.stories[0].caption, "Moodboard");
    }
}
