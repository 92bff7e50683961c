pub mod adapter;
pub mod chrome;
pub mod slide;

pub use adapter::HeroCarousel;
pub use slide::{ResponsiveImage, Slide};
