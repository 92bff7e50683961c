pub mod asset;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod presenter;
pub mod script;
pub mod simulate;
pub mod state;
pub mod story;
pub mod timer;

#[cfg(feature = "viewer")]
pub mod render;
#[cfg(feature = "viewer")]
pub mod texture_loader;
