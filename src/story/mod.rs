pub mod adapter;
pub mod chrome;
pub mod item;

pub use adapter::StoryViewer;
pub use item::StoryItem;
