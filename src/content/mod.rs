pub mod catalog;
pub mod dua;
pub mod story;

pub use dua::{DuaService, JsonDuaRepository};
pub use story::{JsonStoryRepository, StoryService};
