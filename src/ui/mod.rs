pub mod screen;

pub use screen::{render, ButtonId, PlaybackScreen, ScreenLayout};
