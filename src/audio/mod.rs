pub mod events;
pub mod player;
pub mod source;
pub mod state;

#[cfg(feature = "rodio")]
pub mod engine;

pub use player::{play_source, MusicPlayer, PlayerEngine};
pub use source::{MediaItem, PlaybackSource};
pub use state::{PlaybackState, ToggleAction, ToggleState};
