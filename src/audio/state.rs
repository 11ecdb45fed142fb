use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::audio::source::MediaItem;

/// The media item last handed to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub current_media_item: Option<MediaItem>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Which button, if any, is currently in its "playing" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToggleState {
    #[default]
    Idle,
    PlayingUrl,
    PlayingFile,
}

/// What the owner has to do after a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    PlayUrl,
    PlayFile,
    Pause,
}

impl ToggleState {
    pub fn is_playing_url(&self) -> bool {
        matches!(self, ToggleState::PlayingUrl)
    }

    pub fn is_playing_file(&self) -> bool {
        matches!(self, ToggleState::PlayingFile)
    }

    /// Transition for a click on the URL button.
    pub fn click_url(&mut self) -> ToggleAction {
        if self.is_playing_url() {
            *self = ToggleState::Idle;
            ToggleAction::Pause
        } else {
            *self = ToggleState::PlayingUrl;
            ToggleAction::PlayUrl
        }
    }

    /// Transition for a click on the file button.
    pub fn click_file(&mut self) -> ToggleAction {
        if self.is_playing_file() {
            *self = ToggleState::Idle;
            ToggleAction::Pause
        } else {
            *self = ToggleState::PlayingFile;
            ToggleAction::PlayFile
        }
    }
}

/// Snapshot of what the engine is doing, readable from any thread.
#[derive(Debug, Clone, Serialize, Default)]
pub struct EngineStatus {
    pub current_item: Option<String>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub type SharedStatus = Arc<RwLock<EngineStatus>>;

pub fn create_shared_status() -> SharedStatus {
    Arc::new(RwLock::new(EngineStatus::default()))
}
