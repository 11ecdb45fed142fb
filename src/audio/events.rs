use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Serialize;

use crate::audio::state::{EngineStatus, ToggleState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Toggle state changed after a click.
    Toggled { state: ToggleState },
    EngineCreated,
    EngineReleased,
    /// Engine status changed (load, play, pause, failure).
    Status(EngineStatusEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatusEvent {
    pub current_item: Option<String>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl From<&EngineStatus> for EngineStatusEvent {
    fn from(status: &EngineStatus) -> Self {
        Self {
            current_item: status.current_item.clone(),
            is_playing: status.is_playing,
            is_loading: status.is_loading,
            error: status.error.clone(),
        }
    }
}

/// Fan-out point for player events. Emitting without a subscriber is a no-op.
#[derive(Debug, Clone, Default)]
pub struct EventEmitter {
    tx: Option<Sender<PlayerEvent>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emitter together with the receiving end.
    pub fn channel() -> (Self, Receiver<PlayerEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn emit(&self, event: PlayerEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

pub fn emit_toggled(emitter: &EventEmitter, state: ToggleState) {
    emitter.emit(PlayerEvent::Toggled { state });
}

pub fn emit_status(emitter: &EventEmitter, status: &EngineStatus) {
    emitter.emit(PlayerEvent::Status(status.into()));
}
