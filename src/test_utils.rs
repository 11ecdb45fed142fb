//! Test doubles for driving the player without an audio device.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::audio::player::PlayerEngine;
use crate::audio::source::MediaItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetMediaItem(MediaItem),
    Prepare,
    Play,
    Pause,
    Release,
}

/// Call history shared between an engine and the test that owns it.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EngineCall>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: EngineCall) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    pub fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.0.lock().iter().filter(|c| pred(c)).count()
    }
}

/// Engine that records every call instead of producing sound.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    log: CallLog,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: CallLog) -> Self {
        Self { log }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.log.calls()
    }

    pub fn clear(&self) {
        self.log.clear();
    }

    pub fn load_count(&self) -> usize {
        self.log.count(|c| matches!(c, EngineCall::SetMediaItem(_)))
    }

    pub fn prepare_count(&self) -> usize {
        self.log.count(|c| *c == EngineCall::Prepare)
    }

    pub fn play_count(&self) -> usize {
        self.log.count(|c| *c == EngineCall::Play)
    }
}

impl PlayerEngine for RecordingEngine {
    fn set_media_item(&mut self, item: MediaItem) {
        self.log.push(EngineCall::SetMediaItem(item));
    }

    fn prepare(&mut self) {
        self.log.push(EngineCall::Prepare);
    }

    fn play(&mut self) {
        self.log.push(EngineCall::Play);
    }

    fn pause(&mut self) {
        self.log.push(EngineCall::Pause);
    }

    fn release(&mut self) {
        self.log.push(EngineCall::Release);
    }
}
