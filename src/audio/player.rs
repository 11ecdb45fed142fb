//! Source selection on top of a player engine.
//!
//! `MusicPlayer` remembers which source was picked last and, on `play`, loads
//! that source into the engine only when its media item changed since the
//! previous load. Engine faults are not intercepted here.

use crate::audio::source::{MediaItem, PlaybackSource};
use crate::audio::state::PlaybackState;

/// The engine that buffers, decodes and outputs audio.
///
/// Methods do not return errors: load and output failures are the engine's
/// own business (logged and recorded in its status).
pub trait PlayerEngine {
    /// Replace the loaded item.
    fn set_media_item(&mut self, item: MediaItem);

    /// Load/buffer the current item so `play` can start it.
    fn prepare(&mut self);

    fn play(&mut self);

    fn pause(&mut self);

    /// Free the output device and any worker. The engine is unusable afterwards.
    fn release(&mut self);
}

impl<E: PlayerEngine + ?Sized> PlayerEngine for Box<E> {
    fn set_media_item(&mut self, item: MediaItem) {
        (**self).set_media_item(item)
    }

    fn prepare(&mut self) {
        (**self).prepare()
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Load `source` into `engine` unless it is already loaded, then play.
pub fn play_source<E: PlayerEngine + ?Sized>(
    engine: &mut E,
    state: &mut PlaybackState,
    source: &PlaybackSource,
) {
    let item = source.media_item();
    if state.current_media_item.as_ref() != Some(&item) {
        log::debug!("Loading {}", item.uri);
        state.current_media_item = Some(item.clone());
        engine.set_media_item(item);
        engine.prepare();
    }
    engine.play();
}

/// Plays whichever source was selected last.
#[derive(Debug, Default)]
pub struct MusicPlayer {
    state: PlaybackState,
    source: Option<PlaybackSource>,
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source(&mut self, source: PlaybackSource) -> &mut Self {
        self.source = Some(source);
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// No-op until a source has been set.
    pub fn play<E: PlayerEngine + ?Sized>(&mut self, engine: &mut E) {
        if let Some(source) = &self.source {
            play_source(engine, &mut self.state, source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EngineCall, RecordingEngine};

    #[test]
    fn repeated_play_loads_once() {
        let mut engine = RecordingEngine::new();
        let mut player = MusicPlayer::new();
        player.set_source(PlaybackSource::remote("https://host/a.mp3"));

        player.play(&mut engine);
        player.play(&mut engine);

        assert_eq!(engine.load_count(), 1);
        assert_eq!(engine.prepare_count(), 1);
        assert_eq!(engine.play_count(), 2);
    }

    #[test]
    fn switching_source_loads_new_item() {
        let mut engine = RecordingEngine::new();
        let mut player = MusicPlayer::new();
        let file = PlaybackSource::local("assets/music.mp3");

        player
            .set_source(PlaybackSource::remote("https://host/a.mp3"))
            .play(&mut engine);
        engine.clear();

        player.set_source(file.clone()).play(&mut engine);

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::SetMediaItem(file.media_item()),
                EngineCall::Prepare,
                EngineCall::Play,
            ]
        );
        assert_eq!(player.state().current_media_item, Some(file.media_item()));
    }

    #[test]
    fn play_without_source_is_noop() {
        let mut engine = RecordingEngine::new();
        let mut player = MusicPlayer::new();

        player.play(&mut engine);

        assert!(engine.calls().is_empty());
        assert_eq!(player.state().current_media_item, None);
    }

    #[test]
    fn play_source_works_through_box() {
        let mut engine: Box<dyn PlayerEngine> = Box::new(RecordingEngine::new());
        let mut state = PlaybackState::new();
        let source = PlaybackSource::local("x.mp3");

        play_source(&mut engine, &mut state, &source);
        play_source(&mut engine, &mut state, &source);

        assert_eq!(state.current_media_item, Some(source.media_item()));
    }
}
