//! The screen owner: toggle state, controller and the lazily created engine.

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::events::{self, EventEmitter, PlayerEvent};
use crate::audio::player::{MusicPlayer, PlayerEngine};
use crate::audio::source::PlaybackSource;
use crate::audio::state::{ToggleAction, ToggleState};
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::ui::screen::{self, ButtonId, PlaybackScreen, ScreenLayout};

pub struct MusicPlayerApp<E, F>
where
    E: PlayerEngine,
    F: FnMut() -> Result<E>,
{
    config: PlayerConfig,
    engine: Option<E>,
    engine_factory: F,
    player: MusicPlayer,
    toggle: ToggleState,
    emitter: EventEmitter,
}

impl<E, F> MusicPlayerApp<E, F>
where
    E: PlayerEngine,
    F: FnMut() -> Result<E>,
{
    /// The engine is not created until the first play.
    pub fn new(config: PlayerConfig, engine_factory: F) -> Self {
        Self {
            config,
            engine: None,
            engine_factory,
            player: MusicPlayer::new(),
            toggle: ToggleState::Idle,
            emitter: EventEmitter::new(),
        }
    }

    pub fn with_emitter(mut self, emitter: EventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn toggle_state(&self) -> ToggleState {
        self.toggle
    }

    pub fn is_playing_url(&self) -> bool {
        self.toggle.is_playing_url()
    }

    pub fn is_playing_file(&self) -> bool {
        self.toggle.is_playing_file()
    }

    pub fn player(&self) -> &MusicPlayer {
        &self.player
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn screen_layout(&self) -> ScreenLayout {
        screen::render(self.is_playing_url(), self.is_playing_file())
    }

    pub fn on_play_pause_url_click(&mut self) {
        let action = self.toggle.click_url();
        self.apply(action);
    }

    pub fn on_play_pause_file_click(&mut self) {
        let action = self.toggle.click_file();
        self.apply(action);
    }

    pub fn click(&mut self, id: ButtonId) {
        match id {
            ButtonId::PlayPauseUrl => self.on_play_pause_url_click(),
            ButtonId::PlayPauseFile => self.on_play_pause_file_click(),
        }
    }

    fn apply(&mut self, action: ToggleAction) {
        events::emit_toggled(&self.emitter, self.toggle);
        match action {
            ToggleAction::PlayUrl => {
                log::info!("Playing URL: {}", self.config.remote_url);
                let source = self.config.url_source();
                self.play(source);
            }
            ToggleAction::PlayFile => {
                log::info!("Playing file: {}", self.config.local_resource.display());
                let source = self.config.file_source();
                self.play(source);
            }
            ToggleAction::Pause => self.pause(),
        }
    }

    fn play(&mut self, source: PlaybackSource) {
        if !self.ensure_engine() {
            return;
        }
        if let Some(engine) = self.engine.as_mut() {
            self.player.set_source(source).play(engine);
        }
    }

    /// Pause goes straight to the engine; the loaded item stays.
    fn pause(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.pause();
        }
    }

    fn ensure_engine(&mut self) -> bool {
        if self.engine.is_some() {
            return true;
        }
        match (self.engine_factory)() {
            Ok(engine) => {
                self.engine = Some(engine);
                self.emitter.emit(PlayerEvent::EngineCreated);
                true
            }
            Err(e) => {
                log::error!("Failed to create player engine: {}", e);
                false
            }
        }
    }

    /// Release the engine. Playback state is forgotten so a later click
    /// loads its source into the fresh engine.
    pub fn teardown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.release();
            self.emitter.emit(PlayerEvent::EngineReleased);
            log::info!("Player engine released");
        }
        self.player = MusicPlayer::new();
        self.toggle = ToggleState::Idle;
    }
}

impl<E, F> Drop for MusicPlayerApp<E, F>
where
    E: PlayerEngine,
    F: FnMut() -> Result<E>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Build the screen for a shared app, with clicks routed back into it.
pub fn playback_screen<E, F>(app: &Rc<RefCell<MusicPlayerApp<E, F>>>) -> PlaybackScreen<'static>
where
    E: PlayerEngine + 'static,
    F: FnMut() -> Result<E> + 'static,
{
    let (is_playing_url, is_playing_file) = {
        let app = app.borrow();
        (app.is_playing_url(), app.is_playing_file())
    };
    let url_app = Rc::clone(app);
    let file_app = Rc::clone(app);
    PlaybackScreen::new(
        is_playing_url,
        is_playing_file,
        move || url_app.borrow_mut().on_play_pause_url_click(),
        move || file_app.borrow_mut().on_play_pause_file_click(),
    )
}
