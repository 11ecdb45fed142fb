//! End-to-end click flows against a recording engine.

use std::cell::RefCell;
use std::rc::Rc;

use musicplayer_lib::app::{playback_screen, MusicPlayerApp};
use musicplayer_lib::audio::events::{EventEmitter, PlayerEvent};
use musicplayer_lib::audio::ToggleState;
use musicplayer_lib::test_utils::{CallLog, EngineCall, RecordingEngine};
use musicplayer_lib::ui::screen::{PAUSE_LABEL, PLAY_FILE_LABEL, PLAY_URL_LABEL};
use musicplayer_lib::ui::ButtonId;
use musicplayer_lib::{PlayerConfig, Result};

fn new_app(
    log: &CallLog,
) -> MusicPlayerApp<RecordingEngine, impl FnMut() -> Result<RecordingEngine>> {
    let log = log.clone();
    MusicPlayerApp::new(PlayerConfig::default(), move || {
        Ok(RecordingEngine::with_log(log.clone()))
    })
}

fn loads(log: &CallLog) -> usize {
    log.count(|c| matches!(c, EngineCall::SetMediaItem(_)))
}

#[test]
fn initial_state_is_stopped() {
    let log = CallLog::new();
    let app = new_app(&log);

    assert_eq!(app.toggle_state(), ToggleState::Idle);
    let layout = app.screen_layout();
    assert_eq!(layout.label(ButtonId::PlayPauseUrl), Some(PLAY_URL_LABEL));
    assert_eq!(layout.label(ButtonId::PlayPauseFile), Some(PLAY_FILE_LABEL));
}

#[test]
fn url_button_play_then_pause() {
    let log = CallLog::new();
    let mut app = new_app(&log);
    let url_item = app.config().url_source().media_item();

    app.click(ButtonId::PlayPauseUrl);

    assert!(app.is_playing_url());
    assert_eq!(
        app.screen_layout().label(ButtonId::PlayPauseUrl),
        Some(PAUSE_LABEL)
    );
    assert_eq!(
        log.calls(),
        vec![
            EngineCall::SetMediaItem(url_item.clone()),
            EngineCall::Prepare,
            EngineCall::Play,
        ]
    );

    log.clear();
    app.click(ButtonId::PlayPauseUrl);

    assert!(!app.is_playing_url());
    assert_eq!(
        app.screen_layout().label(ButtonId::PlayPauseUrl),
        Some(PLAY_URL_LABEL)
    );
    assert_eq!(log.calls(), vec![EngineCall::Pause]);
    assert_eq!(app.player().state().current_media_item, Some(url_item));
}

#[test]
fn resume_same_source_does_not_reload() {
    let log = CallLog::new();
    let mut app = new_app(&log);

    app.on_play_pause_file_click();
    app.on_play_pause_file_click();
    app.on_play_pause_file_click();

    assert_eq!(loads(&log), 1);
    assert_eq!(log.count(|c| *c == EngineCall::Prepare), 1);
    assert_eq!(log.count(|c| *c == EngineCall::Play), 2);
    assert_eq!(log.count(|c| *c == EngineCall::Pause), 1);
}

#[test]
fn switching_url_to_file_loads_file_once() {
    let log = CallLog::new();
    let mut app = new_app(&log);
    let file_item = app.config().file_source().media_item();

    app.on_play_pause_url_click();
    log.clear();
    app.on_play_pause_file_click();

    assert!(app.is_playing_file());
    assert!(!app.is_playing_url());
    assert_eq!(
        log.calls(),
        vec![
            EngineCall::SetMediaItem(file_item),
            EngineCall::Prepare,
            EngineCall::Play,
        ]
    );
}

#[test]
fn screen_callbacks_drive_the_app() {
    let log = CallLog::new();
    let app = Rc::new(RefCell::new(new_app(&log)));

    let mut screen = playback_screen(&app);
    screen.click(ButtonId::PlayPauseFile);
    drop(screen);

    assert!(app.borrow().is_playing_file());
    let screen = playback_screen(&app);
    assert_eq!(
        screen.layout().label(ButtonId::PlayPauseFile),
        Some(PAUSE_LABEL)
    );
    assert_eq!(loads(&log), 1);
}

#[test]
fn events_follow_the_clicks() {
    let log = CallLog::new();
    let (emitter, events) = EventEmitter::channel();
    let mut app = new_app(&log).with_emitter(emitter);

    app.on_play_pause_url_click();
    app.on_play_pause_url_click();
    app.teardown();

    let received: Vec<PlayerEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            PlayerEvent::Toggled {
                state: ToggleState::PlayingUrl
            },
            PlayerEvent::EngineCreated,
            PlayerEvent::Toggled {
                state: ToggleState::Idle
            },
            PlayerEvent::EngineReleased,
        ]
    );
    assert_eq!(log.calls().last(), Some(&EngineCall::Release));
}
