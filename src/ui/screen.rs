//! The two-button playback screen.
//!
//! `PlaybackScreen` is a pure view: it turns the two "is playing" flags into a
//! layout and forwards clicks to the callbacks it was given. It keeps no state
//! of its own.

use std::fmt;

use serde::Serialize;

pub const PAUSE_LABEL: &str = "Pause";
pub const PLAY_URL_LABEL: &str = "Play with URL";
pub const PLAY_FILE_LABEL: &str = "Play with File";

/// Width of the frame `ScreenLayout` is drawn in.
const FRAME_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonId {
    PlayPauseUrl,
    PlayPauseFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    CenterHorizontally,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub id: ButtonId,
    pub label: &'static str,
}

/// Column of buttons, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenLayout {
    pub vertical_arrangement: Arrangement,
    pub horizontal_alignment: Alignment,
    pub buttons: Vec<Button>,
}

impl ScreenLayout {
    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    pub fn label(&self, id: ButtonId) -> Option<&'static str> {
        self.button(id).map(|b| b.label)
    }
}

impl fmt::Display for ScreenLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(FRAME_WIDTH);
        writeln!(f, "+{}+", border)?;
        for button in &self.buttons {
            let text = format!("[ {} ]", button.label);
            writeln!(f, "|{:^width$}|", text, width = FRAME_WIDTH)?;
        }
        write!(f, "+{}+", border)
    }
}

pub struct PlaybackScreen<'a> {
    is_playing_url: bool,
    is_playing_file: bool,
    on_play_pause_url_click: Box<dyn FnMut() + 'a>,
    on_play_pause_file_click: Box<dyn FnMut() + 'a>,
}

impl<'a> PlaybackScreen<'a> {
    pub fn new(
        is_playing_url: bool,
        is_playing_file: bool,
        on_play_pause_url_click: impl FnMut() + 'a,
        on_play_pause_file_click: impl FnMut() + 'a,
    ) -> Self {
        Self {
            is_playing_url,
            is_playing_file,
            on_play_pause_url_click: Box::new(on_play_pause_url_click),
            on_play_pause_file_click: Box::new(on_play_pause_file_click),
        }
    }

    pub fn layout(&self) -> ScreenLayout {
        render(self.is_playing_url, self.is_playing_file)
    }

    pub fn click(&mut self, id: ButtonId) {
        match id {
            ButtonId::PlayPauseUrl => (self.on_play_pause_url_click)(),
            ButtonId::PlayPauseFile => (self.on_play_pause_file_click)(),
        }
    }
}

/// Layout for the given flags.
pub fn render(is_playing_url: bool, is_playing_file: bool) -> ScreenLayout {
    ScreenLayout {
        vertical_arrangement: Arrangement::Center,
        horizontal_alignment: Alignment::CenterHorizontally,
        buttons: vec![
            Button {
                id: ButtonId::PlayPauseUrl,
                label: if is_playing_url {
                    PAUSE_LABEL
                } else {
                    PLAY_URL_LABEL
                },
            },
            Button {
                id: ButtonId::PlayPauseFile,
                label: if is_playing_file {
                    PAUSE_LABEL
                } else {
                    PLAY_FILE_LABEL
                },
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn idle_labels() {
        let layout = render(false, false);
        assert_eq!(layout.label(ButtonId::PlayPauseUrl), Some(PLAY_URL_LABEL));
        assert_eq!(layout.label(ButtonId::PlayPauseFile), Some(PLAY_FILE_LABEL));
        assert_eq!(layout.vertical_arrangement, Arrangement::Center);
    }

    #[test]
    fn playing_button_shows_pause() {
        let layout = render(true, false);
        assert_eq!(layout.label(ButtonId::PlayPauseUrl), Some(PAUSE_LABEL));
        assert_eq!(layout.label(ButtonId::PlayPauseFile), Some(PLAY_FILE_LABEL));

        let layout = render(false, true);
        assert_eq!(layout.label(ButtonId::PlayPauseUrl), Some(PLAY_URL_LABEL));
        assert_eq!(layout.label(ButtonId::PlayPauseFile), Some(PAUSE_LABEL));
    }

    #[test]
    fn clicks_reach_matching_callback() {
        let url_clicks = Cell::new(0);
        let file_clicks = Cell::new(0);
        let mut screen = PlaybackScreen::new(
            false,
            false,
            || url_clicks.set(url_clicks.get() + 1),
            || file_clicks.set(file_clicks.get() + 1),
        );

        screen.click(ButtonId::PlayPauseUrl);
        screen.click(ButtonId::PlayPauseUrl);
        screen.click(ButtonId::PlayPauseFile);

        assert_eq!(url_clicks.get(), 2);
        assert_eq!(file_clicks.get(), 1);
        assert_eq!(screen.layout(), render(false, false));
    }

    #[test]
    fn display_centers_labels() {
        let text = render(false, false).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("[ Play with URL ]"));
        assert!(lines[2].contains("[ Play with File ]"));
        assert_eq!(lines[1].len(), FRAME_WIDTH + 2);
    }
}
