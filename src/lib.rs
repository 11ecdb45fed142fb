pub mod app;
pub mod audio;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod ui;

pub use app::MusicPlayerApp;
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
