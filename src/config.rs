//! Player configuration: which URL and bundled file the buttons play.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::source::PlaybackSource;
use crate::error::{PlayerError, Result};

pub const DEFAULT_REMOTE_URL: &str =
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";
pub const DEFAULT_LOCAL_RESOURCE: &str = "assets/music.mp3";

const CONFIG_DIR: &str = "musicplayer";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub remote_url: String,
    pub local_resource: PathBuf,
    pub volume: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            local_resource: PathBuf::from(DEFAULT_LOCAL_RESOURCE),
            volume: 1.0,
        }
    }
}

impl PlayerConfig {
    /// Default location: `<config dir>/musicplayer/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| PlayerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| PlayerError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.normalized())
    }

    /// Load from `path` if given, else from the default location if it exists,
    /// else fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Loading config from {}", path.display());
                Self::load_from(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Directory the binary lives in; bundled resources sit next to it.
    pub fn resource_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }

    /// Resolve a relative `local_resource` against `base` unless it already
    /// exists relative to the working directory.
    pub fn with_resource_base(mut self, base: Option<&Path>) -> Self {
        if let Some(base) = base {
            if self.local_resource.is_relative() && !self.local_resource.exists() {
                self.local_resource = base.join(&self.local_resource);
            }
        }
        self
    }

    pub fn with_overrides(mut self, url: Option<String>, file: Option<PathBuf>) -> Self {
        if let Some(url) = url {
            self.remote_url = url;
        }
        if let Some(file) = file {
            self.local_resource = file;
        }
        self
    }

    fn normalized(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    pub fn url_source(&self) -> PlaybackSource {
        PlaybackSource::remote(self.remote_url.clone())
    }

    pub fn file_source(&self) -> PlaybackSource {
        PlaybackSource::local(self.local_resource.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_demo_track() {
        let config = PlayerConfig::default();
        assert_eq!(config.remote_url, DEFAULT_REMOTE_URL);
        assert_eq!(
            config.file_source(),
            PlaybackSource::local(DEFAULT_LOCAL_RESOURCE)
        );
        assert_eq!(config.volume, 1.0);
    }

    #[test]
    fn relative_resource_resolves_against_base() {
        let base = Path::new("/opt/musicplayer");
        let config = PlayerConfig {
            local_resource: PathBuf::from("bundled/not-here.mp3"),
            ..Default::default()
        }
        .with_resource_base(Some(base));

        assert_eq!(
            config.local_resource,
            PathBuf::from("/opt/musicplayer/bundled/not-here.mp3")
        );
    }

    #[test]
    fn absolute_resource_is_left_alone() {
        let config = PlayerConfig::default()
            .with_overrides(None, Some(PathBuf::from("/music/a.mp3")))
            .with_resource_base(Some(Path::new("/opt/musicplayer")));

        assert_eq!(config.local_resource, PathBuf::from("/music/a.mp3"));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let config = PlayerConfig::default().with_overrides(Some("http://x/y.mp3".into()), None);
        assert_eq!(config.url_source(), PlaybackSource::remote("http://x/y.mp3"));
        assert_eq!(config.local_resource, PathBuf::from(DEFAULT_LOCAL_RESOURCE));
    }
}
