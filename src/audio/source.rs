//! Playback source abstraction for the two buttons.

use std::path::PathBuf;

use serde::Serialize;

/// Where a track comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackSource {
    /// HTTP/HTTPS stream
    RemoteUrl { url: String },
    /// Bundled resource on disk
    LocalResource { path: PathBuf },
}

impl PlaybackSource {
    /// Parse a URL string into the appropriate source type.
    ///
    /// HTTP/HTTPS URLs become `RemoteUrl`, everything else is treated as a local path.
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            PlaybackSource::RemoteUrl {
                url: url.to_string(),
            }
        } else {
            PlaybackSource::LocalResource { path: url.into() }
        }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        PlaybackSource::RemoteUrl { url: url.into() }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        PlaybackSource::LocalResource { path: path.into() }
    }

    /// Build the media item the engine is loaded with.
    pub fn media_item(&self) -> MediaItem {
        let uri = match self {
            PlaybackSource::RemoteUrl { url } => url.clone(),
            PlaybackSource::LocalResource { path } => format!("file://{}", path.display()),
        };
        MediaItem {
            uri,
            source: self.clone(),
        }
    }
}

/// Opaque reference to "what to play", compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub uri: String,
    pub source: PlaybackSource,
}
