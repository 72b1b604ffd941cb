use percent_encoding::percent_decode_str;
use std::path::PathBuf;

pub mod events;

const FILE_URI_SCHEME: &str = "file://";

/// Commands the media player accepts from the track list.
pub trait HostPlayer {
    fn seek_to(&mut self, seconds: u64);
    fn play(&mut self);
}

/// What the player reports when a new item starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayingItem {
    pub uri: String,
    pub duration_seconds: u64,
    pub display_title: Option<String>,
}

impl PlayingItem {
    pub fn new(uri: impl Into<String>, duration_seconds: u64) -> Self {
        Self {
            uri: uri.into(),
            duration_seconds,
            display_title: None,
        }
    }

    pub fn with_display_title(mut self, title: impl Into<String>) -> Self {
        self.display_title = Some(title.into());
        self
    }

    pub fn audio_path(&self) -> PathBuf {
        uri_to_path(&self.uri)
    }

    /// Heading for the track list: the display title minus its extension,
    /// falling back to the audio file stem.
    pub fn heading(&self) -> String {
        match &self.display_title {
            Some(title) => title
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(title.as_str())
                .to_string(),
            None => self
                .audio_path()
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Turns a playback URI into a local path. `file://` is dropped and `%XX`
/// escapes are decoded; anything else is taken as a plain path.
pub fn uri_to_path(uri: &str) -> PathBuf {
    let encoded = uri.strip_prefix(FILE_URI_SCHEME).unwrap_or(uri);
    PathBuf::from(percent_decode_str(encoded).decode_utf8_lossy().into_owned())
}
