use crate::cue::error::{CueError, CueResult};
use crate::cue::models::{TrackBoundary, TrackList};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub mod error;
pub mod models;

pub const CUE_EXTENSION: &str = "cue";

lazy_static! {
    static ref FILE_PATTERN: Regex = Regex::new(r#"FILE "(.+)" WAVE"#).unwrap();
    static ref TRACK_PATTERN: Regex =
        Regex::new(r#"TRACK \d+ AUDIO\r?\n\s+TITLE "([^"]+)""#).unwrap();
    static ref INDEX_PATTERN: Regex = Regex::new(r"INDEX 01 (\S+)").unwrap();
}

/// Parses cue sheets describing a single audio image.
///
/// Only four directives are looked at: the `FILE "..." WAVE` header, which must
/// name the audio file the sheet sits next to, `TRACK n AUDIO` followed by its
/// `TITLE`, and `INDEX 01 MM:SS:FF`. Titles and indices are paired in document
/// order; when their counts differ the extra entries are dropped.
pub struct CueSheetParser {
    audio_stem: String,
}

impl CueSheetParser {
    /// `audio_stem` is the audio file name without directory and extension.
    pub fn new(audio_stem: impl Into<String>) -> Self {
        Self {
            audio_stem: audio_stem.into(),
        }
    }

    pub fn parse(&self, cue_text: &str, total_duration_seconds: u64) -> CueResult<TrackList> {
        let tracks = self.parse_tracks(cue_text)?;
        Ok(TrackList::new(tracks, total_duration_seconds))
    }

    /// Track boundaries in sheet order, without the trailing sentinel.
    pub fn parse_tracks(&self, cue_text: &str) -> CueResult<Vec<TrackBoundary>> {
        self.check_file_declaration(cue_text)?;

        let titles = TRACK_PATTERN
            .captures_iter(cue_text)
            .map(|caps| caps[1].trim().to_string());
        let offsets = INDEX_PATTERN
            .captures_iter(cue_text)
            .map(|caps| self.parse_msf(&caps[1]));

        let mut tracks = Vec::new();
        for (title, offset) in titles.zip(offsets) {
            tracks.push(TrackBoundary::new(title, offset?));
        }

        if tracks.is_empty() {
            return Err(CueError::NoTrackListed);
        }

        debug!("Parsed {} tracks for {:?}", tracks.len(), self.audio_stem);
        Ok(tracks)
    }

    fn check_file_declaration(&self, cue_text: &str) -> CueResult<()> {
        let declared: Vec<&str> = FILE_PATTERN
            .captures_iter(cue_text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        if declared.len() != 1 {
            return Err(CueError::FileCount(declared.len()));
        }

        let declared = declared[0];
        let declared_stem = declared
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(declared);

        if declared_stem != self.audio_stem {
            return Err(CueError::FileMismatch {
                declared: declared.to_string(),
                expected: self.audio_stem.clone(),
            });
        }

        Ok(())
    }

    /// Converts `MM:SS:FF` to whole seconds. Frames must be numeric but are dropped.
    fn parse_msf(&self, msf_str: &str) -> CueResult<u64> {
        let malformed = || CueError::MalformedIndex(msf_str.to_string());

        let parts: Vec<&str> = msf_str.split(':').collect();
        if parts.len() != 3 {
            return Err(malformed());
        }

        let minutes: u64 = parts[0].parse().map_err(|_| malformed())?;
        let seconds: u64 = parts[1].parse().map_err(|_| malformed())?;
        let _frames: u64 = parts[2].parse().map_err(|_| malformed())?;

        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(malformed)
    }
}

/// The cue sheet sits next to the audio file and shares its name.
pub fn cue_path_for(audio_path: impl AsRef<Path>) -> PathBuf {
    audio_path.as_ref().with_extension(CUE_EXTENSION)
}

/// Reads the cue sheet belonging to `audio_path` and parses it.
pub async fn load_track_list(
    audio_path: impl AsRef<Path>,
    total_duration_seconds: u64,
) -> CueResult<TrackList> {
    let audio_path = audio_path.as_ref();
    let cue_path = cue_path_for(audio_path);

    debug!("Looking for cue sheet: {:?}", cue_path);
    let data = match tokio::fs::read(&cue_path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(CueError::NoCueFile(cue_path)),
        Err(e) => return Err(e.into()),
    };
    let cue_text = String::from_utf8(data)?;

    let audio_stem = audio_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    CueSheetParser::new(audio_stem).parse(&cue_text, total_duration_seconds)
}
