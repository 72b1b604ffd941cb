use crate::cue::error::CueError;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueListError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid event on line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },

    #[error("No track list available for {0}: {1}")]
    NoTrackList(String, #[source] CueError),
}

pub type CueListResult<T> = result::Result<T, CueListError>;
