use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No cue sheet found at {0:?}")]
    NoCueFile(PathBuf),

    #[error("Cue sheet must reference exactly one audio file, found {0}")]
    FileCount(usize),

    #[error("Cue sheet references {declared:?}, expected a file named {expected:?}")]
    FileMismatch { declared: String, expected: String },

    #[error("Invalid INDEX 01 position: {0}")]
    MalformedIndex(String),

    #[error("Cue sheet does not list any track")]
    NoTrackListed,

    #[error("Cue sheet is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

impl CueError {
    /// Outcomes meaning "there is simply no track list for this item".
    pub fn is_no_match(&self) -> bool {
        matches!(
            self,
            CueError::NoCueFile(_)
                | CueError::FileCount(_)
                | CueError::FileMismatch { .. }
                | CueError::NoTrackListed
        )
    }
}

pub type CueResult<T> = Result<T, CueError>;
