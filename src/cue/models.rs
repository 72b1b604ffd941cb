use serde::Serialize;

/// Title carried by the trailing sentinel boundary. Never displayed.
pub const SENTINEL_TITLE: &str = "NULL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackBoundary {
    pub title: String,
    pub start_offset_seconds: u64,
}

impl TrackBoundary {
    pub fn new(title: impl Into<String>, start_offset_seconds: u64) -> Self {
        Self {
            title: title.into(),
            start_offset_seconds,
        }
    }
}

/// Tracks of one audio image in sheet order, closed by a sentinel boundary
/// placed at the total duration of the audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackList {
    boundaries: Vec<TrackBoundary>,
}

impl TrackList {
    pub fn new(tracks: Vec<TrackBoundary>, total_duration_seconds: u64) -> Self {
        let mut boundaries = tracks;
        boundaries.push(TrackBoundary::new(SENTINEL_TITLE, total_duration_seconds));

        Self { boundaries }
    }

    /// Real tracks, sentinel excluded.
    pub fn tracks(&self) -> &[TrackBoundary] {
        &self.boundaries[..self.boundaries.len() - 1]
    }

    pub fn track_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.track_count() == 0
    }

    pub fn start(&self, index: usize) -> Option<u64> {
        self.boundaries.get(index).map(|b| b.start_offset_seconds)
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.boundaries[self.boundaries.len() - 1].start_offset_seconds
    }
}
