use crate::cue::models::{TrackBoundary, TrackList};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionResult {
    pub seek_to: u64,
    pub old_index: usize,
    pub new_index: usize,
}

/// One displayable line of the track list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRow {
    pub playing: bool,
    pub title: String,
    pub duration: String,
}

/// Follows the track containing the current playback position.
#[derive(Debug, Clone)]
pub struct TrackCursor {
    list: TrackList,
    current_index: usize,
}

impl TrackCursor {
    pub fn from_track_list(list: TrackList) -> Self {
        Self {
            list,
            current_index: 0,
        }
    }

    pub fn track_list(&self) -> &TrackList {
        &self.list
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&TrackBoundary> {
        self.list.tracks().get(self.current_index)
    }

    /// Moves the cursor to the track containing `elapsed_seconds`.
    ///
    /// Interval bounds are inclusive on both ends, so a sample sitting exactly
    /// on a boundary belongs to the lower track. Samples outside every interval
    /// clamp to the first or last track; NaN samples are ignored.
    pub fn advance(&mut self, elapsed_seconds: f64) -> Option<TransitionEvent> {
        if self.list.is_empty() || elapsed_seconds.is_nan() {
            return None;
        }

        if self.contains(self.current_index, elapsed_seconds) {
            return None;
        }

        let found = (0..self.list.track_count()).find(|&i| self.contains(i, elapsed_seconds));
        let to = found.unwrap_or_else(|| self.nearest_index(elapsed_seconds));

        if to == self.current_index {
            return None;
        }

        let from = self.current_index;
        self.current_index = to;

        Some(TransitionEvent { from, to })
    }

    /// Points the cursor at the first track titled `title`.
    pub fn select_by_title(&mut self, title: &str) -> Option<SelectionResult> {
        let new_index = self.list.tracks().iter().position(|t| t.title == title)?;
        let old_index = self.current_index;
        self.current_index = new_index;

        Some(SelectionResult {
            seek_to: self.list.tracks()[new_index].start_offset_seconds,
            old_index,
            new_index,
        })
    }

    /// Length of a real track. `None` for the sentinel or anything past it.
    pub fn duration_of(&self, index: usize) -> Option<u64> {
        if index >= self.list.track_count() {
            return None;
        }

        let start = self.list.start(index)?;
        let next = self.list.start(index + 1)?;
        Some(next.saturating_sub(start))
    }

    pub fn rows(&self) -> Vec<TrackRow> {
        self.list
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| TrackRow {
                playing: i == self.current_index,
                title: track.title.clone(),
                duration: format_duration_hms(self.duration_of(i).unwrap_or_default()),
            })
            .collect()
    }

    fn contains(&self, index: usize, elapsed_seconds: f64) -> bool {
        match (self.list.start(index), self.list.start(index + 1)) {
            (Some(start), Some(next)) => {
                start as f64 <= elapsed_seconds && elapsed_seconds <= next as f64
            }
            _ => false,
        }
    }

    fn nearest_index(&self, elapsed_seconds: f64) -> usize {
        let first = self.list.start(0).unwrap_or_default() as f64;
        if elapsed_seconds < first {
            0
        } else {
            self.list.track_count() - 1
        }
    }
}

/// Formats a duration as `M:SS`, `H:0M:SS` or `H:MM:SS`.
///
/// Minutes are only zero-padded in the hour branch when they are below ten.
pub fn format_duration_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let remainder = total_seconds % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;

    if hours == 0 {
        format!("{minutes}:{seconds:02}")
    } else if minutes < 10 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes}:{seconds:02}")
    }
}
