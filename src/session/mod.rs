use crate::cue::load_track_list;
use crate::cue::models::TrackList;
use crate::cursor::{SelectionResult, TrackCursor, TransitionEvent};
use crate::host::events::PlayerEvent;
use crate::host::{HostPlayer, PlayingItem};
use log::{debug, info, warn};

/// Identifies the playing item a notification was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

#[derive(Debug, Clone)]
pub struct ActiveList {
    pub heading: String,
    pub cursor: TrackCursor,
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active(ActiveList),
}

/// What changed after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Activated { heading: String, track_count: usize },
    Deactivated,
    Moved(TransitionEvent),
    Selected(SelectionResult),
}

/// Track list state for the item the player is currently on.
///
/// Every change of playing item replaces the whole state and bumps the
/// generation. Elapsed and selection notifications carry the generation they
/// were issued under and are dropped once it is stale.
#[derive(Debug, Default)]
pub struct CueSession {
    state: SessionState,
    generation: Generation,
}

impl CueSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn cursor(&self) -> Option<&TrackCursor> {
        match &self.state {
            SessionState::Active(active) => Some(&active.cursor),
            SessionState::Idle => None,
        }
    }

    /// Handles a "playing item changed" notification. `None` means nothing is playing.
    pub async fn on_playing_changed(&mut self, item: Option<&PlayingItem>) -> Generation {
        let Some(item) = item else {
            debug!("Nothing playing, dropping track list");
            return self.deactivate();
        };

        // Drop the previous list before touching the file system.
        self.deactivate();

        let audio_path = item.audio_path();
        match load_track_list(&audio_path, item.duration_seconds).await {
            Ok(list) => self.activate(item.heading(), list),
            Err(e) if e.is_no_match() => {
                debug!("No track list for {:?}: {e}", audio_path);
                self.generation
            }
            Err(e) => {
                warn!("Could not read cue sheet for {:?}: {e}", audio_path);
                self.generation
            }
        }
    }

    /// Replaces whatever is shown with `list`, cursor on the first track.
    pub fn activate(&mut self, heading: impl Into<String>, list: TrackList) -> Generation {
        let heading = heading.into();
        info!("Showing {} tracks for {heading}", list.track_count());

        self.generation = Generation(self.generation.0 + 1);
        self.state = SessionState::Active(ActiveList {
            heading,
            cursor: TrackCursor::from_track_list(list),
        });
        self.generation
    }

    pub fn deactivate(&mut self) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.state = SessionState::Idle;
        self.generation
    }

    pub fn on_elapsed(
        &mut self,
        generation: Generation,
        elapsed_seconds: f64,
    ) -> Option<TransitionEvent> {
        let cursor = self.current_cursor(generation)?;
        let transition = cursor.advance(elapsed_seconds)?;

        debug!(
            "Now playing track {} (was {}) at {elapsed_seconds}s",
            transition.to, transition.from
        );
        Some(transition)
    }

    /// Moves the cursor to `title` and asks the host to seek there and play.
    pub fn on_select(
        &mut self,
        generation: Generation,
        title: &str,
        host: &mut impl HostPlayer,
    ) -> Option<SelectionResult> {
        let cursor = self.current_cursor(generation)?;
        let Some(selection) = cursor.select_by_title(title) else {
            debug!("No track titled {title:?}");
            return None;
        };

        host.seek_to(selection.seek_to);
        host.play();

        Some(selection)
    }

    /// Applies one host notification in order, under the current generation.
    pub async fn handle_event(
        &mut self,
        event: PlayerEvent,
        host: &mut impl HostPlayer,
    ) -> Option<SessionUpdate> {
        match event {
            PlayerEvent::Playing(item) => {
                let was_active = self.is_active();
                self.on_playing_changed(Some(&item)).await;

                match &self.state {
                    SessionState::Active(active) => Some(SessionUpdate::Activated {
                        heading: active.heading.clone(),
                        track_count: active.cursor.track_list().track_count(),
                    }),
                    SessionState::Idle if was_active => Some(SessionUpdate::Deactivated),
                    SessionState::Idle => None,
                }
            }
            PlayerEvent::Stopped => {
                let was_active = self.is_active();
                self.on_playing_changed(None).await;
                was_active.then_some(SessionUpdate::Deactivated)
            }
            PlayerEvent::Elapsed(seconds) => self
                .on_elapsed(self.generation, seconds)
                .map(SessionUpdate::Moved),
            PlayerEvent::Select(title) => self
                .on_select(self.generation, &title, host)
                .map(SessionUpdate::Selected),
        }
    }

    fn current_cursor(&mut self, generation: Generation) -> Option<&mut TrackCursor> {
        if generation != self.generation {
            debug!("Ignoring notification for a previous item");
            return None;
        }

        match &mut self.state {
            SessionState::Active(active) => Some(&mut active.cursor),
            SessionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::models::TrackBoundary;

    #[derive(Default)]
    struct RecordingHost {
        commands: Vec<String>,
    }

    impl HostPlayer for RecordingHost {
        fn seek_to(&mut self, seconds: u64) {
            self.commands.push(format!("seek {seconds}"));
        }

        fn play(&mut self) {
            self.commands.push("play".to_string());
        }
    }

    fn album() -> TrackList {
        TrackList::new(
            (0..5)
                .map(|i| TrackBoundary::new(format!("Track {}", i + 1), i * 100))
                .collect(),
            500,
        )
    }

    const CUE: &str = "FILE \"album.flac\" WAVE\n  TRACK 01 AUDIO\n    TITLE \"First\"\n    INDEX 01 00:00:00\n  TRACK 02 AUDIO\n    TITLE \"Second\"\n    INDEX 01 02:00:00\n";

    #[test]
    fn starts_idle() {
        let session = CueSession::new();

        assert!(!session.is_active());
        assert!(session.cursor().is_none());
    }

    #[test]
    fn elapsed_moves_active_cursor() {
        let mut session = CueSession::new();
        let generation = session.activate("Album", album());

        let transition = session.on_elapsed(generation, 350.0);

        assert_eq!(transition, Some(TransitionEvent { from: 0, to: 3 }));
        assert_eq!(session.cursor().unwrap().current_index(), 3);
    }

    #[test]
    fn stale_elapsed_is_ignored() {
        let mut session = CueSession::new();
        let old = session.activate("Album A", album());
        let new = session.activate("Album B", album());

        assert_ne!(old, new);
        assert_eq!(session.on_elapsed(old, 350.0), None);
        assert_eq!(session.cursor().unwrap().current_index(), 0);
    }

    #[test]
    fn replacing_list_resets_index() {
        let mut session = CueSession::new();
        let generation = session.activate("Album A", album());
        session.on_elapsed(generation, 420.0);

        session.activate("Album B", album());

        assert_eq!(session.cursor().unwrap().current_index(), 0);
    }

    #[test]
    fn active_to_idle_makes_elapsed_a_no_op() {
        let mut session = CueSession::new();
        let generation = session.activate("Album", album());
        session.on_elapsed(generation, 350.0);
        assert_eq!(session.cursor().unwrap().current_index(), 3);

        let idle = session.deactivate();

        assert!(!session.is_active());
        assert_eq!(session.on_elapsed(idle, 10.0), None);
        assert_eq!(session.on_elapsed(generation, 10.0), None);
        assert!(session.cursor().is_none());
    }

    #[test]
    fn select_seeks_and_plays() {
        let mut session = CueSession::new();
        let generation = session.activate("Album", album());
        let mut host = RecordingHost::default();

        let selection = session.on_select(generation, "Track 3", &mut host).unwrap();

        assert_eq!(selection.seek_to, 200);
        assert_eq!(selection.new_index, 2);
        assert_eq!(host.commands, vec!["seek 200", "play"]);
    }

    #[test]
    fn unknown_selection_sends_nothing() {
        let mut session = CueSession::new();
        let generation = session.activate("Album", album());
        let mut host = RecordingHost::default();

        assert_eq!(session.on_select(generation, "Bonus", &mut host), None);
        assert!(host.commands.is_empty());
        assert_eq!(session.cursor().unwrap().current_index(), 0);
    }

    #[tokio::test]
    async fn playing_item_with_cue_sheet_activates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("album.cue"), CUE).unwrap();
        let item = PlayingItem::new(dir.path().join("album.flac").to_string_lossy(), 300)
            .with_display_title("album.flac");

        let mut session = CueSession::new();
        let generation = session.on_playing_changed(Some(&item)).await;

        let SessionState::Active(active) = session.state() else {
            panic!("expected an active track list");
        };
        assert_eq!(active.heading, "album");
        assert_eq!(active.cursor.track_list().track_count(), 2);
        assert_eq!(active.cursor.duration_of(1), Some(180));
        assert_eq!(
            session.on_elapsed(generation, 130.0),
            Some(TransitionEvent { from: 0, to: 1 })
        );
    }

    #[tokio::test]
    async fn malformed_cue_sheet_goes_idle_without_host_commands() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("broken.cue"),
            CUE.replace("album.flac", "broken.flac")
                .replace("INDEX 01 02:00:00", "INDEX 01 0x:00:00"),
        )
        .unwrap();
        let broken = PlayingItem::new(dir.path().join("broken.flac").to_string_lossy(), 300);
        let mut host = RecordingHost::default();

        let mut session = CueSession::new();
        let old = session.activate("Album", album());
        session.on_elapsed(old, 350.0);

        let generation = session.on_playing_changed(Some(&broken)).await;

        assert!(!session.is_active());
        assert!(session.cursor().is_none());
        assert_eq!(session.on_elapsed(generation, 130.0), None);
        assert_eq!(session.on_select(generation, "First", &mut host), None);
        assert_eq!(session.on_select(old, "Track 2", &mut host), None);
        assert!(host.commands.is_empty());
    }

    #[tokio::test]
    async fn track_change_without_cue_sheet_goes_idle() {
        let dir = tempfile::tempdir().unwrap();
        let lonely = PlayingItem::new(dir.path().join("single.flac").to_string_lossy(), 200);

        let mut session = CueSession::new();
        let old = session.activate("Album", album());
        session.on_elapsed(old, 350.0);

        let generation = session.on_playing_changed(Some(&lonely)).await;

        assert!(!session.is_active());
        assert_eq!(session.on_elapsed(generation, 30.0), None);
        assert_eq!(session.on_elapsed(old, 30.0), None);
    }

    #[tokio::test]
    async fn handle_event_reports_updates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("album.cue"), CUE).unwrap();
        let uri = format!("file://{}", dir.path().join("album.flac").display());
        let mut host = RecordingHost::default();
        let mut session = CueSession::new();

        let update = session
            .handle_event(PlayerEvent::Playing(PlayingItem::new(uri, 300)), &mut host)
            .await;
        assert_eq!(
            update,
            Some(SessionUpdate::Activated {
                heading: "album".to_string(),
                track_count: 2
            })
        );

        assert_eq!(session.handle_event(PlayerEvent::Elapsed(60.0), &mut host).await, None);
        assert_eq!(
            session.handle_event(PlayerEvent::Elapsed(150.0), &mut host).await,
            Some(SessionUpdate::Moved(TransitionEvent { from: 0, to: 1 }))
        );
        assert!(matches!(
            session
                .handle_event(PlayerEvent::Select("First".to_string()), &mut host)
                .await,
            Some(SessionUpdate::Selected(SelectionResult { seek_to: 0, .. }))
        ));
        assert_eq!(
            session.handle_event(PlayerEvent::Stopped, &mut host).await,
            Some(SessionUpdate::Deactivated)
        );
        assert_eq!(session.handle_event(PlayerEvent::Stopped, &mut host).await, None);
        assert_eq!(host.commands, vec!["seek 0", "play"]);
    }
}
