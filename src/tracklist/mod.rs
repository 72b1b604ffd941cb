use crate::commands::tracklist::{FollowCommand, ListCommand, LocateCommand};
use crate::cue::load_track_list;
use crate::cue::models::TrackList;
use crate::cursor::{TrackCursor, TrackRow, format_duration_hms};
use crate::error::{CueListError, CueListResult};
use crate::host::events::parse_event;
use crate::host::{HostPlayer, PlayingItem};
use crate::session::{CueSession, SessionState, SessionUpdate};
use log::{debug, info};
use serde::Serialize;
use std::fmt::Display;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const PLAYING_MARK: &str = "▶";

#[derive(Debug, PartialEq, Serialize)]
struct ListOutput {
    heading: String,
    total_duration: String,
    tracks: Vec<TrackRow>,
}

#[derive(Debug, PartialEq)]
struct LocatedTrack {
    number: usize,
    title: String,
    start_offset_seconds: u64,
    duration_seconds: u64,
}

impl Display for LocatedTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {} (starts at {}, {})",
            self.number,
            self.title,
            format_duration_hms(self.start_offset_seconds),
            format_duration_hms(self.duration_seconds)
        )
    }
}

/// Stands in for the media player, echoing the commands it receives.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    pub position: Option<u64>,
    pub plays: usize,
}

impl HostPlayer for ConsoleHost {
    fn seek_to(&mut self, seconds: u64) {
        println!("seek {}", format_duration_hms(seconds));
        self.position = Some(seconds);
    }

    fn play(&mut self) {
        println!("play");
        self.plays += 1;
    }
}

pub async fn list_tracks(cmd: ListCommand) -> CueListResult<()> {
    let item = PlayingItem::new(cmd.audio, cmd.duration);
    let cursor = TrackCursor::from_track_list(load_for(&item).await?);
    let output = list_output(item.heading(), &cursor);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.heading);
        print_rows(&output.tracks);
    }

    Ok(())
}

pub async fn locate_track(cmd: LocateCommand) -> CueListResult<()> {
    let item = PlayingItem::new(cmd.audio, cmd.duration);
    let mut cursor = TrackCursor::from_track_list(load_for(&item).await?);

    if let Some(track) = locate(&mut cursor, cmd.at) {
        println!("{track}");
    }

    Ok(())
}

pub async fn follow_events(cmd: FollowCommand) -> CueListResult<()> {
    let mut session = CueSession::new();
    let mut host = ConsoleHost::default();

    let updates = match cmd.script {
        Some(path) => {
            debug!("Replaying events from {:?}", path);
            let file = tokio::fs::File::open(&path).await?;
            replay(BufReader::new(file), &mut session, &mut host).await?
        }
        None => replay(BufReader::new(tokio::io::stdin()), &mut session, &mut host).await?,
    };

    info!("Replayed events, {} track list updates", updates.len());
    Ok(())
}

/// Feeds every event of `reader` to `session` in order, printing each update.
pub async fn replay<R>(
    reader: R,
    session: &mut CueSession,
    host: &mut impl HostPlayer,
) -> CueListResult<Vec<SessionUpdate>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut updates = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let Some(event) = parse_event(line_number, &line)? else {
            continue;
        };

        if let Some(update) = session.handle_event(event, &mut *host).await {
            print_update(&update, session);
            updates.push(update);
        }
    }

    Ok(updates)
}

fn list_output(heading: String, cursor: &TrackCursor) -> ListOutput {
    ListOutput {
        heading,
        total_duration: format_duration_hms(cursor.track_list().total_duration_seconds()),
        tracks: cursor.rows(),
    }
}

fn locate(cursor: &mut TrackCursor, at: f64) -> Option<LocatedTrack> {
    cursor.advance(at);

    let index = cursor.current_index();
    let track = cursor.current()?;
    Some(LocatedTrack {
        number: index + 1,
        title: track.title.clone(),
        start_offset_seconds: track.start_offset_seconds,
        duration_seconds: cursor.duration_of(index).unwrap_or_default(),
    })
}

async fn load_for(item: &PlayingItem) -> CueListResult<TrackList> {
    let audio_path = item.audio_path();
    load_track_list(&audio_path, item.duration_seconds)
        .await
        .map_err(|e| {
            debug!("Loading track list failed: {e}");
            CueListError::NoTrackList(audio_path.display().to_string(), e)
        })
}

fn print_update(update: &SessionUpdate, session: &CueSession) {
    match update {
        SessionUpdate::Activated {
            heading,
            track_count,
        } => {
            println!("{heading} ({track_count} tracks)");
            if let SessionState::Active(active) = session.state() {
                print_rows(&active.cursor.rows());
            }
        }
        SessionUpdate::Deactivated => println!("(no track list)"),
        SessionUpdate::Moved(transition) => {
            if let Some(track) = session.cursor().and_then(|c| c.current()) {
                println!("{PLAYING_MARK} {}. {}", transition.to + 1, track.title);
            }
        }
        SessionUpdate::Selected(selection) => {
            if let Some(track) = session.cursor().and_then(|c| c.current()) {
                println!("{PLAYING_MARK} {}. {}", selection.new_index + 1, track.title);
            }
        }
    }
}

fn print_rows(rows: &[TrackRow]) {
    let title_width = rows
        .iter()
        .map(|row| row.title.chars().count())
        .max()
        .unwrap_or_default();
    let duration_width = rows
        .iter()
        .map(|row| row.duration.len())
        .max()
        .unwrap_or_default();

    for row in rows {
        let mark = if row.playing { PLAYING_MARK } else { " " };
        println!(
            "{mark} {:<title_width$}  {:>duration_width$}",
            row.title, row.duration
        );
    }
}
