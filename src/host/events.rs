use crate::error::{CueListError, CueListResult};
use crate::host::PlayingItem;

/// Notifications delivered by the media player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// A new item started playing.
    Playing(PlayingItem),
    /// Nothing is playing any more.
    Stopped,
    /// Periodic playback position, in seconds.
    Elapsed(f64),
    /// The user picked a track from the list.
    Select(String),
}

const TITLE_SEPARATOR: &str = " | ";

/// Parses one line of an event script.
///
/// ```text
/// playing <duration-seconds> <uri> [| <display title>]
/// stopped
/// elapsed <seconds>
/// select <title>
/// ```
///
/// Blank lines and lines starting with `#` yield `None`.
pub fn parse_event(line_number: usize, line: &str) -> CueListResult<Option<PlayerEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let invalid = |reason: &str| CueListError::InvalidEvent {
        line: line_number,
        reason: reason.to_string(),
    };

    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match keyword {
        "playing" => {
            let (duration, target) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| invalid("expected a duration and a uri"))?;
            let duration_seconds = duration
                .parse::<u64>()
                .map_err(|_| invalid("duration must be whole seconds"))?;

            let target = target.trim();
            let item = match target.split_once(TITLE_SEPARATOR) {
                Some((uri, title)) => {
                    PlayingItem::new(uri.trim(), duration_seconds).with_display_title(title.trim())
                }
                None => PlayingItem::new(target, duration_seconds),
            };

            PlayerEvent::Playing(item)
        }
        "stopped" => PlayerEvent::Stopped,
        "elapsed" => {
            let seconds = rest
                .parse::<f64>()
                .map_err(|_| invalid("elapsed time must be a number"))?;
            PlayerEvent::Elapsed(seconds)
        }
        "select" => {
            if rest.is_empty() {
                return Err(invalid("expected a track title"));
            }
            PlayerEvent::Select(rest.to_string())
        }
        other => return Err(invalid(&format!("unknown event {other:?}"))),
    };

    Ok(Some(event))
}
