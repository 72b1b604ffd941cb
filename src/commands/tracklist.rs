use clap::Parser;
use std::path::PathBuf;

/// Prints the track list found in the cue sheet next to an audio file.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ListCommand {
    /// Audio file path or file:// URI, the .cue file must sit next to it
    #[arg(value_name = "AUDIO")]
    pub audio: String,

    /// Total duration of the audio file in seconds
    #[arg(long, short = 'd', value_name = "SECONDS")]
    pub duration: u64,

    /// Print the list as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Prints the track playing at a given position of an audio file.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LocateCommand {
    /// Audio file path or file:// URI, the .cue file must sit next to it
    #[arg(value_name = "AUDIO")]
    pub audio: String,

    /// Total duration of the audio file in seconds
    #[arg(long, short = 'd', value_name = "SECONDS")]
    pub duration: u64,

    /// Playback position in seconds
    #[arg(value_name = "AT", allow_negative_numbers = true)]
    pub at: f64,
}

/// Replays player notifications and follows the playing track.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    long_about = "Replays player notifications and follows the playing track\n\nOne event per line:\n  playing <duration-seconds> <uri> [| <display title>]\n  stopped\n  elapsed <seconds>\n  select <title>\n\nBlank lines and lines starting with # are skipped."
)]
pub struct FollowCommand {
    /// Event script, read from stdin when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}
