use crate::commands::{Cli, Commands};
use crate::tracklist::{follow_events, list_tracks, locate_track};
use anyhow::Result;
use clap::Parser;

mod commands;
mod cue;
mod cursor;
mod error;
mod host;
mod session;
mod tracklist;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::List(cmd) => list_tracks(cmd).await?,
        Commands::Locate(cmd) => locate_track(cmd).await?,
        Commands::Follow(cmd) => follow_events(cmd).await?,
    }

    Ok(())
}
