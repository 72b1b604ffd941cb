use crate::commands::tracklist::{FollowCommand, ListCommand, LocateCommand};
use clap::{Parser, Subcommand};

pub mod tracklist;

/// CLI for browsing and following the tracks of single-file album images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    List(ListCommand),
    Locate(LocateCommand),
    Follow(FollowCommand),
}
