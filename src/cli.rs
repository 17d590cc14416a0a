use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::video::VideoId;

#[derive(Parser, Debug)]
#[command(
    name = "ytchapters",
    version,
    about = "Generate timestamped chapter titles for YouTube videos from their captions"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the transcript and ask the model for chapters (default)
    Run {
        /// Video id or YouTube URL
        #[arg(env = "YTCHAPTERS_VIDEO_ID")]
        video: VideoId,
    },

    /// Fetch (or read from cache) the transcript and print it
    Transcript {
        /// Video id or YouTube URL
        video: VideoId,
    },

    /// Show cached transcript and completion counts
    Status,

    /// Write a commented default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Where to write it (defaults to the platform config directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}
