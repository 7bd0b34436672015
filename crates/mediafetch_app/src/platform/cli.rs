use std::path::PathBuf;

use clap::Parser;

/// Mediafetch - look up, search and save online media through a local backend
#[derive(Parser, Debug, Default)]
#[command(
    name = "mediafetch",
    version,
    about = "Terminal front-end for a media download backend",
    long_about = "Type a URL to look it up or any other text to search.
Type /help at the prompt for the list of commands."
)]
pub struct Cli {
    /// Configuration file path (defaults to ./mediafetch.ron when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Directory MP3 files are saved into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log destination: file, terminal or both
    #[arg(long, value_name = "DEST")]
    pub log: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
