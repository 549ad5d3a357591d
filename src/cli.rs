// Command-line flags. The tool is always interactive: these flags only
// tune where things live and which downloader gets invoked.

use clap::Parser;
use std::path::PathBuf;

/// Download a range of years from iCloud Photos through icloudpd.
#[derive(Parser, Debug, Clone)]
#[command(name = "icloud-years", version, about, long_about = None)]
pub struct Cli {
    /// Only run the downloader's authentication step for an account, then exit
    #[arg(long)]
    pub auth_only: bool,

    /// Pass --skip-videos to the downloader
    #[arg(long)]
    pub skip_videos: bool,

    /// Downloader program to invoke
    #[arg(long, value_name = "PROG", env = "ICLOUD_YEARS_DOWNLOADER", default_value = "icloudpd")]
    pub downloader: String,

    /// File holding known Apple IDs (default: next to the executable)
    #[arg(long, value_name = "FILE", env = "ICLOUD_YEARS_ACCOUNTS")]
    pub accounts_file: Option<PathBuf>,

    /// Directory where the downloader keeps its session cookies
    #[arg(long, value_name = "DIR", env = "ICLOUD_YEARS_COOKIE_DIR")]
    pub cookie_directory: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
