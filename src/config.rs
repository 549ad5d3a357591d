// Runtime configuration resolved once at startup from the command line,
// the environment and the user's home directory.

use crate::cli::Cli;
use std::path::{Path, PathBuf};

/// Name of the identifier file kept next to the executable.
pub const ACCOUNTS_FILE_NAME: &str = "known_apple_ids.txt";
/// Folder (under the home directory) used when no destination is entered.
pub const DEFAULT_DEST_DIR: &str = "iCloudPD_Test";
/// Folder (under the home directory) where the downloader stores cookies.
pub const DEFAULT_COOKIE_DIR: &str = ".pyicloud";
/// Subfolder of the destination holding the run history.
pub const LOGS_SUBFOLDER: &str = "icloud_years_logs";
/// Run history file name inside `LOGS_SUBFOLDER`.
pub const HISTORY_FILE_NAME: &str = "run_history.csv";
/// Earliest year accepted at the year prompts.
pub const MIN_YEAR: i32 = 1900;

/// Everything the command builder needs besides the per-run answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderOptions {
    pub program: String,
    pub cookie_dir: PathBuf,
    pub skip_videos: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub downloader: DownloaderOptions,
    pub accounts_file: PathBuf,
    pub home: PathBuf,
    pub default_destination: PathBuf,
}

impl Config {
    /// Build the configuration from parsed flags. Flags left unset fall
    /// back to paths under the home directory (or `.` when there is none).
    pub fn from_cli(cli: &Cli) -> Self {
        let home = home_dir();
        let cookie_dir = cli
            .cookie_directory
            .clone()
            .unwrap_or_else(|| home.join(DEFAULT_COOKIE_DIR));
        let accounts_file = cli
            .accounts_file
            .clone()
            .unwrap_or_else(default_accounts_file);

        Config {
            downloader: DownloaderOptions {
                program: cli.downloader.clone(),
                cookie_dir,
                skip_videos: cli.skip_videos,
            },
            accounts_file,
            default_destination: home.join(DEFAULT_DEST_DIR),
            home,
        }
    }
}

/// Path of the run history file for a given destination directory.
pub fn history_path(destination: &Path) -> PathBuf {
    destination.join(LOGS_SUBFOLDER).join(HISTORY_FILE_NAME)
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_accounts_file() -> PathBuf {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(ACCOUNTS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn explicit_paths_win() {
        let cli = Cli::parse_from([
            "icloud-years",
            "--accounts-file",
            "/tmp/ids.txt",
            "--cookie-directory",
            "/tmp/cookies",
            "--downloader",
            "fake-icloudpd",
        ]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.accounts_file, PathBuf::from("/tmp/ids.txt"));
        assert_eq!(config.downloader.cookie_dir, PathBuf::from("/tmp/cookies"));
        assert_eq!(config.downloader.program, "fake-icloudpd");
        assert!(config.default_destination.ends_with(DEFAULT_DEST_DIR));
    }

    #[test]
    fn history_lives_under_logs_subfolder() {
        assert_eq!(
            history_path(Path::new("/tmp/out")),
            PathBuf::from("/tmp/out/icloud_years_logs/run_history.csv")
        );
    }
}
