// End-to-end runs of a session against stand-in downloaders.
#![cfg(unix)]

use std::path::PathBuf;
use tempfile::TempDir;

use icloud_years::command::{InvocationParameters, YearRange};
use icloud_years::config::DownloaderOptions;
use icloud_years::history::{Outcome, RunHistory};
use icloud_years::session::{self, LAUNCH_FAILURE_CODE};

fn options(program: &str) -> DownloaderOptions {
    DownloaderOptions {
        program: program.into(),
        cookie_dir: PathBuf::from("/tmp/cookies"),
        skip_videos: false,
    }
}

fn params(destination: PathBuf, dry_run: bool) -> InvocationParameters {
    InvocationParameters {
        account: "a@example.com".into(),
        destination,
        dry_run,
        years: YearRange::new(2005, 2007).unwrap(),
    }
}

#[test]
fn failed_download_is_logged_and_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let params = params(dir.path().join("out"), true);

    let report = session::execute(&options("false"), &params).unwrap();
    assert_eq!(report.outcome, Outcome::Failure);
    assert_ne!(report.code, 0);

    let entries = RunHistory::for_destination(&params.destination).entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, Outcome::Failure);
    assert_eq!(entries[0].account, "a@example.com");
    assert_eq!((entries[0].start_year, entries[0].end_year), (2005, 2007));
    assert!(entries[0].dry_run);
}

#[test]
fn successful_download_appends_to_history() {
    let dir = TempDir::new().unwrap();
    let params = params(dir.path().to_path_buf(), false);

    session::execute(&options("true"), &params).unwrap();
    let report = session::execute(&options("true"), &params).unwrap();
    assert_eq!(report.outcome, Outcome::Success);
    assert_eq!(report.code, 0);

    let entries = RunHistory::for_destination(&params.destination).entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.outcome == Outcome::Success && !e.dry_run));
}

#[test]
fn missing_downloader_is_recorded_as_failure() {
    let dir = TempDir::new().unwrap();
    let params = params(dir.path().to_path_buf(), true);

    let report = session::execute(&options("no-such-downloader-here"), &params).unwrap();
    assert_eq!(report.code, LAUNCH_FAILURE_CODE);

    let entries = RunHistory::for_destination(&params.destination).entries().unwrap();
    assert_eq!(entries[0].outcome, Outcome::Failure);
}

#[test]
fn auth_only_reports_downloader_status() {
    assert_eq!(session::authenticate(&options("true"), "a@example.com").outcome, Outcome::Success);
    assert_eq!(session::authenticate(&options("false"), "a@example.com").code, 1);
}
