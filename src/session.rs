// Session: runs the downloader for the collected parameters, tells the
// user how it went and appends the run history row.

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::style::Stylize;
use std::fs;
use std::io;
use std::process::{ExitCode, ExitStatus};
use tracing::{info, warn};

use crate::command::{self, InvocationParameters};
use crate::config::DownloaderOptions;
use crate::history::{HistoryEntry, Outcome, RunHistory};
use crate::runner;

/// Exit code used when the downloader could not be started.
pub const LAUNCH_FAILURE_CODE: u8 = 127;

/// Result of one downloader invocation, as seen by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Code this tool should exit with.
    pub code: u8,
}

impl RunReport {
    pub fn from_status(result: &io::Result<ExitStatus>) -> Self {
        match result {
            Ok(status) if status.success() => RunReport {
                outcome: Outcome::Success,
                code: 0,
            },
            Ok(status) => RunReport {
                outcome: Outcome::Failure,
                code: status
                    .code()
                    .and_then(|c| u8::try_from(c).ok())
                    .filter(|c| *c != 0)
                    .unwrap_or(1),
            },
            Err(_) => RunReport {
                outcome: Outcome::Failure,
                code: LAUNCH_FAILURE_CODE,
            },
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code)
    }
}

/// Download the requested years and record the run.
pub fn execute(options: &DownloaderOptions, params: &InvocationParameters) -> Result<RunReport> {
    fs::create_dir_all(&params.destination)
        .with_context(|| format!("Failed to create {}", params.destination.display()))?;

    let invocation = command::download(options, params);
    let (start, end) = (params.years.start(), params.years.end());
    if params.dry_run {
        println!(
            "\nStarting DRY RUN for years {}-{}. {} will list files but not download them.",
            start, end, options.program
        );
    } else {
        println!(
            "\nStarting LIVE DOWNLOAD for years {}-{}. This may take a long time...",
            start, end
        );
    }
    println!("Command: {}", invocation.display());

    let timestamp = Local::now();
    let result = runner::run(&invocation);
    let report = RunReport::from_status(&result);
    describe(&options.program, &result);

    let entry = HistoryEntry {
        timestamp,
        account: params.account.clone(),
        start_year: start,
        end_year: end,
        dry_run: params.dry_run,
        outcome: report.outcome,
    };
    let history = RunHistory::for_destination(&params.destination);
    match history.append(&entry) {
        Ok(()) => println!("Wrote run log to {}", history.path().display()),
        Err(e) => warn!("could not write run history: {:#}", e),
    }

    info!(outcome = ?report.outcome, code = report.code, "run finished");
    Ok(report)
}

/// Run the downloader's auth-only mode so the account's session cookies
/// exist before the first download. Failures are reported, never fatal.
pub fn authenticate(options: &DownloaderOptions, account: &str) -> RunReport {
    let invocation = command::auth_only(options, account);
    println!(
        "\nRunning auth-only for user: {}. Complete 2FA when prompted...",
        account
    );
    let result = runner::run(&invocation);
    describe(&options.program, &result);
    RunReport::from_status(&result)
}

fn describe(program: &str, result: &io::Result<ExitStatus>) {
    match result {
        Ok(status) if status.success() => println!(
            "\n{}",
            format!("Process completed successfully ({} returned 0).", program).green()
        ),
        Ok(status) => match status.code() {
            Some(code) => println!(
                "\n{}",
                format!(
                    "{} exited with code {}. Please check the output above for errors.",
                    program, code
                )
                .red()
            ),
            None => println!("\n{}", format!("{} was terminated by a signal.", program).red()),
        },
        Err(e) => warn!("could not launch {}: {} (is it installed and on PATH?)", program, e),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    fn exited(code: i32) -> io::Result<ExitStatus> {
        Ok(ExitStatus::from_raw(code << 8))
    }

    #[test]
    fn success_maps_to_zero() {
        let report = RunReport::from_status(&exited(0));
        assert_eq!(report, RunReport { outcome: Outcome::Success, code: 0 });
    }

    #[test]
    fn failure_code_is_mirrored() {
        assert_eq!(RunReport::from_status(&exited(1)).code, 1);
        assert_eq!(RunReport::from_status(&exited(42)).code, 42);
        assert_eq!(RunReport::from_status(&exited(42)).outcome, Outcome::Failure);
    }

    #[test]
    fn signal_is_generic_failure() {
        // Raw status 9 means killed by SIGKILL, no exit code.
        let report = RunReport::from_status(&Ok(ExitStatus::from_raw(9)));
        assert_eq!(report, RunReport { outcome: Outcome::Failure, code: 1 });
    }

    #[test]
    fn launch_error_is_127() {
        let err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let report = RunReport::from_status(&Err(err));
        assert_eq!(report.code, LAUNCH_FAILURE_CODE);
        assert_eq!(report.outcome, Outcome::Failure);
    }
}
