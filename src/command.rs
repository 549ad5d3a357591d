// Command builder: turns the answers collected by the UI into the exact
// argument list handed to the downloader. Everything here is pure.

use chrono::NaiveDate;
use std::path::PathBuf;
use std::process::Command;

use crate::config::DownloaderOptions;
use crate::errors::ValidationError;

/// Output layout handed to `--folder-structure` (e.g. `2024/06-Jun`).
pub const FOLDER_STRUCTURE: &str = "{:%Y/%m-%b}";

/// Inclusive range of calendar years, always `start <= end`.
///
/// The downloader gets `[start-01-01, (end+1)-01-01)`, so the last day
/// included is December 31 of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
    created_after: NaiveDate,
    created_before: NaiveDate,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
        let created_after =
            NaiveDate::from_ymd_opt(start, 1, 1).ok_or(ValidationError::YearUnsupported(start))?;
        let created_before = end
            .checked_add(1)
            .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
            .ok_or(ValidationError::YearUnsupported(end))?;
        Ok(YearRange {
            start,
            end,
            created_after,
            created_before,
        })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Inclusive lower bound: January 1 of the start year.
    pub fn created_after(&self) -> NaiveDate {
        self.created_after
    }

    /// Exclusive upper bound: January 1 of the year after the end year.
    pub fn created_before(&self) -> NaiveDate {
        self.created_before
    }
}

/// Answers collected for one run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationParameters {
    pub account: String,
    pub destination: PathBuf,
    pub dry_run: bool,
    pub years: YearRange,
}

/// A program plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Human readable command line; arguments with spaces are double quoted.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| {
                if part.contains(' ') {
                    format!("\"{}\"", part)
                } else {
                    part.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Build the download invocation for one run.
pub fn download(options: &DownloaderOptions, params: &InvocationParameters) -> Invocation {
    let mut args = vec![
        "--directory".to_string(),
        params.destination.display().to_string(),
        "--username".to_string(),
        params.account.clone(),
        "--size".to_string(),
        "original".to_string(),
        "--folder-structure".to_string(),
        FOLDER_STRUCTURE.to_string(),
        "--created-after".to_string(),
        params.years.created_after().format("%Y-%m-%d").to_string(),
        "--created-before".to_string(),
        params.years.created_before().format("%Y-%m-%d").to_string(),
        "--set-exif-datetime".to_string(),
        "--cookie-directory".to_string(),
        options.cookie_dir.display().to_string(),
    ];
    if options.skip_videos {
        args.push("--skip-videos".to_string());
    }
    if params.dry_run {
        args.push("--dry-run".to_string());
    }
    Invocation {
        program: options.program.clone(),
        args,
    }
}

/// Build the auth-only invocation used to prime a new account's session.
pub fn auth_only(options: &DownloaderOptions, account: &str) -> Invocation {
    Invocation {
        program: options.program.clone(),
        args: vec![
            "--auth-only".to_string(),
            "--username".to_string(),
            account.to_string(),
            "--cookie-directory".to_string(),
            options.cookie_dir.display().to_string(),
        ],
    }
}
