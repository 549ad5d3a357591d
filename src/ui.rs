// UI layer: the linear sequence of questions asked on every run, built on
// `dialoguer`. Every free-text prompt goes through `prompt`, which keeps
// asking until the matching parse function accepts the answer. The parse
// functions themselves are pure so they can be tested without a terminal.

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::accounts::{choice_for, menu_items, validate_account, AccountChoice, AccountStore};
use crate::command::{InvocationParameters, YearRange};
use crate::config::{Config, DownloaderOptions, MIN_YEAR};
use crate::errors::ValidationError;
use crate::session;

/// Ask every question for one run and return the collected parameters.
pub fn collect_parameters(config: &Config, store: &AccountStore) -> Result<InvocationParameters> {
    let account = select_or_add(store, &config.downloader)?;

    let default_dest = config.default_destination.clone();
    let home = config.home.clone();
    let destination = prompt(
        &format!("Enter destination directory (Default: {})", default_dest.display()),
        |input| check_destination(resolve_destination(input, &default_dest, &home)),
    )?;
    let destination = absolutize(destination)?;

    println!("\nUsing Apple ID: {}", account);
    println!("Using Cookie Dir: {}", config.downloader.cookie_dir.display());
    println!("Using Destination: {}\n", destination.display());

    let dry_run = prompt(
        &format!("Perform a dry run ({} --dry-run)? (Y/n)", config.downloader.program),
        |input| parse_yes_no(input, true),
    )?;
    println!(
        "Running in {} mode.",
        if dry_run { "DRY RUN" } else { "LIVE DOWNLOAD" }
    );

    println!("\n--- Download Range Selection ---");
    let years = prompt_years(Local::now().year())?;

    Ok(InvocationParameters {
        account,
        destination,
        dry_run,
        years,
    })
}

/// Pick a known Apple ID or enter a new one. A new ID may be primed with
/// the downloader's auth-only mode and is then added to the store.
pub fn select_or_add(store: &AccountStore, options: &DownloaderOptions) -> Result<String> {
    let (account, is_new) = choose_account(store)?;
    if is_new {
        let prime = prompt(
            &format!(
                "New Apple ID '{}'. Run {} --auth-only now? (Y/n)",
                account, options.program
            ),
            |input| parse_yes_no(input, true),
        )?;
        if prime {
            session::authenticate(options, &account);
        }
        remember(store, &account);
    }
    Ok(account)
}

/// Show the account menu and return the chosen ID and whether it is new.
pub fn choose_account(store: &AccountStore) -> Result<(String, bool)> {
    let known = store.load();
    println!("\n--- Apple ID Selection ---");

    let choice = if known.is_empty() {
        AccountChoice::New
    } else {
        let items = menu_items(&known);
        let selection = Select::new()
            .with_prompt("Select a known Apple ID or enter a new one")
            .items(&items)
            .default(0)
            .interact()?;
        choice_for(&known, selection)
    };

    match choice {
        AccountChoice::Known(account) => Ok((account, false)),
        AccountChoice::New => {
            let account = prompt("Enter your Apple ID email (e.g. name@icloud.com)", validate_account)?;
            let is_new = !known.contains(&account);
            Ok((account, is_new))
        }
    }
}

/// Add `account` to the store. Failures are logged and otherwise ignored.
pub fn remember(store: &AccountStore, account: &str) {
    match store.persist(account) {
        Ok(true) => println!("Added '{}' to the list of known Apple IDs.", account),
        Ok(false) => {}
        Err(e) => warn!(
            path = %store.path().display(),
            "could not save Apple ID: {:#}", e
        ),
    }
}

fn prompt_years(this_year: i32) -> Result<YearRange> {
    let max = this_year + 1;
    let start = prompt(
        &format!("Enter START year (Default: {})", this_year),
        |input| parse_year(input, this_year, max),
    )?;
    let end = prompt(&format!("Enter END year (Default: {})", start), |input| {
        parse_end_year(input, start, max)
    })?;
    Ok(YearRange::new(start, end)?)
}

/// Read one line, re-asking until `parse` accepts it.
fn prompt<T>(question: &str, parse: impl Fn(&str) -> Result<T, ValidationError>) -> Result<T> {
    let answer: String = Input::new()
        .with_prompt(question)
        .allow_empty(true)
        .validate_with(|input: &String| parse(input.as_str()).map(|_| ()))
        .interact_text()?;
    Ok(parse(answer.as_str())?)
}

/// Empty input means the default; a leading `~` is the home directory.
pub fn resolve_destination(input: &str, default: &Path, home: &Path) -> PathBuf {
    let input = input.trim();
    if input.is_empty() {
        return default.to_path_buf();
    }
    if input == "~" {
        return home.to_path_buf();
    }
    match input.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(input),
    }
}

/// Reject a destination that could never be created as a directory, i.e.
/// when it or its nearest existing ancestor is not a directory.
pub fn check_destination(path: PathBuf) -> Result<PathBuf, ValidationError> {
    match path.ancestors().find(|p| p.exists()) {
        Some(existing) if !existing.is_dir() => {
            Err(ValidationError::NotADirectory(existing.display().to_string()))
        }
        _ => Ok(path),
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    Ok(cwd.join(path))
}

/// Case-insensitive y/yes/n/no; empty input takes `default`.
pub fn parse_yes_no(input: &str, default: bool) -> Result<bool, ValidationError> {
    match input.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(ValidationError::NotYesNo(other.to_string())),
    }
}

/// A year between `MIN_YEAR` and `max`; empty input takes `default`.
pub fn parse_year(input: &str, default: i32, max: i32) -> Result<i32, ValidationError> {
    let input = input.trim();
    let year = if input.is_empty() {
        default
    } else {
        input
            .parse::<i32>()
            .map_err(|_| ValidationError::NotANumber(input.to_string()))?
    };
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(ValidationError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max,
        });
    }
    Ok(year)
}

/// Like `parse_year`, defaulting to `start` and refusing years before it.
pub fn parse_end_year(input: &str, start: i32, max: i32) -> Result<i32, ValidationError> {
    let end = parse_year(input, start, max)?;
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    Ok(end)
}
