// Account store: a plain text file with one Apple ID per line. The file is
// only ever appended to; a missing file simply means no known accounts yet.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::ValidationError;

/// Label of the extra menu entry used to type a new Apple ID.
pub const NEW_ACCOUNT_LABEL: &str = "Enter a new Apple ID";

#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

/// What the user picked from the account menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChoice {
    Known(String),
    New,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AccountStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the known identifiers, trimmed, without blanks or duplicates,
    /// sorted. A missing or unreadable file yields an empty list.
    pub fn load(&self) -> Vec<String> {
        parse_accounts(&self.read_contents())
    }

    /// Append `account` unless the file already lists it. Returns whether
    /// a line was written.
    pub fn persist(&self, account: &str) -> Result<bool> {
        let contents = self.read_contents();
        if parse_accounts(&contents).iter().any(|known| known == account) {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        // A hand-edited file may lack its final newline.
        let separator = if contents.is_empty() || contents.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        write!(file, "{}{}\n", separator, account)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(true)
    }

    fn read_contents(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no accounts file yet");
                String::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read accounts file");
                String::new()
            }
        }
    }
}

fn parse_accounts(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Check an Apple ID typed by the user. Returns the trimmed identifier.
pub fn validate_account(input: &str) -> Result<String, ValidationError> {
    let account = input.trim();
    if account.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !account.contains('@') || account.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidAccount(account.to_string()));
    }
    Ok(account.to_string())
}

/// Menu lines for the known accounts (1-based) followed by the "new" entry.
pub fn menu_items(known: &[String]) -> Vec<String> {
    known
        .iter()
        .enumerate()
        .map(|(i, account)| format!("[{}] {}", i + 1, account))
        .chain(std::iter::once(NEW_ACCOUNT_LABEL.to_string()))
        .collect()
}

/// Map a menu index back to a choice. Anything past the known accounts
/// is the "new" entry, so an empty list always leads to `New`.
pub fn choice_for(known: &[String], selection: usize) -> AccountChoice {
    match known.get(selection) {
        Some(account) => AccountChoice::Known(account.clone()),
        None => AccountChoice::New,
    }
}
