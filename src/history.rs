// Run history: one CSV row appended per invocation of the downloader.
// The file and its parent folder are created on first use.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::history_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// One row of `run_history.csv`. Column order follows field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub account: String,
    pub start_year: i32,
    pub end_year: i32,
    pub dry_run: bool,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct RunHistory {
    path: PathBuf,
}

impl RunHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RunHistory { path: path.into() }
    }

    /// History stored under the logs subfolder of `destination`.
    pub fn for_destination(destination: &Path) -> Self {
        RunHistory::new(history_path(destination))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, writing the header row when the file is new.
    pub fn append(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let is_new = file.metadata()?.len() == 0;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        wtr.serialize(entry)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        wtr.flush()?;
        Ok(())
    }

    /// Read every entry back, oldest first.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let mut rdr = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut entries = Vec::new();
        for row in rdr.deserialize() {
            entries.push(row.context("Malformed run history row")?);
        }
        Ok(entries)
    }
}
