// Library root
// -----------
// This crate exposes the pieces of the interactive year-range downloader.
// The binary (`main.rs`) wires them together for a single run.
//
// Module responsibilities:
// - `cli` / `config`: command-line flags and the paths derived from them.
// - `accounts`: the file of known Apple IDs and the account menu.
// - `ui`: the prompts asked on every run, with their validation.
// - `command`: pure mapping from answers to the downloader's arguments.
// - `runner`: launches the downloader and waits for it.
// - `history`: the append-only CSV run log under the destination.
// - `session`: builds, runs, reports and logs one invocation.
pub mod accounts;
pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod history;
pub mod runner;
pub mod session;
pub mod ui;
