// Entrypoint for the CLI application.
// - Keeps `main` small: resolve configuration, ask the questions, run once.
// - The process exit code mirrors the downloader's exit code.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use icloud_years::{accounts::AccountStore, cli::Cli, config::Config, session, ui};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::from_cli(&cli);
    let store = AccountStore::new(config.accounts_file.clone());
    tracing::debug!(accounts = %store.path().display(), "configuration resolved");

    if cli.auth_only {
        let (account, is_new) = ui::choose_account(&store)?;
        let report = session::authenticate(&config.downloader, &account);
        if is_new {
            ui::remember(&store, &account);
        }
        return Ok(report.exit_code());
    }

    // Blocks on the prompts, then on the downloader itself.
    let params = ui::collect_parameters(&config, &store)?;
    let report = session::execute(&config.downloader, &params)?;
    println!("Done.");
    Ok(report.exit_code())
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::from_default_env().add_directive(format!("icloud_years={}", level).parse()?);
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
