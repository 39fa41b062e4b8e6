//! Quotesify interactive shell.
//!
//! # Responsibility
//! - Resolve configuration, start logging, restore the library.
//! - Read one command per line and print its outcome until `bye`.

mod ui;

use clap::Parser;
use log::{info, warn};
use quotesify_core::{init_logging, AppConfig, ConfigError, Session};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use ui::TextUi;

#[derive(Debug, Parser)]
#[command(name = "quotesify", version, about = "Track books, quotes and ratings")]
struct Args {
    /// Snapshot file (`.json`, or `.db`/`.sqlite` for SQLite).
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Directory for rotating log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Allow saves to replace a data file that failed to load.
    #[arg(long)]
    overwrite_unreadable: bool,
}

fn resolve_config(args: &Args) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::from_env()?;
    if let Some(data_file) = &args.data_file {
        config = config.with_data_file(data_file);
    }
    if let Some(log_dir) = &args.log_dir {
        config = config.with_log_dir(log_dir)?;
    }
    if let Some(level) = &args.log_level {
        config = config.with_log_level(level)?;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let ui = TextUi::new();
    let args = Args::parse();
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(err) => {
            ui.print_error(&err.to_string());
            return ExitCode::FAILURE;
        }
    };

    // Logging is optional for the shell: a failure is shown once and the
    // session continues without file logs.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        ui.print_error(&format!("logging disabled: {err}"));
    }

    let mut session = Session::new(config.open_storage());
    if let Err(err) = session.load() {
        warn!("event=shell_start module=cli status=degraded reason=load_failed");
        ui.print_error(&format!("could not load saved data, starting empty: {err}"));
        if args.overwrite_unreadable {
            session.confirm_overwrite();
        } else {
            ui.print_error(
                "changes will not be saved; move the data file aside or restart with --overwrite-unreadable",
            );
        }
    }

    ui.print_welcome();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                ui.print_error(&format!("failed to read input: {err}"));
                break;
            }
        };
        let outcome = session.handle_line(&line);
        ui.print_outcome(&outcome);
        if outcome.is_exit() {
            break;
        }
        ui.print_prompt();
    }

    ui.print_goodbye();
    info!("event=shell_exit module=cli status=ok");
    ExitCode::SUCCESS
}
