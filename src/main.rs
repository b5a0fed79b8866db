// main.rs

mod buffer;
mod cli;
mod clipboard;
mod commands;
mod config;
mod error;
mod history;
mod session;
mod util;

use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::{Config, LOG_ENV};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<OsString> = env::args_os().collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "clipyank".to_string());

    let Some(mode) = cli::parse_args(args.get(1..).unwrap_or_default()) else {
        eprintln!("{}", cli::usage(&program));
        return ExitCode::FAILURE;
    };

    let config = Config::from_env();
    tracing::debug!(?mode, history = ?config.history_path, "starting");

    match commands::run(mode, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

// Diagnostics go to stderr so they never mix with clipboard bytes on stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}
