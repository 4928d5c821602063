#![warn(missing_docs)]

//! Entry point for the `select-audio-output` binary.

mod cli;
mod commands;
mod error;
mod interactive;
mod menu;

use std::{io, process};

use audio_backend::MacBackend;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{cli::Cli, error::Result};

/// Level applied to our crates when no flag or `RUST_LOG` says otherwise.
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() {
    if let Err(err) = run() {
        debug!(?err, "exiting with failure");
        eprintln!("{err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and run the selected action.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_spec = cli.log.spec(DEFAULT_LOG_LEVEL);
    registry()
        .with(logging::env_filter_from_spec(&log_spec))
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    let backend = MacBackend::new(cli.tools.backend_config());
    let action = cli.action();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&action, &backend, &mut out)
}
