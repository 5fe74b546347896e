//! `docindex` - query a documentation index snapshot from the command line
//!
//! Exit status: 0 on success, 1 when the queried symbol is not found
//! (or not nested), 2 when the snapshot cannot be loaded.

mod cli;
mod commands;

use anyhow::{Context, Result};
use cli::Invocation;
use commands::Outcome;
use docindex_loader::SnapshotLoader;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(invocation: &Invocation) -> Result<ExitCode> {
    let loaded = SnapshotLoader::new()
        .load_path(&invocation.snapshot)
        .with_context(|| format!("failed to load {}", invocation.snapshot.display()))?;

    let outcome = commands::execute(&loaded.catalog, &invocation.request, invocation.json)
        .context("failed to render result")?;

    match outcome {
        Outcome::Output(text) => {
            std::io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .context("failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Miss(message) => {
            eprintln!("{message}");
            Ok(ExitCode::from(1))
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let matches = cli::command().get_matches();
    let invocation = match Invocation::from_matches(&matches) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!("Running {:?}", invocation.request);

    match run(&invocation) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
