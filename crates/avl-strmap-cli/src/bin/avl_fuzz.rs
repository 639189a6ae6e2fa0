//! `avl-fuzz`: randomized insert/delete run against an AVL tree.
//!
//! Usage:
//!   avl-fuzz [--config harness.toml] [--seed 0xDEADBEEF] [-n 1000] ...
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); the PASS/FAIL summary is
//! written to stdout. Exits non-zero when any check fails.

use std::process::ExitCode;

use avl_strmap_cli::{FuzzCli, Harness, HarnessConfig, HarnessError};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn fuzz(cli: &FuzzCli) -> Result<bool, HarnessError> {
    let base = match &cli.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    let config = cli.apply(base);

    let mut harness = Harness::new(config)?;
    harness.populate()?;
    harness.mix()?;
    let report = harness.report()?;

    if cli.print {
        println!("{}", harness.tree().print());
    }
    println!("{report}");
    Ok(report.passed())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = FuzzCli::parse();
    match fuzz(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
