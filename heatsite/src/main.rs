mod arguments;
mod error;
mod terminal;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::arguments::SiteOptions;
use crate::error::Result;

/// Exit status when the command line is rejected or help was asked for.
const USAGE_EXIT: u8 = 2;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run() -> Result<ExitCode> {
    println!("HeatSite version: {}", env!("CARGO_PKG_VERSION"));

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let width = terminal::width();
    debug!(width, tokens = tokens.len(), "parsing command line");

    let mut options = SiteOptions::default();
    if !heatargs::parse_with_usage(&tokens, &mut options, width)? {
        io::stdout().flush()?;
        return Ok(ExitCode::from(USAGE_EXIT));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    options.report(&mut out)?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("heatsite: {}", e);
            ExitCode::from(1)
        }
    }
}
