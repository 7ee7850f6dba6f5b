//! xrpl-roundtrip - convert ledger records between HEX and JSON and verify the round trip.

use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;
use xrpl_roundtrip_canonical::RoundTrip;

mod cli;
mod commands;
mod config;
mod output;
mod session;

use cli::Cli;
use commands::{batch, file, interactive};
use config::{Config, Mode};
use session::Session;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(config: &Config) -> Result<bool, Box<dyn std::error::Error>> {
    let registry = config
        .build_registry()
        .map_err(|e| format!("Failed to load field definitions: {}", e))?;
    let harness = RoundTrip::new(config.build_codec(), registry);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&harness, config, stdin.lock(), stdout.lock());

    match &config.mode {
        Mode::Data(data) => {
            session.process_input(data)?;
        }
        Mode::File(path) => {
            file::run(&mut session, path)?;
        }
        Mode::Batch(dir) => {
            batch::run(&mut session, dir)?;
        }
        Mode::Interactive => interactive::run(&mut session)?,
    }

    Ok(session.tally().all_ok())
}

fn main() {
    init_tracing();
    let config = Config::from(Cli::parse());
    tracing::debug!(?config, "starting");

    match run(&config) {
        Ok(all_ok) => {
            if config.strict && !all_ok {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
