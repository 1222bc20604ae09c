// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::GlobalOptions;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time();

    if verbose {
        builder.with_target(true).with_level(true).init();
    } else {
        builder.with_target(false).with_level(false).init();
    }
}

/// Log line for a failed run: `<Kind>: <message>`
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ice_setup::Error>() {
        Some(e) => format!("{}: {}", e.kind(), e),
        None => format!("{:#}", err),
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = GlobalOptions {
        dir: cli.dir,
        no_gpg: cli.no_gpg,
        config: cli.config,
    };

    match cli.command {
        Some(Commands::Configure { scope, path }) => {
            commands::cmd_configure(&options, scope, path.as_deref())
        }
        Some(Commands::Update { repos }) => commands::cmd_update(&options, &repos),
        None => commands::cmd_setup(&options),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("ice_setup {}", ice_setup::VERSION);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", describe(&err));
            ExitCode::FAILURE
        }
    }
}
