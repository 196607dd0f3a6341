use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pulse_cli::commands::{check, convert, util};
use pulse_cli::{Cli, Commands, Config};

/// Converts entries into the configured destination, stdout by default.
fn convert_to(output: Option<&Path>, args: &convert::ConvertArgs, config: &Config) -> Result<usize> {
    let entries = util::read_entries(args.input.as_deref())?;
    let skip_running = args.resolve_skip_running(config);

    match output {
        Some(path) => convert::run_to_file(path, &entries, skip_running),
        None => convert::run(&mut io::stdout().lock(), &entries, skip_running),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries line protocol.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Convert(args)) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let output = args.output.as_deref().or(config.output.as_deref());
            let written = convert_to(output, args, &config)?;
            tracing::info!(points = written, "converted time entries");
        }
        Some(Commands::Check(args)) => {
            let entries = util::read_entries(args.input.as_deref())?;
            check::run(&mut io::stdout().lock(), &entries)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
