use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use symdoc::cli::commands::{init, members, render};
use symdoc::cli::{Cli, Commands};
use symdoc::{Settings, SymdocError, logging};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // An explicitly named config must load; the discovered one falls back
    // to defaults.
    let mut config = match &cli.config {
        Some(path) => Settings::load_from(path)
            .map_err(SymdocError::from)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        }),
    };

    if cli.info {
        config.logging.default = "info".to_string();
    }
    logging::init_with_config(&config.logging);

    let code = match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            init::run_init(&cwd, force)
        }
        Commands::Config => init::run_config(&config),
        Commands::Render {
            inputs,
            output,
            json,
        } => {
            inputs.apply(&mut config);
            if let Some(path) = output {
                config.output.path = path;
            }
            render::run_render(&config, json)
        }
        Commands::Members {
            symbol,
            inputs,
            json,
        } => {
            inputs.apply(&mut config);
            members::run_members(&config, &symbol, json)
        }
    };

    Ok(code)
}
