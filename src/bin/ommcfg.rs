//! ommcfg CLI Binary
//!
//! Command-line front end for resolving and inspecting OMM session configuration.

use clap::Parser;
use ommcfg::cli::{map_error, Cli, RunContext};
use ommcfg::logging::{init_logging, LoggingConfig};
use ommcfg::settings::ToolSettings;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let settings = ToolSettings::load(&cli.workspace).unwrap_or_default();

    // Resolving here runs before logging is up; the command resolves again
    // afterwards and reports any failure then.
    let context = RunContext::new(&cli, &settings);
    let base = match &context {
        Ok(ctx) if cli.log_from_config => ctx
            .configured_logging()
            .unwrap_or_else(|_| settings.logging.clone()),
        _ => settings.logging.clone(),
    };

    let logging_config = build_logging_config(&cli, base);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("ommcfg starting");

    let context = match context {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration layers: {:#}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Precedence: CLI flags override `base`, which is either the tool settings
/// or the resolved Logger entity.
fn build_logging_config(cli: &Cli, base: LoggingConfig) -> LoggingConfig {
    let mut config = base;

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
    config
}
