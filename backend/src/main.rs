// MorphDB command-line entrypoint
//!
//! Loads configuration, initializes logging, opens the dynamic schema engine and
//! dispatches a single subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use morphdb_configs::MorphDbConfig;
use morphdb_core::DynamicSchemaEngine;
use morphdb_server::args::Cli;
use morphdb_server::commands::{self, Outcome};
use morphdb_server::logging;
use std::path::Path;

fn load_config(cli: &Cli) -> Result<MorphDbConfig> {
    let mut config = if Path::new(&cli.config).exists() {
        let cfg = MorphDbConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?;
        eprintln!("✅ Loaded config from: {}", cli.config.display());
        cfg
    } else {
        MorphDbConfig::default()
    };

    config.apply_env_overrides();

    if let Some(database) = &cli.database {
        config.storage.database_path = database.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.verbose {
        config.logging.log_to_console = true;
    }

    config.finalize()?;
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ FATAL: Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    match run(&cli, &config) {
        Ok(Outcome::Ok) => {}
        Ok(Outcome::Drift) => std::process::exit(3),
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: &MorphDbConfig) -> Result<Outcome> {
    logging::init_logging(&config.logging, "morphdb.log")?;

    info!(
        "MorphDB v{} (database: {})",
        env!("CARGO_PKG_VERSION"),
        config.storage.database_path
    );

    let engine = DynamicSchemaEngine::open(config).context("Failed to open database")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&engine, &cli.command, &mut out)
}
