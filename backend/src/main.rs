// csvdex entrypoint
//!
//! Loading and serving live in `lifecycle` so this file remains a thin
//! orchestrator.

use anyhow::Result;
use clap::Parser;
use csvdex_server::args::{Cli, Command};
use csvdex_server::config::ServerConfig;
use csvdex_server::{lifecycle, logging};
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match ServerConfig::from_file(&cli.config) {
        Ok(cfg) => {
            eprintln!(
                "Loaded config from: {}",
                std::fs::canonicalize(&cli.config)
                    .unwrap_or_else(|_| cli.config.clone())
                    .display()
            );
            cfg
        }
        Err(e) => {
            eprintln!("FATAL: Failed to load {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    info!(
        "csvdex v{} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_COMMIT_HASH"),
        env!("BUILD_DATE")
    );

    match cli.command {
        Command::Load { csv } => {
            let loaded = lifecycle::load(&config, &csv)?;
            println!("{}", serde_json::to_string(&loaded.summary.columns)?);
            Ok(())
        }
        Command::Serve { csv } => {
            let reader = match csv {
                Some(path) => lifecycle::load(&config, &path)?.reader(),
                None => lifecycle::open_reader(&config)?,
            };
            info!("Host: {}  Port: {}", config.server.host, config.server.port);
            lifecycle::run(&config, reader).await
        }
    }
}
