use anyhow::{Context, Result};
use std::env;
use std::process;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use catgen::{CatalogPipeline, Cli, ConfigManager, Output};

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = ConfigManager::load_config(cli).context("Failed to load configuration")?;
    let output_path = config.output_path(&cli.catalog_prefix);
    let verbosity = config.verbosity();

    let summary = CatalogPipeline::new(config)
        .run(&cli.directory, &output_path)
        .with_context(|| format!("Failed to generate catalog for {}", cli.directory.display()))?;

    print!("{}", Output::new(verbosity).format_results(&summary));
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if let Some(level_str) = &cli.log_level {
        parse_level(level_str)
    } else if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("CATGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("catgen={}", level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
