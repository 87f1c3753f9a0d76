use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn, LevelFilter};
use std::path::PathBuf;

use qnetgen::{config_loader, orchestrator};

/// Topology generator for quantum network simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Output directory for the descriptor and edge list
    #[arg(short, long, default_value = "topology_output")]
    output: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging at "info" until the configured level is known;
    // --log-level and RUST_LOG take precedence over the configuration
    let level_overridden = args.log_level.is_some() || std::env::var_os("RUST_LOG").is_some();
    let initial_filter = args.log_level.clone().unwrap_or_else(|| "trace".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(initial_filter)).init();
    if !level_overridden {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Starting qnetgen topology generator");
    info!("Configuration file: {:?}", args.config);
    info!("Output directory: {:?}", args.output);

    let config = config_loader::load_config(&args.config)?;
    if !level_overridden {
        log::set_max_level(configured_level(config.general.log_level.as_deref()));
    }

    let generated = orchestrator::generate_topology(&config, &args.output)?;

    info!("Generated topology descriptor: {:?}", generated.descriptor_path);
    info!("Analyze it with: topo-analyzer {:?} full", generated.edgelist_path);
    Ok(())
}

/// Level filter for a configured `general.log_level`, "info" when unset or unknown
fn configured_level(level: Option<&str>) -> LevelFilter {
    match level {
        None => LevelFilter::Info,
        Some(name) => name.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}' in configuration, using info", name);
            LevelFilter::Info
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&[
            "qnetgen",
            "--config", "ring.yaml",
        ]);

        assert_eq!(args.config, PathBuf::from("ring.yaml"));
        assert_eq!(args.output, PathBuf::from("topology_output"));
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_output_and_log_level_args() {
        let args = Args::parse_from(&[
            "qnetgen",
            "-c", "ba.yaml",
            "-o", "out",
            "--log-level", "debug",
        ]);

        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_configured_level() {
        assert_eq!(configured_level(None), LevelFilter::Info);
        assert_eq!(configured_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(configured_level(Some("WARN")), LevelFilter::Warn);
        assert_eq!(configured_level(Some("chatty")), LevelFilter::Info);
    }
}
