use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    // Parse the YAML content
    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    info!(
        "Detected {} topology with {} nodes (seed {})",
        config.network.label(),
        config.network.node_count(),
        config.network.seed()
    );

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "general:\n  name: ring\n  stop_time: 6s\nnetwork:\n  model: ring\n  nodes: 20\n  shortcuts: 5\n  seed: 0"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.general.name, "ring");
        assert_eq!(config.network.node_count(), 20);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "general:\n  name: ba\n  stop_time: 6s\nnetwork:\n  model: barabasi_albert\n  nodes: 3\n  attach_edges: 3\n  seed: 0"
        )
        .unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:?}", err).contains("attach_edges"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_config(Path::new("/nonexistent/qnetgen.yaml")).is_err());
    }
}
