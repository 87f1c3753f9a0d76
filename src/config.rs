use serde::{Deserialize, Serialize};

use crate::topology::{DescriptorParams, NetworkModel};
use crate::utils::duration::parse_duration_to_picoseconds;

/// Topology generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub network: NetworkModel,
    #[serde(default)]
    pub links: LinkConfig,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate general settings
        let name = self.general.name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "name cannot be empty".to_string()
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ValidationError::InvalidGeneral(
                format!("name '{}' must not contain path separators", name)
            ));
        }
        if self.general.stop_time.is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "stop_time cannot be empty".to_string()
            ));
        }
        parse_duration_to_picoseconds(&self.general.stop_time)
            .map_err(ValidationError::InvalidGeneral)?;
        if self.general.memo_size == Some(0) {
            return Err(ValidationError::InvalidGeneral(
                "memo_size must be at least 1".to_string()
            ));
        }

        // Validate network settings
        self.network
            .validate()
            .map_err(|e| ValidationError::InvalidNetwork(e.to_string()))?;

        // Validate link constants
        if !self.links.attenuation.is_finite() || self.links.attenuation < 0.0 {
            return Err(ValidationError::InvalidLinks(format!(
                "attenuation must be non-negative, got {}",
                self.links.attenuation
            )));
        }
        if !self.links.delay_scale.is_finite() || self.links.delay_scale <= 0.0 {
            return Err(ValidationError::InvalidLinks(format!(
                "delay_scale must be positive, got {}",
                self.links.delay_scale
            )));
        }

        Ok(())
    }

    /// Descriptor constants derived from this configuration
    pub fn descriptor_params(&self) -> Result<DescriptorParams, ValidationError> {
        let defaults = DescriptorParams::default();
        Ok(DescriptorParams {
            memo_size: self.general.memo_size.unwrap_or(defaults.memo_size),
            stop_time: parse_duration_to_picoseconds(&self.general.stop_time)
                .map_err(ValidationError::InvalidGeneral)?,
            attenuation: self.links.attenuation,
            delay_scale: self.links.delay_scale,
            is_parallel: self.general.is_parallel.unwrap_or(defaults.is_parallel),
        })
    }
}

/// Shared general configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    /// Base name of the generated `<name>.json` and `<name>.edgelist`
    pub name: String,
    /// Simulation horizon handed to the simulator, e.g. "6s"
    pub stop_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_attenuation() -> f64 {
    2e-3
}

fn default_delay_scale() -> f64 {
    1e6
}

/// Constants applied to every generated link
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinkConfig {
    #[serde(default = "default_attenuation")]
    pub attenuation: f64,
    /// Multiplier from shortest-path length to classical delay
    #[serde(default = "default_delay_scale")]
    pub delay_scale: f64,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid link configuration: {0}")]
    InvalidLinks(String),
}


/// Default implementations
impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: "ring".to_string(),
            stop_time: "6s".to_string(),
            memo_size: Some(20),
            is_parallel: Some(false),
            log_level: Some("info".to_string()),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            attenuation: default_attenuation(),
            delay_scale: default_delay_scale(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{BarabasiAlbertParams, RingParams};

    fn ring_config() -> Config {
        Config {
            general: GeneralConfig::default(),
            network: NetworkModel::Ring(RingParams {
                nodes: 20,
                shortcuts: 5,
                seed: 0,
                radius: 1000.0,
            }),
            links: LinkConfig::default(),
        }
    }

    #[test]
    fn test_parse_ring_config() {
        let yaml = r#"
general:
  name: ring
  stop_time: "6s"
  memo_size: 20
network:
  model: ring
  nodes: 20
  shortcuts: 5
  seed: 0
  radius: 1000
links:
  attenuation: 0.002
  delay_scale: 1000000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.network, ring_config().network);

        let params = config.descriptor_params().unwrap();
        assert_eq!(params, DescriptorParams::default());
    }

    #[test]
    fn test_parse_ba_config_with_defaults() {
        let yaml = r#"
general:
  name: ba50
  stop_time: "2s"
network:
  model: barabasi_albert
  nodes: 50
  attach_edges: 2
  seed: 3
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.links, LinkConfig::default());
        assert_eq!(
            config.network,
            NetworkModel::BarabasiAlbert(BarabasiAlbertParams {
                nodes: 50,
                attach_edges: 2,
                seed: 3,
                scale: 1000.0,
                layout_iterations: 50,
            })
        );
        assert_eq!(config.descriptor_params().unwrap().stop_time, 2_000_000_000_000);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = ring_config();
        config.general.name = " ".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidGeneral(_))));

        let mut config = ring_config();
        config.general.stop_time = "later".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidGeneral(_))));

        let mut config = ring_config();
        config.network = NetworkModel::Ring(RingParams { nodes: 2, shortcuts: 0, seed: 0, radius: 1.0 });
        assert!(matches!(config.validate(), Err(ValidationError::InvalidNetwork(_))));

        let mut config = ring_config();
        config.links.delay_scale = 0.0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidLinks(_))));
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let yaml = "general:\n  name: x\n  stop_time: 1s\nnetwork:\n  model: lattice\n  nodes: 4\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }
}
