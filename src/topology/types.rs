//! Topology model definitions.
//!
//! The generative models supported by the synthesizer and their parameters,
//! as they appear in the `network` section of a generation config.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};
use crate::graph::Graph;
use crate::topology::barabasi_albert::generate_barabasi_albert;
use crate::topology::layout::{assign_layout_lengths, spring_layout};
use crate::topology::ring::{assign_chord_lengths, generate_ring};

fn default_radius() -> f64 {
    1000.0
}

fn default_scale() -> f64 {
    1000.0
}

fn default_layout_iterations() -> usize {
    50
}

/// Ring with random shortcut edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingParams {
    pub nodes: usize,
    pub shortcuts: usize,
    pub seed: u64,
    /// Radius of the circle the routers sit on, in length units.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

/// Preferential-attachment graph laid out with a spring embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarabasiAlbertParams {
    pub nodes: usize,
    pub attach_edges: usize,
    pub seed: u64,
    /// Multiplier from layout units to length units.
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: usize,
}

/// Generative model used to synthesize a topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum NetworkModel {
    Ring(RingParams),
    BarabasiAlbert(BarabasiAlbertParams),
}

impl NetworkModel {
    /// Short label used in log output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ring(_) => "ring",
            Self::BarabasiAlbert(_) => "barabasi_albert",
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Self::Ring(p) => p.nodes,
            Self::BarabasiAlbert(p) => p.nodes,
        }
    }

    pub fn seed(&self) -> u64 {
        match self {
            Self::Ring(p) => p.seed,
            Self::BarabasiAlbert(p) => p.seed,
        }
    }

    /// Check parameters without running the generator.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Ring(p) => {
                if p.nodes < 3 {
                    return Err(TopologyError::Configuration(format!(
                        "ring needs at least 3 nodes, got {}",
                        p.nodes
                    )));
                }
                if !p.radius.is_finite() || p.radius <= 0.0 {
                    return Err(TopologyError::Configuration(format!(
                        "ring radius must be positive, got {}",
                        p.radius
                    )));
                }
            }
            Self::BarabasiAlbert(p) => {
                if p.attach_edges < 1 || p.attach_edges >= p.nodes {
                    return Err(TopologyError::Configuration(format!(
                        "attach_edges must satisfy 1 <= attach_edges < nodes, got attach_edges={} nodes={}",
                        p.attach_edges, p.nodes
                    )));
                }
                if !p.scale.is_finite() || p.scale <= 0.0 {
                    return Err(TopologyError::Configuration(format!(
                        "layout scale must be positive, got {}",
                        p.scale
                    )));
                }
            }
        }
        Ok(())
    }

    /// Run the generator and the matching weight assignment.
    ///
    /// Each call seeds its own generator from the configured seed, so repeated
    /// calls return identical graphs.
    pub fn synthesize(&self) -> Result<Graph> {
        self.validate()?;
        match self {
            Self::Ring(p) => {
                let mut rng = StdRng::seed_from_u64(p.seed);
                let skeleton = generate_ring(p.nodes, p.shortcuts, &mut rng)?;
                assign_chord_lengths(&skeleton, p.radius)
            }
            Self::BarabasiAlbert(p) => {
                let mut rng = StdRng::seed_from_u64(p.seed);
                let skeleton = generate_barabasi_albert(p.nodes, p.attach_edges, &mut rng)?;
                // The layout gets its own stream from the same seed.
                let mut layout_rng = StdRng::seed_from_u64(p.seed);
                let positions = spring_layout(&skeleton, p.layout_iterations, &mut layout_rng);
                assign_layout_lengths(&skeleton, &positions, p.scale)
            }
        }
    }
}
