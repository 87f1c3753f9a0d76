//! Domain errors for topology synthesis, serialization and analysis.

use crate::graph::NodeId;

/// Errors raised by the topology core.
///
/// Every variant is detected synchronously and is deterministic: retrying the
/// same call with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    /// Synthesis or weighting parameters cannot produce a valid graph.
    #[error("Invalid topology configuration: {0}")]
    Configuration(String),
    /// A shortest-path based computation found a pair with no path.
    #[error("Graph is disconnected: no path between node {from} and node {to}")]
    DisconnectedGraph { from: NodeId, to: NodeId },
    /// A caller-supplied argument is out of range for the given graph.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A persisted edge list could not be read back into a graph.
    #[error("Edge list parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
