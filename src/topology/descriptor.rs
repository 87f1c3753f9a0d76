//! Topology descriptor serialization.
//!
//! The descriptor is the JSON document the external network simulator loads:
//! routers, the sparse set of quantum links (one per synthesized edge), and a
//! dense overlay of classical links between every pair of routers whose delay
//! follows the shortest path over the quantum links.

use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::graph::{DistanceTable, Graph, Metric, NodeId};
use crate::utils::staged::StagedFile;

/// Node type tag understood by the simulator
pub const QUANTUM_ROUTER: &str = "QuantumRouter";

/// Quantum link type tag understood by the simulator
pub const MEET_IN_THE_MIDDLE: &str = "meet_in_the_middle";

/// Simulator name for node `index`.
pub fn router_name(index: NodeId) -> String {
    format!("r{}", index)
}

/// A router entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterNode {
    pub name: String,
    pub seed: u64,
    pub memo_size: u32,
    #[serde(rename = "type")]
    pub node_type: String,
}

/// A quantum link between two routers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumConnection {
    pub node1: String,
    pub node2: String,
    pub attenuation: f64,
    pub distance: f64,
    #[serde(rename = "type")]
    pub connection_type: String,
}

/// A classical link between two routers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalConnection {
    pub node1: String,
    pub node2: String,
    pub delay: f64,
}

/// Complete topology document. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyDescriptor {
    pub is_parallel: bool,
    pub stop_time: u64,
    pub nodes: Vec<RouterNode>,
    pub qconnections: Vec<QuantumConnection>,
    pub cconnections: Vec<ClassicalConnection>,
}

/// Constants stamped into every descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorParams {
    /// Memory slots per router
    pub memo_size: u32,
    /// Simulation horizon in picoseconds
    pub stop_time: u64,
    /// Attenuation of every quantum link
    pub attenuation: f64,
    /// Multiplier from path length to classical delay
    pub delay_scale: f64,
    pub is_parallel: bool,
}

impl Default for DescriptorParams {
    fn default() -> Self {
        Self {
            memo_size: 20,
            stop_time: 6_000_000_000_000,
            attenuation: 2e-3,
            delay_scale: 1e6,
            is_parallel: false,
        }
    }
}

/// Build the descriptor for a weighted graph.
///
/// # Errors
/// * `DisconnectedGraph` if some pair of routers has no path, since every
///   classical link needs a finite delay.
pub fn build_descriptor(graph: &Graph, params: &DescriptorParams) -> Result<TopologyDescriptor, TopologyError> {
    let n = graph.node_count();
    let distances = DistanceTable::build(graph, Metric::Length)?;

    let nodes = (0..n)
        .map(|i| RouterNode {
            name: router_name(i),
            seed: i as u64,
            memo_size: params.memo_size,
            node_type: QUANTUM_ROUTER.to_string(),
        })
        .collect();

    let qconnections = graph
        .edges()
        .map(|edge| QuantumConnection {
            node1: router_name(edge.source),
            node2: router_name(edge.target),
            attenuation: params.attenuation,
            distance: edge.length,
            connection_type: MEET_IN_THE_MIDDLE.to_string(),
        })
        .collect();

    let mut cconnections = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            cconnections.push(ClassicalConnection {
                node1: router_name(i),
                node2: router_name(j),
                delay: distances.get(i, j) * params.delay_scale,
            });
        }
    }

    Ok(TopologyDescriptor {
        is_parallel: params.is_parallel,
        stop_time: params.stop_time,
        nodes,
        qconnections,
        cconnections,
    })
}

/// Render as JSON indented with four spaces.
pub fn render_descriptor(descriptor: &TopologyDescriptor) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    descriptor
        .serialize(&mut serializer)
        .context("Failed to serialize topology descriptor")?;
    String::from_utf8(buf).context("Topology descriptor is not valid UTF-8")
}

/// Write the descriptor to `path`.
///
/// The document is rendered in full, written to a sibling temporary file and
/// renamed over `path`, so a failure never leaves a truncated descriptor.
pub fn write_descriptor(descriptor: &TopologyDescriptor, path: &Path) -> Result<()> {
    let json = render_descriptor(descriptor)?;
    StagedFile::write(path, &json)?
        .commit()
        .context("Failed to write topology descriptor")?;

    log::info!(
        "Topology descriptor written to {} ({} nodes, {} quantum links, {} classical links)",
        path.display(),
        descriptor.nodes.len(),
        descriptor.qconnections.len(),
        descriptor.cconnections.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Skeleton};

    fn square_with_tail() -> Graph {
        // 0-1-2-3-0 square of side 1, plus 3-4 of length 2
        let edges = vec![
            Edge { source: 0, target: 1, length: 1.0 },
            Edge { source: 1, target: 2, length: 1.0 },
            Edge { source: 2, target: 3, length: 1.0 },
            Edge { source: 0, target: 3, length: 1.0 },
            Edge { source: 3, target: 4, length: 2.0 },
        ];
        Graph::from_edges(5, edges).unwrap()
    }

    #[test]
    fn test_descriptor_counts_and_names() {
        let graph = square_with_tail();
        let descriptor = build_descriptor(&graph, &DescriptorParams::default()).unwrap();
        assert_eq!(descriptor.nodes.len(), 5);
        assert_eq!(descriptor.qconnections.len(), 5);
        assert_eq!(descriptor.cconnections.len(), 10);
        for (i, node) in descriptor.nodes.iter().enumerate() {
            assert_eq!(node.name, format!("r{}", i));
            assert_eq!(node.seed, i as u64);
            assert_eq!(node.memo_size, 20);
            assert_eq!(node.node_type, "QuantumRouter");
        }
    }

    #[test]
    fn test_classical_delay_follows_shortest_path() {
        let graph = square_with_tail();
        let descriptor = build_descriptor(&graph, &DescriptorParams::default()).unwrap();
        let delay = |a: &str, b: &str| {
            descriptor
                .cconnections
                .iter()
                .find(|c| c.node1 == a && c.node2 == b)
                .map(|c| c.delay)
                .unwrap()
        };
        assert_eq!(delay("r0", "r1"), 1e6);
        // no direct link: two hops around the square
        assert_eq!(delay("r0", "r2"), 2e6);
        // 1 -> 0 -> 3 -> 4
        assert_eq!(delay("r1", "r4"), 4e6);
    }

    #[test]
    fn test_quantum_links_carry_lengths() {
        let graph = square_with_tail();
        let params = DescriptorParams {
            attenuation: 1e-5,
            ..DescriptorParams::default()
        };
        let descriptor = build_descriptor(&graph, &params).unwrap();
        let tail = descriptor
            .qconnections
            .iter()
            .find(|q| q.node1 == "r3" && q.node2 == "r4")
            .unwrap();
        assert_eq!(tail.distance, 2.0);
        assert_eq!(tail.attenuation, 1e-5);
        assert_eq!(tail.connection_type, "meet_in_the_middle");
    }

    #[test]
    fn test_disconnected_graph_fails() {
        let mut skeleton = Skeleton::new(4);
        skeleton.add_edge(0, 1);
        skeleton.add_edge(2, 3);
        let graph = Graph::from_skeleton(&skeleton, |_, _| 1.0).unwrap();
        assert!(matches!(
            build_descriptor(&graph, &DescriptorParams::default()),
            Err(TopologyError::DisconnectedGraph { .. })
        ));
    }

    #[test]
    fn test_render_uses_simulator_field_names() {
        let graph = Graph::from_skeleton(&Skeleton::cycle(3), |_, _| 1.5).unwrap();
        let json = render_descriptor(&build_descriptor(&graph, &DescriptorParams::default()).unwrap()).unwrap();
        assert!(json.starts_with("{\n    \"is_parallel\": false,\n    \"stop_time\": 6000000000000,"));
        assert!(json.contains("\"memo_size\": 20"));
        assert!(json.contains("\"type\": \"QuantumRouter\""));
        assert!(json.contains("\"type\": \"meet_in_the_middle\""));
        assert!(json.contains("\"delay\": 1500000.0"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cconnections"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_failed_write_leaves_no_temporary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let graph = Graph::from_skeleton(&Skeleton::cycle(4), |_, _| 1.0).unwrap();
        let descriptor = build_descriptor(&graph, &DescriptorParams::default()).unwrap();
        assert!(write_descriptor(&descriptor, &path).is_err());
        assert!(!dir.path().join("ring.json.tmp").exists());
    }
}
