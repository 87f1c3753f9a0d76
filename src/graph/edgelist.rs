//! Edge-list persistence.
//!
//! One edge per line, `u v {'length': value}`, the layout networkx writes with
//! `write_edgelist`. Lengths are printed with the shortest representation that
//! parses back to the same `f64`, so a write/read cycle is exact.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use color_eyre::eyre::{Context, Result};
use regex::Regex;

use super::types::{Edge, Graph, NodeId};
use crate::error::TopologyError;
use crate::utils::staged::StagedFile;

/// Match: "3 17 {'length': 618.03}" (quotes around the key optional)
static EDGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\d+)\s+(\d+)\s+\{\s*['"]?length['"]?\s*:\s*([^\s}]+)\s*\}$"#)
        .expect("Invalid edge line regex")
});

/// Render a graph as edge-list text, edges in ascending order.
pub fn write_edgelist(graph: &Graph) -> String {
    let mut out = String::new();
    for edge in graph.edges() {
        out.push_str(&format!("{} {} {{'length': {}}}\n", edge.source, edge.target, edge.length));
    }
    out
}

/// Node count implied by the largest id, if `edges` edges can plausibly
/// reach it. Every edge touches at most two nodes, so ids past `2 * edges`
/// can only belong to isolated nodes the format cannot express.
fn node_count_for(max_id: NodeId, edges: usize) -> Option<usize> {
    let bound = edges.checked_mul(2)?;
    if max_id > bound {
        return None;
    }
    max_id.checked_add(1)
}

/// Parse edge-list text into a graph.
///
/// Blank lines and `#` comments are skipped. The node count is one past the
/// largest id seen; ids that would imply far more nodes than the edges can
/// touch are rejected.
pub fn parse_edgelist(content: &str) -> Result<Graph, TopologyError> {
    let pattern = &*EDGE_LINE;
    let mut parsed: Vec<(usize, Edge)> = Vec::new();
    // Largest id seen and the line it appeared on
    let mut max_id: Option<(NodeId, usize)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let caps = pattern.captures(line).ok_or_else(|| TopologyError::Parse {
            line: line_no,
            message: format!("expected `u v {{'length': value}}`, found '{}'", line),
        })?;

        let parse_id = |s: &str| {
            s.parse::<NodeId>().map_err(|e| TopologyError::Parse {
                line: line_no,
                message: format!("invalid node id '{}': {}", s, e),
            })
        };
        let source = parse_id(&caps[1])?;
        let target = parse_id(&caps[2])?;
        let length = caps[3].parse::<f64>().map_err(|e| TopologyError::Parse {
            line: line_no,
            message: format!("invalid length '{}': {}", &caps[3], e),
        })?;

        let id = source.max(target);
        if max_id.map_or(true, |(max, _)| id > max) {
            max_id = Some((id, line_no));
        }
        parsed.push((line_no, Edge { source, target, length }));
    }

    let node_count = match max_id {
        None => 0,
        Some((id, line)) => node_count_for(id, parsed.len()).ok_or_else(|| TopologyError::Parse {
            line,
            message: format!(
                "node id {} is out of range for an edge list of {} edges",
                id,
                parsed.len()
            ),
        })?,
    };

    let mut graph = Graph::empty(node_count);
    for (line, edge) in parsed {
        graph
            .insert(edge.source, edge.target, edge.length)
            .map_err(|message| TopologyError::Parse { line, message })?;
    }

    log::debug!(
        "Parsed edge list: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Write a graph's edge list to `path` through a staged temporary file.
pub fn save_edgelist(graph: &Graph, path: &Path) -> Result<()> {
    StagedFile::write(path, &write_edgelist(graph))?
        .commit()
        .with_context(|| format!("Failed to write edge list to {}", path.display()))?;
    log::info!("Edge list written to {}", path.display());
    Ok(())
}

/// Read a graph from an edge-list file.
pub fn load_edgelist(path: &Path) -> Result<Graph> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read edge list from {}", path.display()))?;
    let graph = parse_edgelist(&content)
        .with_context(|| format!("Invalid edge list {}", path.display()))?;
    log::info!(
        "Loaded graph from {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
