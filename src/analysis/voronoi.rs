//! Graph Voronoi partitions.

use crate::error::{Result, TopologyError};
use crate::graph::{DistanceTable, Graph, Metric, NodeId};

/// Index into `seeds` of the seed nearest to `node`; ties go to the earlier seed.
pub fn nearest_seed(table: &DistanceTable, seeds: &[NodeId], node: NodeId) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, &seed) in seeds.iter().enumerate() {
        let d = table.get(seed, node);
        if d < best_dist {
            best = idx;
            best_dist = d;
        }
    }
    best
}

/// Size of each seed's cell, aligned with `seeds`.
///
/// Seeds are assumed distinct and in range; [`voronoi_cells`] checks both.
pub fn cell_sizes(table: &DistanceTable, seeds: &[NodeId]) -> Vec<usize> {
    let mut sizes = vec![0; seeds.len()];
    for node in 0..table.node_count() {
        sizes[nearest_seed(table, seeds, node)] += 1;
    }
    sizes
}

fn check_seeds(node_count: usize, seeds: &[NodeId]) -> Result<()> {
    if seeds.is_empty() {
        return Err(TopologyError::InvalidArgument("at least one seed is required".to_string()));
    }
    for (i, &seed) in seeds.iter().enumerate() {
        if seed >= node_count {
            return Err(TopologyError::InvalidArgument(format!(
                "seed {} is outside a graph of {} nodes",
                seed, node_count
            )));
        }
        if seeds[..i].contains(&seed) {
            return Err(TopologyError::InvalidArgument(format!("seed {} listed twice", seed)));
        }
    }
    Ok(())
}

/// Partition every node to its nearest seed.
///
/// Returns one cell per seed, in seed order, each holding its nodes in
/// ascending order. A seed always belongs to its own cell.
///
/// # Errors
/// * `InvalidArgument` for empty, duplicate or out-of-range seeds.
/// * `DisconnectedGraph` if any node cannot reach every seed.
pub fn voronoi_cells(graph: &Graph, seeds: &[NodeId], metric: Metric) -> Result<Vec<Vec<NodeId>>> {
    check_seeds(graph.node_count(), seeds)?;
    let table = DistanceTable::build(graph, metric)?;
    let mut cells = vec![Vec::new(); seeds.len()];
    for node in 0..graph.node_count() {
        cells[nearest_seed(&table, seeds, node)].push(node);
    }
    Ok(cells)
}
