//! Shortest-path computation.
//!
//! Single-source searches (BFS for hop counts, Dijkstra for edge lengths) and
//! the memoized all-pairs [`DistanceTable`] that the serializer and the subset
//! search reuse instead of re-traversing the graph per query.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{Graph, NodeId};
use crate::error::{Result, TopologyError};

/// How the distance between adjacent nodes is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Every edge counts as one hop.
    #[default]
    Hops,
    /// Edges weigh their assigned `length`.
    Length,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Hops => write!(f, "hops"),
            Metric::Length => write!(f, "length"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hops" | "hop" | "unweighted" => Ok(Metric::Hops),
            "length" | "weighted" => Ok(Metric::Length),
            other => Err(format!("Unknown distance metric: {}", other)),
        }
    }
}

impl Metric {
    /// Distance contributed by an edge of the given length.
    pub fn edge_cost(self, length: f64) -> f64 {
        match self {
            Metric::Hops => 1.0,
            Metric::Length => length,
        }
    }
}

/// Min-heap entry for Dijkstra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HeapEntry {
    pub cost: f64,
    pub node: NodeId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest cost, then the smallest id.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distances from `source` to every node; `None` marks unreachable nodes.
pub fn single_source_distances(graph: &Graph, source: NodeId, metric: Metric) -> Vec<Option<f64>> {
    match metric {
        Metric::Hops => bfs_distances(graph, source),
        Metric::Length => dijkstra_distances(graph, source),
    }
}

fn bfs_distances(graph: &Graph, source: NodeId) -> Vec<Option<f64>> {
    let mut dist = vec![None; graph.node_count()];
    if source >= graph.node_count() {
        return dist;
    }
    dist[source] = Some(0.0);
    let mut queue = VecDeque::from([source]);
    while let Some(u) = queue.pop_front() {
        let next = dist[u].unwrap_or(0.0) + 1.0;
        for (v, _) in graph.neighbors(u) {
            if dist[v].is_none() {
                dist[v] = Some(next);
                queue.push_back(v);
            }
        }
    }
    dist
}

fn dijkstra_distances(graph: &Graph, source: NodeId) -> Vec<Option<f64>> {
    let mut dist: Vec<Option<f64>> = vec![None; graph.node_count()];
    if source >= graph.node_count() {
        return dist;
    }
    let mut settled = vec![false; graph.node_count()];
    let mut heap = BinaryHeap::new();
    dist[source] = Some(0.0);
    heap.push(HeapEntry { cost: 0.0, node: source });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        for (v, length) in graph.neighbors(node) {
            let candidate = cost + length;
            if dist[v].map_or(true, |d| candidate < d) {
                dist[v] = Some(candidate);
                heap.push(HeapEntry { cost: candidate, node: v });
            }
        }
    }
    dist
}

/// Shortest-path distance between two nodes.
pub fn shortest_path_length(graph: &Graph, from: NodeId, to: NodeId, metric: Metric) -> Result<f64> {
    if from >= graph.node_count() || to >= graph.node_count() {
        return Err(TopologyError::InvalidArgument(format!(
            "node pair {}-{} is outside a graph of {} nodes",
            from,
            to,
            graph.node_count()
        )));
    }
    single_source_distances(graph, from, metric)[to].ok_or(TopologyError::DisconnectedGraph { from, to })
}

/// Dense all-pairs shortest-path table for a connected graph.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    node_count: usize,
    metric: Metric,
    distances: Vec<f64>,
}

impl DistanceTable {
    /// Run one single-source search per node.
    ///
    /// Fails with `DisconnectedGraph` on the first unreachable pair, so every
    /// entry of a built table is finite.
    pub fn build(graph: &Graph, metric: Metric) -> Result<Self> {
        let n = graph.node_count();
        let mut distances = Vec::with_capacity(n * n);
        for source in 0..n {
            for (target, dist) in single_source_distances(graph, source, metric).into_iter().enumerate() {
                let dist = dist.ok_or(TopologyError::DisconnectedGraph {
                    from: source,
                    to: target,
                })?;
                distances.push(dist);
            }
        }
        log::debug!("Built {} distance table for {} nodes", metric, n);
        Ok(Self {
            node_count: n,
            metric,
            distances,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        self.distances[from * self.node_count + to]
    }

    /// Distances from `from` to every node.
    pub fn row(&self, from: NodeId) -> &[f64] {
        let start = from * self.node_count;
        &self.distances[start..start + self.node_count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{Edge, Graph};

    fn path_graph() -> Graph {
        // 0 -(1)- 1 -(2)- 2 -(1)- 3, plus a long 0-3 shortcut
        let edges = vec![
            Edge { source: 0, target: 1, length: 1.0 },
            Edge { source: 1, target: 2, length: 2.0 },
            Edge { source: 2, target: 3, length: 1.0 },
            Edge { source: 0, target: 3, length: 10.0 },
        ];
        Graph::from_edges(4, edges).unwrap()
    }

    #[test]
    fn test_hop_distances() {
        let graph = path_graph();
        let dist = single_source_distances(&graph, 0, Metric::Hops);
        assert_eq!(dist, vec![Some(0.0), Some(1.0), Some(2.0), Some(1.0)]);
    }

    #[test]
    fn test_length_distances_prefer_short_detour() {
        let graph = path_graph();
        assert_eq!(shortest_path_length(&graph, 0, 3, Metric::Length).unwrap(), 4.0);
        assert_eq!(shortest_path_length(&graph, 0, 3, Metric::Hops).unwrap(), 1.0);
    }

    #[test]
    fn test_distance_table_is_symmetric() {
        let graph = path_graph();
        let table = DistanceTable::build(&graph, Metric::Length).unwrap();
        for u in 0..4 {
            assert_eq!(table.get(u, u), 0.0);
            for v in 0..4 {
                assert_eq!(table.get(u, v), table.get(v, u));
            }
        }
        assert_eq!(table.row(1), &[1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_disconnected_graph_is_an_error() {
        let edges = vec![Edge { source: 0, target: 1, length: 1.0 }];
        let graph = Graph::from_edges(3, edges).unwrap();
        assert_eq!(
            DistanceTable::build(&graph, Metric::Hops),
            Err(TopologyError::DisconnectedGraph { from: 0, to: 2 })
        );
        assert_eq!(
            shortest_path_length(&graph, 2, 1, Metric::Length),
            Err(TopologyError::DisconnectedGraph { from: 2, to: 1 })
        );
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("weighted".parse::<Metric>(), Ok(Metric::Length));
        assert_eq!("Hops".parse::<Metric>(), Ok(Metric::Hops));
        assert!("euclid".parse::<Metric>().is_err());
    }
}
