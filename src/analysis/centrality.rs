//! Betweenness and closeness centrality.

use std::collections::BinaryHeap;

use crate::error::{Result, TopologyError};
use crate::graph::paths::HeapEntry;
use crate::graph::{DistanceTable, Graph, Metric, NodeId};

use super::types::CentralityScores;

/// Shortest-path DAG from one source, as Brandes' accumulation needs it.
struct ShortestPathDag {
    /// Nodes in non-decreasing distance order
    order: Vec<NodeId>,
    /// Predecessors on shortest paths
    preds: Vec<Vec<NodeId>>,
    /// Number of shortest paths from the source
    sigma: Vec<f64>,
}

fn shortest_path_dag(graph: &Graph, source: NodeId, metric: Metric) -> ShortestPathDag {
    let n = graph.node_count();
    let mut dist: Vec<Option<f64>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut preds = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    let mut order = Vec::with_capacity(n);
    let mut heap = BinaryHeap::new();

    dist[source] = Some(0.0);
    sigma[source] = 1.0;
    heap.push(HeapEntry { cost: 0.0, node: source });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        order.push(node);

        for (next, length) in graph.neighbors(node) {
            if settled[next] {
                continue;
            }
            let candidate = cost + metric.edge_cost(length);
            match dist[next] {
                Some(known) if candidate == known => {
                    sigma[next] += sigma[node];
                    preds[next].push(node);
                }
                Some(known) if candidate > known => {}
                _ => {
                    dist[next] = Some(candidate);
                    sigma[next] = sigma[node];
                    preds[next] = vec![node];
                    heap.push(HeapEntry { cost: candidate, node: next });
                }
            }
        }
    }

    ShortestPathDag { order, preds, sigma }
}

/// Normalized betweenness centrality (Brandes).
///
/// The fraction of shortest paths between pairs of other nodes that pass
/// through each node, divided by the `(n-1)(n-2)/2` such pairs. Graphs with
/// two or fewer nodes score zero everywhere.
///
/// # Errors
/// * `DisconnectedGraph` if some node cannot reach another.
pub fn betweenness_centrality(graph: &Graph, metric: Metric) -> Result<CentralityScores> {
    let n = graph.node_count();
    let mut betweenness = vec![0.0; n];

    for source in 0..n {
        let ShortestPathDag { mut order, preds, sigma } = shortest_path_dag(graph, source, metric);
        if order.len() < n {
            let to = (0..n).find(|v| !order.contains(v)).unwrap_or(source);
            return Err(TopologyError::DisconnectedGraph { from: source, to });
        }

        let mut delta = vec![0.0; n];
        while let Some(w) = order.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                betweenness[w] += delta[w];
            }
        }
    }

    // Every pair was counted once from each end.
    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut betweenness {
            *value *= scale;
        }
    }

    Ok(CentralityScores::new(betweenness))
}

/// Normalized closeness centrality: `(n-1) / Σ d(v, u)`.
///
/// # Errors
/// * `DisconnectedGraph` if some node cannot reach another.
pub fn closeness_centrality(graph: &Graph, metric: Metric) -> Result<CentralityScores> {
    let table = DistanceTable::build(graph, metric)?;
    Ok(closeness_from_table(&table))
}

/// Closeness centrality over an already computed distance table.
pub fn closeness_from_table(table: &DistanceTable) -> CentralityScores {
    let n = table.node_count();
    let scores = (0..n)
        .map(|v| {
            let total: f64 = table.row(v).iter().sum();
            if total > 0.0 {
                (n - 1) as f64 / total
            } else {
                0.0
            }
        })
        .collect();
    CentralityScores::new(scores)
}
