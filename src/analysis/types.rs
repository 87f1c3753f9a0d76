//! Analysis result types.

use serde::{Deserialize, Serialize};

use crate::graph::{Metric, NodeId};
use crate::topology::router_name;

/// Per-node centrality scores, indexed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityScores {
    scores: Vec<f64>,
}

impl CentralityScores {
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    pub fn get(&self, node: NodeId) -> f64 {
        self.scores[node]
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// Nodes ordered by descending score; equal scores keep ascending id order.
    pub fn ranked(&self) -> Vec<RankedNode> {
        let mut ranked: Vec<RankedNode> = self
            .scores
            .iter()
            .enumerate()
            .map(|(node, &score)| RankedNode {
                node,
                name: router_name(node),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

/// One row of a centrality ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub node: NodeId,
    /// Simulator router name for the node
    pub name: String,
    pub score: f64,
}

/// Balance score of one candidate endpoint set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetScore {
    /// Seed nodes in ascending order
    pub nodes: Vec<NodeId>,
    /// Voronoi cell size of each seed, aligned with `nodes`
    pub cell_sizes: Vec<usize>,
    /// Population variance of `cell_sizes`
    pub voronoi_variance: f64,
    /// Mean closeness centrality of the seeds
    pub closeness_mean: f64,
    /// Population variance of the seeds' closeness centrality
    pub closeness_variance: f64,
}

impl SubsetScore {
    /// Router names of the seeds, usable as experiment endpoints.
    pub fn router_names(&self) -> Vec<String> {
        subset_node_names(&self.nodes)
    }
}

/// Simulator node names (`r{i}`) for a set of node ids.
pub fn subset_node_names(nodes: &[NodeId]) -> Vec<String> {
    nodes.iter().map(|&n| router_name(n)).collect()
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_timestamp: String,
    pub source: String,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub metric: Metric,
    pub subset_size: usize,
    pub subsets_evaluated: usize,
}

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: AnalysisMetadata,
    pub betweenness: Vec<RankedNode>,
    pub closeness: Vec<RankedNode>,
    /// Best-ranked subsets, best first
    pub top_subsets: Vec<SubsetScore>,
    /// Router names of the best subset, if any subset was ranked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_endpoints: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_orders_descending_with_stable_ties() {
        let scores = CentralityScores::new(vec![0.2, 0.5, 0.2, 0.9]);
        let order: Vec<NodeId> = scores.ranked().iter().map(|r| r.node).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
        assert_eq!(scores.ranked()[0].name, "r3");
    }

    #[test]
    fn test_subset_router_names() {
        let score = SubsetScore {
            nodes: vec![0, 7, 12],
            cell_sizes: vec![5, 5, 5],
            voronoi_variance: 0.0,
            closeness_mean: 0.3,
            closeness_variance: 0.0,
        };
        assert_eq!(score.router_names(), vec!["r0", "r7", "r12"]);
    }
}
