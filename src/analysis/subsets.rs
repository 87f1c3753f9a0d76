//! Balanced endpoint-set search.
//!
//! Every `k`-subset of nodes is scored by how evenly its Voronoi cells split
//! the graph and by the closeness of its members. The search enumerates all
//! `C(n, k)` subsets against one precomputed distance table, costing
//! `O(C(n, k) · n · k)` after the table is built. That is only tractable for
//! the small experimental topologies this crate targets (tens of nodes,
//! `k` around four).

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::{Result, TopologyError};
use crate::graph::{DistanceTable, Graph, Metric, NodeId};

use super::centrality::closeness_from_table;
use super::types::{CentralityScores, SubsetScore};
use super::voronoi::cell_sizes;

/// Lexicographic iterator over the `k`-subsets of `0..n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let current = if k <= n { Some((0..k).collect()) } else { None };
        Self { n, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let k = current.len();

        // Advance the rightmost index that still has room.
        let mut next = current.clone();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if next[i] < self.n - k + i {
                next[i] += 1;
                for j in i + 1..k {
                    next[j] = next[j - 1] + 1;
                }
                self.current = Some(next);
                return Some(current);
            }
        }
        Some(current)
    }
}

/// `C(n, k)`, saturating at `usize::MAX`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by the sample count).
fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Score a single subset against a distance table.
pub fn score_subset(table: &DistanceTable, closeness: &CentralityScores, seeds: &[NodeId]) -> SubsetScore {
    let sizes = cell_sizes(table, seeds);
    let size_values: Vec<f64> = sizes.iter().map(|&s| s as f64).collect();
    let closeness_values: Vec<f64> = seeds.iter().map(|&s| closeness.get(s)).collect();

    SubsetScore {
        nodes: seeds.to_vec(),
        cell_sizes: sizes,
        voronoi_variance: variance(&size_values),
        closeness_mean: mean(&closeness_values),
        closeness_variance: variance(&closeness_values),
    }
}

/// Ranking order: ascending Voronoi variance, then descending mean closeness.
pub fn compare_scores(a: &SubsetScore, b: &SubsetScore) -> Ordering {
    a.voronoi_variance
        .total_cmp(&b.voronoi_variance)
        .then_with(|| b.closeness_mean.total_cmp(&a.closeness_mean))
}

/// Rank every `k`-subset using a precomputed table and closeness scores.
///
/// Subsets are scored in parallel; the result order does not depend on
/// scheduling because scoring preserves enumeration order and the sort is
/// stable.
pub fn rank_subsets_with_table(
    table: &DistanceTable,
    closeness: &CentralityScores,
    k: usize,
) -> Result<Vec<SubsetScore>> {
    let n = table.node_count();
    if k == 0 || k > n {
        return Err(TopologyError::InvalidArgument(format!(
            "subset size must be between 1 and {} (node count), got {}",
            n, k
        )));
    }
    if closeness.len() != n {
        return Err(TopologyError::InvalidArgument(format!(
            "closeness scores cover {} nodes, distance table covers {}",
            closeness.len(),
            n
        )));
    }

    log::info!("Scoring {} subsets of size {} over {} nodes", binomial(n, k), k, n);
    let subsets: Vec<Vec<NodeId>> = Combinations::new(n, k).collect();
    let mut scored: Vec<SubsetScore> = subsets
        .par_iter()
        .map(|seeds| score_subset(table, closeness, seeds))
        .collect();
    scored.sort_by(compare_scores);
    Ok(scored)
}

/// The best `limit` entries of a ranking.
pub fn top_subsets(ranked: &[SubsetScore], limit: usize) -> &[SubsetScore] {
    &ranked[..limit.min(ranked.len())]
}

/// Rank every `k`-subset of `graph`'s nodes, best first.
///
/// # Errors
/// * `InvalidArgument` if `k` is zero or exceeds the node count.
/// * `DisconnectedGraph` if the graph is not connected.
pub fn rank_node_subsets(graph: &Graph, k: usize, metric: Metric) -> Result<Vec<SubsetScore>> {
    if k == 0 || k > graph.node_count() {
        return Err(TopologyError::InvalidArgument(format!(
            "subset size must be between 1 and {} (node count), got {}",
            graph.node_count(),
            k
        )));
    }
    let table = DistanceTable::build(graph, metric)?;
    let closeness = closeness_from_table(&table);
    rank_subsets_with_table(&table, &closeness, k)
}
