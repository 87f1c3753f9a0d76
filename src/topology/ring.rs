//! Ring-with-shortcuts synthesis and chord-length weighting.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::{Result, TopologyError};
use crate::graph::{Graph, NodeId, Skeleton};

/// Sampling attempts allowed per requested shortcut, scaled by `n²`.
const SAMPLING_BUDGET_FACTOR: u64 = 64;

/// Build a cycle on `nodes` nodes and add `shortcuts` random chords.
///
/// Pairs are sampled uniformly; self-pairs and existing edges are discarded
/// and re-sampled without counting. The result has exactly
/// `nodes + shortcuts` edges.
///
/// # Errors
/// * `Configuration` if `nodes < 3`, if fewer than `shortcuts` free pairs
///   exist, or if the sampling budget runs out.
pub fn generate_ring<R: Rng + ?Sized>(nodes: usize, shortcuts: usize, rng: &mut R) -> Result<Skeleton> {
    if nodes < 3 {
        return Err(TopologyError::Configuration(format!(
            "ring needs at least 3 nodes, got {}",
            nodes
        )));
    }

    let free_pairs = nodes * (nodes - 1) / 2 - nodes;
    if shortcuts > free_pairs {
        return Err(TopologyError::Configuration(format!(
            "cannot add {} shortcuts to a {}-node ring: only {} distinct pairs remain",
            shortcuts, nodes, free_pairs
        )));
    }

    let mut skeleton = Skeleton::cycle(nodes);
    let budget = (shortcuts as u64 + 1) * (nodes * nodes) as u64 * SAMPLING_BUDGET_FACTOR;
    let mut attempts = 0u64;
    let mut added = 0;

    while added < shortcuts {
        if attempts >= budget {
            return Err(TopologyError::Configuration(format!(
                "gave up after {} samples with {} of {} shortcuts placed",
                attempts, added, shortcuts
            )));
        }
        attempts += 1;

        let i = rng.gen_range(0..nodes);
        let j = rng.gen_range(0..nodes);
        if skeleton.add_edge(i, j) {
            log::debug!("Added shortcut {}-{}", i, j);
            added += 1;
        }
    }

    log::debug!(
        "Ring synthesized: {} nodes, {} edges after {} samples",
        nodes,
        skeleton.edge_count(),
        attempts
    );
    Ok(skeleton)
}

/// Circular offset between two nodes on an `n`-node ring.
pub fn circular_offset(u: NodeId, v: NodeId, n: usize) -> usize {
    let d = (v + n - u % n) % n;
    d.min(n - d)
}

/// Straight-line distance between nodes `k` positions apart on a circle.
///
/// This is the base of the isosceles triangle with apex angle `2πk/n`.
pub fn chord_length(k: usize, n: usize, radius: f64) -> f64 {
    2.0 * radius * (PI * k as f64 / n as f64).sin()
}

/// Weight every edge with its chord length on a circle of `radius`.
pub fn assign_chord_lengths(skeleton: &Skeleton, radius: f64) -> Result<Graph> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(TopologyError::Configuration(format!(
            "ring radius must be positive, got {}",
            radius
        )));
    }
    let n = skeleton.node_count();
    Graph::from_skeleton(skeleton, |u, v| chord_length(circular_offset(u, v, n), n, radius))
}
