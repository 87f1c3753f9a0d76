//! Preferential-attachment ("BA") synthesis.

use std::iter;

use rand::Rng;

use crate::error::{Result, TopologyError};
use crate::graph::{NodeId, Skeleton};

/// Barabási–Albert graph on `nodes` nodes.
///
/// Starts from a star on `attach_edges + 1` nodes centred on node 0. Every
/// further node attaches to `attach_edges` distinct existing nodes drawn with
/// probability proportional to their current degree.
pub fn generate_barabasi_albert<R: Rng + ?Sized>(
    nodes: usize,
    attach_edges: usize,
    rng: &mut R,
) -> Result<Skeleton> {
    if attach_edges < 1 || attach_edges >= nodes {
        return Err(TopologyError::Configuration(format!(
            "Barabási–Albert requires 1 <= attach_edges < nodes, got attach_edges={} nodes={}",
            attach_edges, nodes
        )));
    }

    let mut skeleton = Skeleton::new(nodes);
    for leaf in 1..=attach_edges {
        skeleton.add_edge(0, leaf);
    }

    // Each node appears once per incident edge, so a uniform pick from this
    // list is a degree-proportional pick.
    let mut repeated: Vec<NodeId> = (0..=attach_edges)
        .flat_map(|node| iter::repeat(node).take(skeleton.degree(node)))
        .collect();

    for source in attach_edges + 1..nodes {
        let targets = degree_weighted_subset(&repeated, attach_edges, rng);
        for &target in &targets {
            skeleton.add_edge(source, target);
        }
        repeated.extend(targets);
        repeated.extend(iter::repeat(source).take(attach_edges));
    }

    log::debug!(
        "Barabási–Albert synthesized: {} nodes, {} edges",
        nodes,
        skeleton.edge_count()
    );
    Ok(skeleton)
}

/// Draw `count` distinct values from `pool`, in the order first drawn.
fn degree_weighted_subset<R: Rng + ?Sized>(pool: &[NodeId], count: usize, rng: &mut R) -> Vec<NodeId> {
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let candidate = pool[rng.gen_range(0..pool.len())];
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    picked
}
