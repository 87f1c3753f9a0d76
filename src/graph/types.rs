//! Graph type definitions.
//!
//! Two representations are used. A [`Skeleton`] is the unweighted edge set a
//! generator produces; a [`Graph`] is the frozen, fully weighted graph every
//! downstream consumer works on. The only way from one to the other is
//! weight assignment, so a `Graph` never carries an edge without a length.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};

/// Node identifier. Nodes of an `n`-node graph are `0..n`.
pub type NodeId = usize;

/// Normalize an unordered pair so the smaller id comes first.
fn ordered(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Unweighted undirected graph produced by the synthesizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    adjacency: Vec<BTreeSet<NodeId>>,
    edge_count: usize,
}

impl Skeleton {
    /// Create a skeleton with `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Cycle graph: node `i` is connected to `i + 1 mod n`.
    pub fn cycle(node_count: usize) -> Self {
        let mut skeleton = Self::new(node_count);
        for i in 0..node_count {
            skeleton.add_edge(i, (i + 1) % node_count);
        }
        skeleton
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if an edge between `u` and `v` exists.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency.get(u).map_or(false, |n| n.contains(&v))
    }

    /// Add the undirected edge `u - v`.
    ///
    /// Returns false, leaving the skeleton untouched, for self-loops,
    /// duplicate edges and out-of-range endpoints.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let n = self.node_count();
        if u == v || u >= n || v >= n || self.has_edge(u, v) {
            return false;
        }
        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
        self.edge_count += 1;
        true
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    /// Degree of every node in index order.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(BTreeSet::len).collect()
    }

    /// Edges as `(u, v)` with `u < v`, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| neighbors.range(u + 1..).map(move |&v| (u, v)))
    }
}

/// A weighted undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Physical length of the link, strictly positive.
    pub length: f64,
}

/// Frozen weighted undirected graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    adjacency: Vec<BTreeMap<NodeId, f64>>,
    edges: BTreeMap<(NodeId, NodeId), f64>,
}

impl Graph {
    /// Weight every edge of `skeleton` with `length(u, v)` (called with `u < v`).
    pub fn from_skeleton<F>(skeleton: &Skeleton, mut length: F) -> Result<Self>
    where
        F: FnMut(NodeId, NodeId) -> f64,
    {
        let mut graph = Self::empty(skeleton.node_count());
        for (u, v) in skeleton.edges() {
            graph
                .insert(u, v, length(u, v))
                .map_err(TopologyError::Configuration)?;
        }
        Ok(graph)
    }

    /// Build a graph from an explicit edge list.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::empty(node_count);
        for edge in edges {
            graph
                .insert(edge.source, edge.target, edge.length)
                .map_err(TopologyError::InvalidArgument)?;
        }
        Ok(graph)
    }

    pub(crate) fn empty(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); node_count],
            edges: BTreeMap::new(),
        }
    }

    /// Insert one edge, enforcing the graph invariants.
    pub(crate) fn insert(&mut self, u: NodeId, v: NodeId, length: f64) -> std::result::Result<(), String> {
        let n = self.node_count();
        if u >= n || v >= n {
            return Err(format!("edge {}-{} references a node outside 0..{}", u, v, n));
        }
        if u == v {
            return Err(format!("self-loop on node {}", u));
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(format!("edge {}-{} has non-positive length {}", u, v, length));
        }
        let key = ordered(u, v);
        if self.edges.contains_key(&key) {
            return Err(format!("duplicate edge {}-{}", key.0, key.1));
        }
        self.edges.insert(key, length);
        self.adjacency[u].insert(v, length);
        self.adjacency[v].insert(u, length);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in ascending `(min, max)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|(&(source, target), &length)| Edge {
            source,
            target,
            length,
        })
    }

    /// Length of the edge between `u` and `v`, if any.
    pub fn length(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.edges.get(&ordered(u, v)).copied()
    }

    /// Neighbors of `node` with the connecting edge length, ascending by id.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|n| n.iter().map(|(&v, &len)| (v, len)))
    }

    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(BTreeMap::len).collect()
    }
}
