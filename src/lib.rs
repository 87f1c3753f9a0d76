//! # qnetgen - Topology generator for quantum network simulations
//!
//! This library synthesizes quantum-router network topologies, writes them as
//! simulator descriptors, and analyzes generated graphs to pick well-placed
//! experiment endpoints.
//!
//! ## Overview
//!
//! A topology is an undirected graph of routers whose edges carry a physical
//! fiber length. Every edge becomes a quantum link in the descriptor, and every
//! pair of routers gets a classical link whose delay is proportional to the
//! shortest-path length between them.
//!
//! ## Key Features
//!
//! - **Ring with shortcuts**: a cycle on a circle plus random chords, with
//!   chord-length edge weights
//! - **Barabási–Albert**: preferential-attachment graphs placed with a
//!   force-directed layout, weighted by Euclidean distance
//! - **Reproducible**: every generator is driven by an explicit seed
//! - **Endpoint analysis**: betweenness and closeness centrality plus a search
//!   over node subsets for even Voronoi partitions
//!
//! ## Architecture
//!
//! - `graph`: graph types, shortest paths and the edge-list format
//! - `topology`: synthesis models, layout and the simulator descriptor
//! - `analysis`: centrality, Voronoi cells, subset ranking and reports
//! - `config`: type-safe configuration structures
//! - `config_loader`: YAML configuration loading
//! - `orchestrator`: high-level generation of descriptor and edge list
//! - `utils`: utility functions and helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use qnetgen::{config_loader, orchestrator};
//!
//! // Load configuration from YAML file
//! let config = config_loader::load_config(Path::new("ring.yaml"))?;
//!
//! // Generate the topology
//! let generated = orchestrator::generate_topology(&config, Path::new("topology_output"))?;
//!
//! // The output directory now contains:
//! // - <name>.json: simulator topology descriptor
//! // - <name>.edgelist: weighted edge list for later analysis
//! println!("{} routers", generated.graph.node_count());
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! general:
//!   name: ring
//!   stop_time: "6s"
//!   memo_size: 20
//!
//! network:
//!   model: ring          # or barabasi_albert
//!   nodes: 20
//!   shortcuts: 5
//!   seed: 0
//!   radius: 1000
//!
//! links:
//!   attenuation: 0.002
//!   delay_scale: 1000000
//! ```
//!
//! ## Error Handling
//!
//! Graph and topology operations return [`error::TopologyError`]. File and
//! CLI boundaries use `color_eyre` for error reporting with context.

pub mod error;
pub mod graph;
pub mod topology;
pub mod analysis;
pub mod config;
pub mod config_loader;
pub mod orchestrator;
pub mod utils;
