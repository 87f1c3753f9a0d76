//! Topology generation orchestrator.
//!
//! This module coordinates the overall generation process, managing the flow
//! from a validated configuration through graph synthesis to the descriptor
//! and edge list written into the output directory.

use crate::config::Config;
use crate::graph::{write_edgelist, Graph};
use crate::topology::{build_descriptor, render_descriptor, TopologyDescriptor};
use crate::utils::staged::StagedFile;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything produced by one generation run
#[derive(Debug, Clone)]
pub struct GeneratedTopology {
    pub graph: Graph,
    pub descriptor: TopologyDescriptor,
    pub descriptor_path: PathBuf,
    pub edgelist_path: PathBuf,
}

/// Output paths for a topology called `name`
pub fn output_paths(output_dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        output_dir.join(format!("{}.json", name)),
        output_dir.join(format!("{}.edgelist", name)),
    )
}

/// Synthesize the configured network and write its descriptor and edge list
pub fn generate_topology(config: &Config, output_dir: &Path) -> Result<GeneratedTopology> {
    config.validate()?;
    let params = config.descriptor_params()?;

    info!(
        "Generating {} topology '{}' with {} nodes",
        config.network.label(),
        config.general.name,
        config.network.node_count()
    );

    let graph = config
        .network
        .synthesize()
        .wrap_err("Failed to synthesize network graph")?;

    info!(
        "Synthesized graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    debug!("Degree sequence: {:?}", graph.degrees());

    let descriptor = build_descriptor(&graph, &params)
        .wrap_err("Failed to build topology descriptor")?;
    info!(
        "Descriptor: {} routers, {} quantum links, {} classical links",
        descriptor.nodes.len(),
        descriptor.qconnections.len(),
        descriptor.cconnections.len()
    );

    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let name = config.general.name.trim();
    let (descriptor_path, edgelist_path) = output_paths(output_dir, name);

    // Both artifacts are staged before either is moved into place.
    let descriptor_json = render_descriptor(&descriptor)?;
    let staged_edgelist = StagedFile::write(&edgelist_path, &write_edgelist(&graph))?;
    let staged_descriptor = StagedFile::write(&descriptor_path, &descriptor_json)?;

    staged_edgelist
        .commit()
        .wrap_err("Failed to write edge list")?;
    if let Err(e) = staged_descriptor.commit() {
        if let Err(remove_err) = fs::remove_file(&edgelist_path) {
            warn!("Failed to remove {:?}: {}", edgelist_path, remove_err);
        }
        return Err(e.wrap_err("Failed to write topology descriptor"));
    }

    info!("Wrote descriptor to {:?}", descriptor_path);
    info!("Wrote edge list to {:?}", edgelist_path);

    Ok(GeneratedTopology {
        graph,
        descriptor,
        descriptor_path,
        edgelist_path,
    })
}
