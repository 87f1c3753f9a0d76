//! Graph analysis for endpoint selection.
//!
//! This module ranks routers by betweenness and closeness centrality and
//! searches node subsets for "fair" experiment endpoints: sets whose Voronoi
//! cells split the graph evenly and whose members are well connected.

pub mod types;
pub mod centrality;
pub mod voronoi;
pub mod subsets;
pub mod report;

pub use types::*;
pub use centrality::{betweenness_centrality, closeness_centrality, closeness_from_table};
pub use voronoi::voronoi_cells;
pub use subsets::{binomial, rank_node_subsets, rank_subsets_with_table, top_subsets, Combinations};
pub use report::{generate_json_report, generate_text_report};

use crate::error::Result;
use crate::graph::{DistanceTable, Graph, Metric};

/// What a full analysis run computes
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub metric: Metric,
    /// Endpoint set size; zero skips the subset search
    pub subset_size: usize,
    /// How many ranked subsets to keep in the report
    pub top: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            metric: Metric::Hops,
            subset_size: 4,
            top: 10,
        }
    }
}

/// Run centrality and subset ranking and collect the report.
pub fn analyze_graph(graph: &Graph, source: &str, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let betweenness = betweenness_centrality(graph, options.metric)?;
    let table = DistanceTable::build(graph, options.metric)?;
    let closeness = closeness_from_table(&table);

    let (top_subsets, subsets_evaluated) = if options.subset_size > 0 {
        let ranked = rank_subsets_with_table(&table, &closeness, options.subset_size)?;
        (top_subsets(&ranked, options.top).to_vec(), ranked.len())
    } else {
        (Vec::new(), 0)
    };

    let recommended_endpoints = top_subsets.first().map(SubsetScore::router_names);
    if let Some(ref endpoints) = recommended_endpoints {
        log::info!("Recommended endpoints: {}", endpoints.join(", "));
    }

    Ok(AnalysisReport {
        metadata: AnalysisMetadata {
            analysis_timestamp: chrono::Utc::now().to_rfc3339(),
            source: source.to_string(),
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
            metric: table.metric(),
            subset_size: options.subset_size,
            subsets_evaluated,
        },
        betweenness: betweenness.ranked(),
        closeness: closeness.ranked(),
        top_subsets,
        recommended_endpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Skeleton;
    use crate::topology::assign_chord_lengths;

    #[test]
    fn test_analyze_ring() {
        let mut skeleton = Skeleton::cycle(12);
        skeleton.add_edge(0, 6);
        let graph = assign_chord_lengths(&skeleton, 1000.0).unwrap();
        let options = AnalysisOptions {
            metric: Metric::Hops,
            subset_size: 3,
            top: 5,
        };
        let report = analyze_graph(&graph, "test", &options).unwrap();
        assert_eq!(report.metadata.subsets_evaluated, 220);
        assert_eq!(report.top_subsets.len(), 5);
        assert_eq!(report.betweenness.len(), 12);
        // The chord endpoints carry the most shortest paths
        assert!(report.betweenness[0].node == 0 || report.betweenness[0].node == 6);
        let endpoints = report.recommended_endpoints.unwrap();
        assert_eq!(endpoints, report.top_subsets[0].router_names());
    }

    #[test]
    fn test_analyze_without_subsets() {
        let graph = assign_chord_lengths(&Skeleton::cycle(5), 1.0).unwrap();
        let options = AnalysisOptions {
            subset_size: 0,
            ..AnalysisOptions::default()
        };
        let report = analyze_graph(&graph, "test", &options).unwrap();
        assert!(report.top_subsets.is_empty());
        assert!(report.recommended_endpoints.is_none());
    }
}
