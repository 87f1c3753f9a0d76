//! Report generation for graph analysis.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;

/// Generate JSON report
pub fn generate_json_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Render a centrality ranking, one `LABEL(node): score` line per node.
pub fn format_centrality(label: &str, ranking: &[RankedNode]) -> Vec<String> {
    ranking
        .iter()
        .map(|r| format!("{}({:>2}): {}", label, r.node, r.score))
        .collect()
}

/// Render the subset table, best first.
pub fn format_subset_table(subsets: &[SubsetScore]) -> Vec<String> {
    let mut lines = Vec::with_capacity(subsets.len() + 2);
    lines.push(format!(
        "{:<4} {:<24} {:<20} {:>10} {:>12} {:>12}",
        "rank", "nodes", "cell sizes", "vc_var", "cc_mean", "cc_var"
    ));
    lines.push("-".repeat(87));
    for (rank, subset) in subsets.iter().enumerate() {
        let nodes = subset
            .nodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let sizes = subset
            .cell_sizes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "{:<4} {:<24} {:<20} {:>10.4} {:>12.5} {:>12.3e}",
            rank + 1,
            format!("({})", nodes),
            format!("[{}]", sizes),
            subset.voronoi_variance,
            subset.closeness_mean,
            subset.closeness_variance
        ));
    }
    lines
}

/// Build the full text report.
pub fn format_text_report(report: &AnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                        QNETGEN TOPOLOGY ANALYSIS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Analysis Date: {}", report.metadata.analysis_timestamp));
    lines.push(format!("Source: {}", report.metadata.source));
    lines.push(format!("Nodes: {}", report.metadata.total_nodes));
    lines.push(format!("Edges: {}", report.metadata.total_edges));
    lines.push(format!("Distance metric: {}", report.metadata.metric));
    lines.push(String::new());

    lines.push("Betweenness Centrality:".to_string());
    lines.extend(format_centrality("BC", &report.betweenness).into_iter().map(|l| format!("  {}", l)));
    lines.push(String::new());

    lines.push("Closeness Centrality:".to_string());
    lines.extend(format_centrality("CC", &report.closeness).into_iter().map(|l| format!("  {}", l)));
    lines.push(String::new());

    if report.metadata.subset_size > 0 {
        lines.push(format!(
            "Top {} of {} endpoint sets of size {}:",
            report.top_subsets.len(),
            report.metadata.subsets_evaluated,
            report.metadata.subset_size
        ));
        lines.extend(format_subset_table(&report.top_subsets));
        lines.push(String::new());
    }

    if let Some(ref endpoints) = report.recommended_endpoints {
        lines.push(format!("Recommended endpoints: {}", endpoints.join(", ")));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Generate human-readable text report
pub fn generate_text_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    fs::write(output_path, format_text_report(report))
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a short summary to stdout
pub fn print_summary(report: &AnalysisReport) {
    println!("\n=== TOPOLOGY ANALYSIS SUMMARY ===\n");
    println!("Nodes: {}", report.metadata.total_nodes);
    println!("Edges: {}", report.metadata.total_edges);
    println!("Metric: {}", report.metadata.metric);

    if let Some(top) = report.betweenness.first() {
        println!("\nHighest betweenness: {} ({:.4})", top.name, top.score);
    }
    if let Some(top) = report.closeness.first() {
        println!("Highest closeness: {} ({:.4})", top.name, top.score);
    }

    if let Some(best) = report.top_subsets.first() {
        println!("\nBest endpoint set: {:?}", best.nodes);
        println!("  Cell sizes: {:?}", best.cell_sizes);
        println!("  Voronoi variance: {:.4}", best.voronoi_variance);
        println!("  Closeness mean/var: {:.5} / {:.3e}", best.closeness_mean, best.closeness_variance);
    }

    println!();
}
