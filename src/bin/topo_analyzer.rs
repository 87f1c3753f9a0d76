//! Topology analysis CLI for generated quantum networks.
//!
//! Ranks routers by centrality and searches for evenly spread experiment
//! endpoints in a weighted edge list.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};

use qnetgen::analysis::{self, report::print_summary, AnalysisOptions, AnalysisReport};
use qnetgen::graph::{load_edgelist, Graph, Metric, NodeId};
use qnetgen::topology::router_name;

#[derive(Parser)]
#[command(name = "topo-analyzer")]
#[command(about = "Centrality and endpoint analysis for generated topologies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the edge list written by qnetgen
    graph: PathBuf,

    /// Output directory for reports
    #[arg(short, long, default_value = "analysis_output")]
    output: PathBuf,

    /// Distance metric (hops, length)
    #[arg(short, long, default_value = "hops")]
    metric: Metric,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run full analysis (centrality + endpoint subsets)
    Full {
        /// Endpoint set size
        #[arg(short, long, default_value = "4")]
        k: usize,

        /// Number of ranked subsets to report
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Rank routers by betweenness and closeness only
    Centrality,

    /// Rank endpoint subsets and print the table
    Subsets {
        /// Endpoint set size
        #[arg(short, long, default_value = "4")]
        k: usize,

        /// Number of ranked subsets to report
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Show the Voronoi cells of a chosen endpoint set
    Cells {
        /// Endpoint node ids
        #[arg(required = true, num_args = 1..)]
        nodes: Vec<NodeId>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    // Set thread pool size
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    log::info!("Loading graph from {}...", cli.graph.display());
    let graph = load_edgelist(&cli.graph)?;
    log::info!(
        "Loaded {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    match cli.command {
        Commands::Full { k, top } => {
            let options = AnalysisOptions {
                metric: cli.metric,
                subset_size: k,
                top,
            };
            let report = run_analysis(&cli.graph, &graph, &options)?;
            write_reports(&cli.output, "analysis_report", &report)?;
            print_summary(&report);
        }
        Commands::Centrality => {
            let options = AnalysisOptions {
                metric: cli.metric,
                subset_size: 0,
                top: 0,
            };
            let report = run_analysis(&cli.graph, &graph, &options)?;
            write_reports(&cli.output, "centrality_report", &report)?;
            for line in analysis::report::format_centrality("BC", &report.betweenness) {
                println!("{}", line);
            }
            println!();
            for line in analysis::report::format_centrality("CC", &report.closeness) {
                println!("{}", line);
            }
        }
        Commands::Subsets { k, top } => {
            let options = AnalysisOptions {
                metric: cli.metric,
                subset_size: k,
                top,
            };
            let report = run_analysis(&cli.graph, &graph, &options)?;
            write_reports(&cli.output, "subset_report", &report)?;
            for line in analysis::report::format_subset_table(&report.top_subsets) {
                println!("{}", line);
            }
        }
        Commands::Cells { nodes } => {
            let cells = analysis::voronoi_cells(&graph, &nodes, cli.metric)?;
            println!("\n=== VORONOI CELLS ({}) ===\n", cli.metric);
            for (seed, cell) in nodes.iter().zip(&cells) {
                println!("{} ({} nodes): {:?}", router_name(*seed), cell.len(), cell);
            }
            println!();
        }
    }

    Ok(())
}

fn run_analysis(source: &Path, graph: &Graph, options: &AnalysisOptions) -> Result<AnalysisReport> {
    if options.subset_size > graph.node_count() {
        bail!(
            "Endpoint set size {} exceeds node count {}",
            options.subset_size,
            graph.node_count()
        );
    }
    let report = analysis::analyze_graph(graph, &source.display().to_string(), options)
        .context("Topology analysis failed")?;
    Ok(report)
}

fn write_reports(output_dir: &Path, stem: &str, report: &AnalysisReport) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    analysis::generate_json_report(report, &output_dir.join(format!("{}.json", stem)))?;
    analysis::generate_text_report(report, &output_dir.join(format!("{}.txt", stem)))?;

    log::info!("Analysis complete. Reports written to {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_defaults() {
        let cli = Cli::parse_from(["topo-analyzer", "ring.edgelist", "full"]);
        assert_eq!(cli.graph, PathBuf::from("ring.edgelist"));
        assert_eq!(cli.metric, Metric::Hops);
        assert_eq!(cli.output, PathBuf::from("analysis_output"));
        assert!(matches!(cli.command, Commands::Full { k: 4, top: 10 }));
    }

    #[test]
    fn test_weighted_cells() {
        let cli = Cli::parse_from([
            "topo-analyzer", "ba.edgelist", "--metric", "length", "cells", "0", "5", "9",
        ]);
        assert_eq!(cli.metric, Metric::Length);
        match cli.command {
            Commands::Cells { nodes } => assert_eq!(nodes, vec![0, 5, 9]),
            _ => panic!("expected cells subcommand"),
        }
    }

    #[test]
    fn test_rejects_unknown_metric() {
        assert!(Cli::try_parse_from(["topo-analyzer", "g.edgelist", "--metric", "euclid", "centrality"]).is_err());
    }
}
