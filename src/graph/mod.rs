//! Graph representation shared by synthesis, serialization and analysis.

pub mod types;
pub mod paths;
pub mod edgelist;

pub use types::{Edge, Graph, NodeId, Skeleton};
pub use paths::{shortest_path_length, single_source_distances, DistanceTable, Metric};
pub use edgelist::{load_edgelist, parse_edgelist, save_edgelist, write_edgelist};
