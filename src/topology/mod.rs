//! Network topology module.
//!
//! This module contains the topology synthesizers (ring with shortcuts,
//! Barabási–Albert), the two weight assigners (chord length, spring layout)
//! and the serializer that turns a weighted graph into the simulator's
//! topology descriptor.

pub mod types;
pub mod ring;
pub mod barabasi_albert;
pub mod layout;
pub mod descriptor;

// Re-export key types and functions for easier access
pub use types::{BarabasiAlbertParams, NetworkModel, RingParams};
pub use ring::{assign_chord_lengths, generate_ring};
pub use barabasi_albert::generate_barabasi_albert;
pub use layout::{assign_layout_lengths, spring_layout};
pub use descriptor::{
    build_descriptor, render_descriptor, router_name, write_descriptor, DescriptorParams, TopologyDescriptor,
};
