//! Shared utilities.

pub mod duration;
pub mod staged;

pub use duration::parse_duration_to_picoseconds;
pub use staged::StagedFile;
