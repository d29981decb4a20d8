//! SCOUT Intel - Orchestration
//!
//! The layer that turns raw school records into sales intelligence: the
//! directory boundary over the dataset, the starter merger, and the
//! `SchoolIntelligence` service that drives cache, generators and ranking
//! per request.

mod directory;
mod merger;
mod service;

pub use directory::{DirectoryStats, InMemoryDirectory, SchoolDirectory};
pub use merger::merge_starters;
pub use service::SchoolIntelligence;
