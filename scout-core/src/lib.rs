//! SCOUT Core - Entity Types
//!
//! Data types and pure logic shared by the whole workspace: school records,
//! conversation starters, priority classification, error taxonomy and
//! configuration. No I/O lives here.

mod config;
mod enums;
mod error;
mod models;
pub mod ranker;

pub use config::{FeatureFlags, ScoutConfig};
pub use enums::{Priority, StarterSource};
pub use error::{
    CacheError, ConfigError, DirectoryError, GenerationError, ScoutError, ScoutResult,
};
pub use models::{
    format_gbp, Contact, ConversationStarter, FinancialProfile, ImprovementArea, OfstedSummary,
    School, SendProfile, PRIORITY_HIGH_THRESHOLD, PRIORITY_MEDIUM_THRESHOLD,
};
pub use ranker::{rank_by_priority, rank_schools};

/// Timestamp type using UTC timezone.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
