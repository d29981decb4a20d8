//! Enum types for SCOUT entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE ENUMS
// ============================================================================

/// Originating analysis source of a conversation starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterSource {
    /// Financial benchmarking analysis
    Financial,
    /// Ofsted inspection-report analysis
    Ofsted,
    /// Special educational needs analysis
    Send,
    /// Anything else (manual entry, legacy imports)
    Other,
}

impl fmt::Display for StarterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StarterSource::Financial => "financial",
            StarterSource::Ofsted => "ofsted",
            StarterSource::Send => "send",
            StarterSource::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// Sales-priority classification for a school.
///
/// The variant order is the canonical ranking order: `High` outranks
/// `Medium`, which outranks `Low`; `Unknown` always sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl Priority {
    /// Fixed rank used for ordering: High = 0 .. Unknown = 3.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Unknown => 3,
        }
    }

    /// The higher-priority of two classifications.
    pub fn max(self, other: Priority) -> Priority {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            "UNKNOWN" => Ok(Priority::Unknown),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}
