//! Reference-data boundary.
//!
//! How school records reach the process (flat files, a database, an API) is
//! the host's concern; the service only needs lookups over whatever the host
//! loaded. `InMemoryDirectory` is the provided implementation and is enough
//! for hosts that load a dataset at startup.

use scout_core::{Priority, School, ScoutResult};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Aggregate figures over a directory's dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectoryStats {
    pub total_schools: usize,
    /// Schools whose combined priority is HIGH
    pub high_priority: usize,
    /// Schools with headteacher contact details
    pub with_contacts: usize,
    /// Distinct local authorities represented
    pub local_authorities: usize,
}

/// Lookup surface over the school dataset.
pub trait SchoolDirectory: Send + Sync {
    /// Resolve a school by display name, exact match.
    fn school_by_name(&self, name: &str) -> Option<School>;

    fn all_schools(&self) -> Vec<School>;

    /// All display names, sorted.
    fn school_names(&self) -> Vec<String>;

    fn statistics(&self) -> DirectoryStats;

    /// Reload from the backing source, where one exists.
    fn refresh(&self) -> ScoutResult<()>;
}

struct DirectoryState {
    schools: Vec<School>,
    by_name: HashMap<String, usize>,
}

impl DirectoryState {
    fn index(schools: Vec<School>) -> Self {
        let by_name = schools
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        Self { schools, by_name }
    }
}

/// Directory over a dataset held in memory.
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    pub fn new(schools: Vec<School>) -> Self {
        Self {
            state: RwLock::new(DirectoryState::index(schools)),
        }
    }

    /// Replace the dataset wholesale.
    pub fn replace(&self, schools: Vec<School>) {
        if let Ok(mut state) = self.state.write() {
            *state = DirectoryState::index(schools);
        }
    }
}

impl SchoolDirectory for InMemoryDirectory {
    fn school_by_name(&self, name: &str) -> Option<School> {
        let state = self.state.read().ok()?;
        let idx = *state.by_name.get(name)?;
        state.schools.get(idx).cloned()
    }

    fn all_schools(&self) -> Vec<School> {
        self.state
            .read()
            .map(|state| state.schools.clone())
            .unwrap_or_default()
    }

    fn school_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .read()
            .map(|state| state.schools.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn statistics(&self) -> DirectoryStats {
        let Ok(state) = self.state.read() else {
            return DirectoryStats::default();
        };
        let las: HashSet<&str> = state
            .schools
            .iter()
            .filter_map(|s| s.la_name.as_deref())
            .collect();
        DirectoryStats {
            total_schools: state.schools.len(),
            high_priority: state
                .schools
                .iter()
                .filter(|s| s.combined_priority() == Priority::High)
                .count(),
            with_contacts: state
                .schools
                .iter()
                .filter(|s| s.has_contact_details())
                .count(),
            local_authorities: las.len(),
        }
    }

    fn refresh(&self) -> ScoutResult<()> {
        // No backing source to reload from.
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{Contact, FinancialProfile};

    fn school(urn: &str, name: &str, la: Option<&str>) -> School {
        let mut school = School::new(urn, name);
        school.la_name = la.map(str::to_string);
        school
    }

    fn dataset() -> Vec<School> {
        let mut big = school("100001", "Big Academy", Some("Camden"));
        big.financial = Some(FinancialProfile {
            total_staffing_costs: Some(900_000.0),
            ..Default::default()
        });
        big.headteacher = Some(Contact {
            full_name: "Sam Field".to_string(),
            role: Some("headteacher".to_string()),
            email: None,
            phone: None,
        });
        vec![
            big,
            school("100002", "Small Primary", Some("Camden")),
            school("100003", "Another Primary", Some("Islington")),
        ]
    }

    #[test]
    fn test_lookup_by_exact_name() {
        let dir = InMemoryDirectory::new(dataset());
        assert_eq!(dir.school_by_name("Big Academy").unwrap().urn, "100001");
        assert!(dir.school_by_name("big academy").is_none());
        assert!(dir.school_by_name("Missing School").is_none());
    }

    #[test]
    fn test_school_names_sorted() {
        let dir = InMemoryDirectory::new(dataset());
        assert_eq!(
            dir.school_names(),
            vec!["Another Primary", "Big Academy", "Small Primary"]
        );
    }

    #[test]
    fn test_statistics() {
        let dir = InMemoryDirectory::new(dataset());
        let stats = dir.statistics();
        assert_eq!(stats.total_schools, 3);
        assert_eq!(stats.high_priority, 1);
        assert_eq!(stats.with_contacts, 1);
        assert_eq!(stats.local_authorities, 2);
    }

    #[test]
    fn test_replace_swaps_dataset() {
        let dir = InMemoryDirectory::new(dataset());
        dir.replace(vec![school("200001", "Fresh School", None)]);
        assert!(dir.school_by_name("Big Academy").is_none());
        assert_eq!(dir.school_by_name("Fresh School").unwrap().urn, "200001");
        assert_eq!(dir.statistics().total_schools, 1);
    }
}
