//! Priority ranking for "who to call next" workflows.
//!
//! Stateless: the classification is precomputed on each record, this module
//! only orders and truncates.

use crate::{Priority, School};

/// Order items by a precomputed priority classification, HIGH first and
/// UNKNOWN last, keeping original relative order within a class, and
/// truncate to `limit`.
pub fn rank_by_priority<T, F>(items: Vec<T>, priority_of: F, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> Priority,
{
    let mut items = items;
    // Vec::sort_by_key is stable, so ties keep their input order.
    items.sort_by_key(|item| priority_of(item).rank());
    items.truncate(limit);
    items
}

/// Rank schools by their combined financial/SEND priority.
pub fn rank_schools(schools: Vec<School>, limit: usize) -> Vec<School> {
    rank_by_priority(schools, School::combined_priority, limit)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tags: &[(&str, Priority)]) -> Vec<(String, Priority)> {
        tags.iter().map(|(n, p)| (n.to_string(), *p)).collect()
    }

    #[test]
    fn test_rank_high_first_stable() {
        let items = tagged(&[
            ("a", Priority::Low),
            ("b", Priority::High),
            ("c", Priority::Medium),
            ("d", Priority::High),
        ]);
        let ranked = rank_by_priority(items, |(_, p)| *p, 2);
        let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    #[test]
    fn test_rank_unknown_last() {
        let items = tagged(&[
            ("a", Priority::Unknown),
            ("b", Priority::Low),
            ("c", Priority::Unknown),
        ]);
        let ranked = rank_by_priority(items, |(_, p)| *p, 10);
        let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rank_limit_zero() {
        let items = tagged(&[("a", Priority::High)]);
        assert!(rank_by_priority(items, |(_, p)| *p, 0).is_empty());
    }

    #[test]
    fn test_rank_schools_uses_combined_priority() {
        let mut big = School::new("1", "Big Spender");
        big.financial = Some(crate::FinancialProfile {
            total_staffing_costs: Some(900_000.0),
            ..Default::default()
        });
        let small = School::new("2", "Small School");

        let ranked = rank_schools(vec![small, big], 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].urn, "1");
    }
}
