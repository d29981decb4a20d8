//! Merging starters from multiple sources.

use scout_core::ConversationStarter;
use std::collections::HashSet;

/// Merge starter lists in priority order.
///
/// Lists are concatenated in the order supplied; within the result only the
/// first occurrence of each distinct `topic` survives (case-sensitive exact
/// match), and the output is truncated to `limit`. Deterministic and free of
/// side effects, so merging a merged list changes nothing.
pub fn merge_starters(
    lists: Vec<Vec<ConversationStarter>>,
    limit: usize,
) -> Vec<ConversationStarter> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for starter in lists.into_iter().flatten() {
        if merged.len() == limit {
            break;
        }
        if seen.insert(starter.topic.clone()) {
            merged.push(starter);
        }
    }
    merged
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::StarterSource;

    fn starter(topic: &str, source: StarterSource) -> ConversationStarter {
        ConversationStarter::new(topic, format!("{topic} detail"), source, 0.8)
    }

    #[test]
    fn test_concatenates_in_priority_order() {
        let merged = merge_starters(
            vec![
                vec![starter("Ofsted A", StarterSource::Ofsted)],
                vec![starter("Financial A", StarterSource::Financial)],
            ],
            10,
        );
        assert_eq!(merged[0].topic, "Ofsted A");
        assert_eq!(merged[1].topic, "Financial A");
    }

    #[test]
    fn test_first_occurrence_wins_on_duplicate_topic() {
        let merged = merge_starters(
            vec![
                vec![starter("Maths Support", StarterSource::Ofsted)],
                vec![starter("Maths Support", StarterSource::Financial)],
            ],
            10,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, StarterSource::Ofsted);
    }

    #[test]
    fn test_topic_match_is_case_sensitive() {
        let merged = merge_starters(
            vec![vec![
                starter("Maths Support", StarterSource::Ofsted),
                starter("maths support", StarterSource::Financial),
            ]],
            10,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_truncates_to_limit() {
        let merged = merge_starters(
            vec![(0..10)
                .map(|i| starter(&format!("Topic {i}"), StarterSource::Financial))
                .collect()],
            3,
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].topic, "Topic 2");
    }

    #[test]
    fn test_zero_limit_and_empty_input() {
        assert!(merge_starters(vec![], 5).is_empty());
        assert!(merge_starters(vec![vec![starter("A", StarterSource::Other)]], 0).is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let lists = vec![
            vec![
                starter("A", StarterSource::Ofsted),
                starter("B", StarterSource::Ofsted),
            ],
            vec![
                starter("B", StarterSource::Financial),
                starter("C", StarterSource::Financial),
            ],
        ];
        let once = merge_starters(lists, 5);
        let twice = merge_starters(vec![once.clone()], 5);
        assert_eq!(once, twice);
    }
}
