//! Rule-based starters from Ofsted inspection findings.
//!
//! No LLM call: the inspection summary is already structured, so starters are
//! assembled from the improvement areas directly. Each starter cites the
//! source report URL when one is known.

use scout_core::{
    ConversationStarter, GenerationError, ImprovementArea, OfstedSummary, Priority, School,
    ScoutResult, StarterSource,
};

use crate::traits::StarterGenerator;

/// Deterministic starter generation from an [`OfstedSummary`].
#[derive(Debug, Default)]
pub struct OfstedStarterGenerator;

impl OfstedStarterGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn cite(detail: String, ofsted: &OfstedSummary) -> String {
    match &ofsted.report_url {
        Some(url) => format!("{} (Source: {})", detail, url),
        None => detail,
    }
}

fn area_matches(improvement: &ImprovementArea, needle: &str) -> bool {
    improvement.area.to_lowercase().contains(needle)
        || improvement.description.to_lowercase().contains(needle)
}

impl StarterGenerator for OfstedStarterGenerator {
    fn source(&self) -> StarterSource {
        StarterSource::Ofsted
    }

    fn generate(&self, school: &School, count: usize) -> ScoutResult<Vec<ConversationStarter>> {
        let Some(ofsted) = &school.ofsted else {
            return Err(GenerationError::NoData {
                urn: school.urn.clone(),
                data_kind: "Ofsted".to_string(),
            }
            .into());
        };

        let mut improvements: Vec<&ImprovementArea> = ofsted.improvements.iter().collect();
        improvements.sort_by_key(|imp| imp.urgency.rank());

        let mut starters = Vec::new();

        // Lead with the most urgent improvement area.
        if let Some(top) = improvements.first() {
            starters.push(ConversationStarter::new(
                format!("{} Support", top.area),
                cite(
                    format!(
                        "I noticed from your recent Ofsted report that {} was identified as a \
                         development area. We work with several schools facing similar challenges \
                         and have seen strong results with the right specialist support. Would it \
                         be helpful to discuss how we might support your improvement journey?",
                        top.area.to_lowercase()
                    ),
                    ofsted,
                ),
                StarterSource::Ofsted,
                1.0,
            ));
        }

        if improvements
            .iter()
            .any(|imp| imp.urgency == Priority::High && area_matches(imp, "math"))
        {
            starters.push(ConversationStarter::new(
                "Mathematics Improvement",
                cite(
                    "Your Ofsted report highlights mathematics as a priority. We've placed maths \
                     specialists who've made significant impacts on pupils meeting expected \
                     standards. What are your main priorities for maths improvement this term?"
                        .to_string(),
                    ofsted,
                ),
                StarterSource::Ofsted,
                0.95,
            ));
        }

        if improvements.iter().any(|imp| {
            imp.urgency.rank() <= Priority::Medium.rank()
                && (area_matches(imp, "english") || area_matches(imp, "literacy"))
        }) {
            starters.push(ConversationStarter::new(
                "English & Literacy Support",
                cite(
                    "I see from your Ofsted that English and literacy development is a focus \
                     area. We have experienced English specialists who've helped schools improve \
                     their phonics and reading comprehension results. Would you like to hear \
                     about some approaches that have worked well?"
                        .to_string(),
                    ofsted,
                ),
                StarterSource::Ofsted,
                0.92,
            ));
        }

        if improvements
            .iter()
            .any(|imp| area_matches(imp, "send") || area_matches(imp, "special educational"))
        {
            starters.push(ConversationStarter::new(
                "SEND Provision Support",
                cite(
                    "I understand from your Ofsted report that enhancing SEND provision is a \
                     priority. We work with experienced SEND practitioners who can help develop \
                     whole-school SEND systems. What aspects of SEND provision are you looking \
                     to strengthen?"
                        .to_string(),
                    ofsted,
                ),
                StarterSource::Ofsted,
                0.93,
            ));
        }

        if improvements
            .iter()
            .any(|imp| area_matches(imp, "leader"))
        {
            starters.push(ConversationStarter::new(
                "Leadership Development",
                cite(
                    "Your Ofsted mentions leadership development as an area for focus. Strong \
                     middle leadership is often key to driving improvement across a school. We \
                     can connect you with experienced leaders for interim support or mentoring. \
                     What leadership capacity challenges are you currently facing?"
                        .to_string(),
                    ofsted,
                ),
                StarterSource::Ofsted,
                0.88,
            ));
        }

        if improvements.len() >= 2 {
            starters.push(ConversationStarter::new(
                "Ofsted Action Plan Support",
                cite(
                    "Looking at your Ofsted priorities, you have several areas to address. We \
                     could discuss a coordinated approach, starting with your top priority. \
                     What timeline are you working to for showing progress to Ofsted?"
                        .to_string(),
                    ofsted,
                ),
                StarterSource::Ofsted,
                0.9,
            ));
        }

        starters.truncate(count);
        Ok(starters)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::ScoutError;

    fn improvement(area: &str, description: &str, urgency: Priority) -> ImprovementArea {
        ImprovementArea {
            area: area.to_string(),
            description: description.to_string(),
            urgency,
        }
    }

    fn school_with(ofsted: OfstedSummary) -> School {
        let mut school = School::new("100001", "Test Primary");
        school.ofsted = Some(ofsted);
        school
    }

    #[test]
    fn test_no_ofsted_data_is_an_error() {
        let err = OfstedStarterGenerator::new()
            .generate(&School::new("100001", "Test Primary"), 5)
            .unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Generation(GenerationError::NoData { .. })
        ));
    }

    #[test]
    fn test_no_improvements_yields_no_starters() {
        let school = school_with(OfstedSummary {
            rating: Some("Good".to_string()),
            ..Default::default()
        });
        let starters = OfstedStarterGenerator::new().generate(&school, 5).unwrap();
        assert!(starters.is_empty());
    }

    #[test]
    fn test_most_urgent_improvement_leads() {
        let school = school_with(OfstedSummary {
            improvements: vec![
                improvement("Attendance", "Persistent absence", Priority::Low),
                improvement("Mathematics", "Outcomes below expected", Priority::High),
            ],
            ..Default::default()
        });
        let starters = OfstedStarterGenerator::new().generate(&school, 5).unwrap();
        assert_eq!(starters[0].topic, "Mathematics Support");
        assert_eq!(starters[0].relevance_score, 1.0);
        assert!(starters.iter().all(|s| s.source == StarterSource::Ofsted));
    }

    #[test]
    fn test_report_url_cited_in_details() {
        let school = school_with(OfstedSummary {
            report_url: Some("https://files.ofsted.gov.uk/r/100001.pdf".to_string()),
            improvements: vec![improvement("Mathematics", "Below expected", Priority::High)],
            ..Default::default()
        });
        let starters = OfstedStarterGenerator::new().generate(&school, 5).unwrap();
        assert!(!starters.is_empty());
        for starter in &starters {
            assert!(starter.detail.contains("files.ofsted.gov.uk"));
        }
    }

    #[test]
    fn test_subject_starters_fire_on_matching_areas() {
        let school = school_with(OfstedSummary {
            improvements: vec![
                improvement("Mathematics", "KS2 outcomes", Priority::High),
                improvement("English", "Reading fluency", Priority::Medium),
                improvement("SEND Provision", "Identification of needs", Priority::Medium),
                improvement("Leadership", "Middle leader capacity", Priority::Low),
            ],
            ..Default::default()
        });
        let starters = OfstedStarterGenerator::new().generate(&school, 10).unwrap();
        let topics: Vec<&str> = starters.iter().map(|s| s.topic.as_str()).collect();
        assert!(topics.contains(&"Mathematics Improvement"));
        assert!(topics.contains(&"English & Literacy Support"));
        assert!(topics.contains(&"SEND Provision Support"));
        assert!(topics.contains(&"Leadership Development"));
        assert!(topics.contains(&"Ofsted Action Plan Support"));
    }

    #[test]
    fn test_low_urgency_maths_does_not_fire_subject_starter() {
        let school = school_with(OfstedSummary {
            improvements: vec![improvement("Mathematics", "Minor gaps", Priority::Low)],
            ..Default::default()
        });
        let starters = OfstedStarterGenerator::new().generate(&school, 10).unwrap();
        assert!(starters.iter().all(|s| s.topic != "Mathematics Improvement"));
    }

    #[test]
    fn test_truncates_to_count() {
        let school = school_with(OfstedSummary {
            improvements: vec![
                improvement("Mathematics", "KS2 outcomes", Priority::High),
                improvement("English", "Reading fluency", Priority::Medium),
                improvement("Leadership", "Capacity", Priority::Low),
            ],
            ..Default::default()
        });
        let starters = OfstedStarterGenerator::new().generate(&school, 2).unwrap();
        assert_eq!(starters.len(), 2);
    }
}
