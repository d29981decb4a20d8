//! Rule-based starters from SEND profiles.
//!
//! Thresholds mirror how consultants read the DfE data: dedicated provision
//! and double-digit EHC counts are the strongest buying signals, specific
//! hard-to-staff needs (ASD, SEMH) next, high overall SEND volume last.

use scout_core::{
    ConversationStarter, GenerationError, School, ScoutResult, SendProfile, StarterSource,
};

use crate::traits::StarterGenerator;

/// Minimum EHC-plan count for the 1:1 support starter.
const EHC_THRESHOLD: u32 = 10;
/// Minimum ASD / SEMH pupil count for the need-specific starters.
const NEED_THRESHOLD: u32 = 3;
/// Minimum overall SEND count for the continuity-of-cover starter.
const TOTAL_SEND_THRESHOLD: u32 = 15;

/// Deterministic starter generation from a [`SendProfile`].
#[derive(Debug, Default)]
pub struct SendStarterGenerator;

impl SendStarterGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, send: &SendProfile) -> Vec<ConversationStarter> {
        let mut starters = Vec::new();

        if send.has_sen_unit || send.has_resourced_provision {
            let unit_type = if send.has_sen_unit {
                "SEN unit"
            } else {
                "resourced provision"
            };
            starters.push(ConversationStarter::new(
                "Dedicated Provision Staffing",
                format!(
                    "I noticed you have a dedicated {} - how are you currently staffing it? We \
                     work with schools to provide trained SEND specialists for both permanent \
                     and cover positions.",
                    unit_type
                ),
                StarterSource::Send,
                0.95,
            ));
        }

        let ehc = send.ehc_plan.unwrap_or(0);
        if ehc >= EHC_THRESHOLD {
            starters.push(ConversationStarter::new(
                "EHC Plan Support",
                format!(
                    "You have {} pupils with EHC plans - that's a significant support \
                     requirement. How are you managing their 1:1 support? We have ASD-trained \
                     and SEMH-specialist TAs available.",
                    ehc
                ),
                StarterSource::Send,
                0.92,
            ));
        }

        if send.ehc_asd.unwrap_or(0) >= NEED_THRESHOLD {
            starters.push(ConversationStarter::new(
                "Autism Specialist Staffing",
                format!(
                    "With {} pupils with autism, having the right trained support staff is \
                     crucial. Are you finding it difficult to recruit autism-trained TAs? We \
                     specialise in placing SEND specialists.",
                    send.ehc_asd.unwrap_or(0)
                ),
                StarterSource::Send,
                0.9,
            ));
        }

        if send.ehc_semh.unwrap_or(0) >= NEED_THRESHOLD {
            starters.push(ConversationStarter::new(
                "SEMH Specialist Staffing",
                format!(
                    "I see you have {} pupils with SEMH needs - this is one of the hardest areas \
                     to recruit for. We have experienced SEMH specialists who understand \
                     de-escalation and behaviour management.",
                    send.ehc_semh.unwrap_or(0)
                ),
                StarterSource::Send,
                0.9,
            ));
        }

        let total = send.total_send();
        if total >= TOTAL_SEND_THRESHOLD {
            starters.push(ConversationStarter::new(
                "SEND Cover Continuity",
                format!(
                    "With {} SEND pupils, what happens when your SENCO or specialist TAs are \
                     absent? We can provide trained cover at short notice to maintain \
                     continuity for your vulnerable learners.",
                    total
                ),
                StarterSource::Send,
                0.85,
            ));
        }

        starters
    }
}

impl StarterGenerator for SendStarterGenerator {
    fn source(&self) -> StarterSource {
        StarterSource::Send
    }

    fn generate(&self, school: &School, count: usize) -> ScoutResult<Vec<ConversationStarter>> {
        let Some(send) = school.send.as_ref().filter(|s| s.has_data()) else {
            return Err(GenerationError::NoData {
                urn: school.urn.clone(),
                data_kind: "SEND".to_string(),
            }
            .into());
        };

        let mut starters = self.build(send);
        starters.truncate(count);
        Ok(starters)
    }
}

// =============================================================================
// TESTS
// =============================================================================
