//! LLM-backed financial starter generation.
//!
//! Builds the financial prompt from the school's context block, calls the
//! chat provider, and parses the JSON `conversation_starters` payload.
//! The provider's completion text is the only untrusted input here; anything
//! that fails to parse into the expected shape is an invalid response, never
//! a panic.

use async_trait::async_trait;
use scout_core::{ConversationStarter, GenerationError, School, ScoutResult, StarterSource};
use serde::Deserialize;

use crate::prompts::financial_starter_prompt;
use crate::provider::{AsyncChatProvider, ChatProvider};
use crate::traits::{AsyncStarterGenerator, StarterGenerator};

/// Financial starters from an LLM chat provider.
#[derive(Debug)]
pub struct FinancialStarterGenerator<P> {
    provider: P,
}

impl<P> FinancialStarterGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[derive(Debug, Deserialize)]
struct StarterPayload {
    conversation_starters: Vec<RawStarter>,
}

#[derive(Debug, Deserialize)]
struct RawStarter {
    topic: String,
    detail: String,
    #[serde(default)]
    relevance_score: f32,
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn extract_json(completion: &str) -> &str {
    let trimmed = completion.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a provider completion into starters, truncated to `count`.
fn parse_starters(
    provider: &str,
    completion: &str,
    count: usize,
) -> ScoutResult<Vec<ConversationStarter>> {
    let payload: StarterPayload =
        serde_json::from_str(extract_json(completion)).map_err(|e| {
            GenerationError::InvalidResponse {
                provider: provider.to_string(),
                reason: e.to_string(),
            }
        })?;

    let mut starters: Vec<ConversationStarter> = payload
        .conversation_starters
        .into_iter()
        .map(|raw| {
            ConversationStarter::new(
                raw.topic,
                raw.detail,
                StarterSource::Financial,
                raw.relevance_score,
            )
        })
        .collect();
    starters.truncate(count);
    Ok(starters)
}

impl<P: ChatProvider> StarterGenerator for FinancialStarterGenerator<P> {
    fn source(&self) -> StarterSource {
        StarterSource::Financial
    }

    fn generate(&self, school: &School, count: usize) -> ScoutResult<Vec<ConversationStarter>> {
        let (system, user) = financial_starter_prompt(&school.prompt_context(), count);
        tracing::debug!(urn = %school.urn, provider = self.provider.name(), count, "requesting financial starters");
        let completion = self.provider.complete(&system, &user)?;
        parse_starters(self.provider.name(), &completion, count)
    }
}

#[async_trait]
impl<P: AsyncChatProvider> AsyncStarterGenerator for FinancialStarterGenerator<P> {
    fn source(&self) -> StarterSource {
        StarterSource::Financial
    }

    async fn generate(
        &self,
        school: &School,
        count: usize,
    ) -> ScoutResult<Vec<ConversationStarter>> {
        let (system, user) = financial_starter_prompt(&school.prompt_context(), count);
        tracing::debug!(urn = %school.urn, provider = self.provider.name(), count, "requesting financial starters");
        let completion = self.provider.complete(&system, &user).await?;
        parse_starters(self.provider.name(), &completion, count)
    }
}

// =============================================================================
// TESTS
// =============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any well-formed payload parses, with scores clamped and the
        /// result truncated to the requested count.
        #[test]
        fn prop_parse_clamps_and_truncates(
            topics in proptest::collection::vec("[a-zA-Z ]{1,20}", 0..8),
            scores in proptest::collection::vec(-2.0f32..3.0, 0..8),
            count in 0usize..10,
        ) {
            let raw: Vec<serde_json::Value> = topics
                .iter()
                .zip(scores.iter().chain(std::iter::repeat(&0.5)))
                .map(|(topic, score)| {
                    serde_json::json!({
                        "topic": topic,
                        "detail": "detail",
                        "relevance_score": score,
                    })
                })
                .collect();
            let completion =
                serde_json::json!({ "conversation_starters": raw }).to_string();

            let starters = parse_starters("mock", &completion, count).unwrap();
            prop_assert_eq!(starters.len(), topics.len().min(count));
            for starter in &starters {
                prop_assert!((0.0..=1.0).contains(&starter.relevance_score));
            }
        }
    }
}
