//! Deterministic mock providers and generators.
//!
//! Shipped in the library (not behind `cfg(test)`) so downstream crates can
//! exercise orchestration logic without a live LLM backend.

use async_trait::async_trait;
use scout_core::{ConversationStarter, GenerationError, School, ScoutResult, StarterSource};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::provider::{AsyncChatProvider, ChatProvider};
use crate::traits::{AsyncStarterGenerator, StarterGenerator};

// =============================================================================
// CHAT PROVIDERS
// =============================================================================

/// Chat provider that returns a canned completion.
#[derive(Debug, Clone)]
pub struct MockChatProvider {
    completion: String,
}

impl MockChatProvider {
    pub fn completing(completion: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
        }
    }
}

impl ChatProvider for MockChatProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Ok(self.completion.clone())
    }
}

#[async_trait]
impl AsyncChatProvider for MockChatProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Ok(self.completion.clone())
    }
}

/// Chat provider that always fails.
#[derive(Debug, Clone)]
pub struct FailingChatProvider {
    message: String,
}

impl FailingChatProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> GenerationError {
        GenerationError::ProviderFailed {
            provider: "mock".to_string(),
            message: self.message.clone(),
        }
    }
}

impl ChatProvider for FailingChatProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Err(self.error())
    }
}

#[async_trait]
impl AsyncChatProvider for FailingChatProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Err(self.error())
    }
}

// =============================================================================
// STARTER GENERATORS
// =============================================================================

/// Generator that returns fixed starters and counts its invocations.
#[derive(Debug)]
pub struct MockStarterGenerator {
    starters: Vec<ConversationStarter>,
    source: StarterSource,
    calls: AtomicUsize,
}

impl MockStarterGenerator {
    pub fn returning(starters: Vec<ConversationStarter>) -> Self {
        Self {
            starters,
            source: StarterSource::Other,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_source(mut self, source: StarterSource) -> Self {
        self.source = source;
        self
    }

    /// How many times `generate` has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn produce(&self, count: usize) -> Vec<ConversationStarter> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut starters = self.starters.clone();
        starters.truncate(count);
        starters
    }
}

impl StarterGenerator for MockStarterGenerator {
    fn source(&self) -> StarterSource {
        self.source
    }

    fn generate(&self, _school: &School, count: usize) -> ScoutResult<Vec<ConversationStarter>> {
        Ok(self.produce(count))
    }
}

#[async_trait]
impl AsyncStarterGenerator for MockStarterGenerator {
    fn source(&self) -> StarterSource {
        self.source
    }

    async fn generate(
        &self,
        _school: &School,
        count: usize,
    ) -> ScoutResult<Vec<ConversationStarter>> {
        Ok(self.produce(count))
    }
}

/// Generator that always fails, for degradation tests.
#[derive(Debug, Default)]
pub struct FailingStarterGenerator;

impl FailingStarterGenerator {
    fn error(&self) -> GenerationError {
        GenerationError::ProviderFailed {
            provider: "mock".to_string(),
            message: "synthetic failure".to_string(),
        }
    }
}

impl StarterGenerator for FailingStarterGenerator {
    fn source(&self) -> StarterSource {
        StarterSource::Other
    }

    fn generate(&self, _school: &School, _count: usize) -> ScoutResult<Vec<ConversationStarter>> {
        Err(self.error().into())
    }
}

#[async_trait]
impl AsyncStarterGenerator for FailingStarterGenerator {
    fn source(&self) -> StarterSource {
        StarterSource::Other
    }

    async fn generate(
        &self,
        _school: &School,
        _count: usize,
    ) -> ScoutResult<Vec<ConversationStarter>> {
        Err(self.error().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_generator_counts_calls_and_truncates() {
        let generator = MockStarterGenerator::returning(vec![
            ConversationStarter::new("A", "a", StarterSource::Other, 0.5),
            ConversationStarter::new("B", "b", StarterSource::Other, 0.5),
        ]);
        let school = School::new("100001", "Test Primary");

        assert_eq!(
            StarterGenerator::generate(&generator, &school, 1).unwrap().len(),
            1
        );
        assert_eq!(
            StarterGenerator::generate(&generator, &school, 5).unwrap().len(),
            2
        );
        assert_eq!(generator.call_count(), 2);
    }

    #[test]
    fn test_failing_generator_always_errors() {
        let school = School::new("100001", "Test Primary");
        assert!(StarterGenerator::generate(&FailingStarterGenerator, &school, 5).is_err());
    }
}
