//! Generation-source traits and the registry handed to the orchestrator.

use async_trait::async_trait;
use scout_core::{ConversationStarter, School, ScoutResult, StarterSource};
use std::sync::Arc;

/// A source of conversation starters for one school.
///
/// Implementations return at most `count` starters, or an error when the
/// school lacks the data the source needs or the backend fails. Callers
/// treat any error as zero starters from this source.
pub trait StarterGenerator: Send + Sync {
    /// Which source tag this generator stamps on its starters.
    fn source(&self) -> StarterSource;

    fn generate(&self, school: &School, count: usize) -> ScoutResult<Vec<ConversationStarter>>;
}

/// Async variant for generators that call out over the network.
#[async_trait]
pub trait AsyncStarterGenerator: Send + Sync {
    fn source(&self) -> StarterSource;

    async fn generate(
        &self,
        school: &School,
        count: usize,
    ) -> ScoutResult<Vec<ConversationStarter>>;
}

/// The generation capabilities available to the orchestrator.
///
/// Financial and SEND sources are always present; the Ofsted source is an
/// optional capability the host may leave unwired. Whether it exists is
/// settled here at construction, never re-derived per call.
pub struct GeneratorRegistry {
    financial: Arc<dyn StarterGenerator>,
    ofsted: Option<Arc<dyn StarterGenerator>>,
    send: Arc<dyn StarterGenerator>,
}

impl GeneratorRegistry {
    pub fn new(
        financial: Arc<dyn StarterGenerator>,
        ofsted: Option<Arc<dyn StarterGenerator>>,
        send: Arc<dyn StarterGenerator>,
    ) -> Self {
        Self {
            financial,
            ofsted,
            send,
        }
    }

    pub fn financial(&self) -> &Arc<dyn StarterGenerator> {
        &self.financial
    }

    pub fn ofsted(&self) -> Option<&Arc<dyn StarterGenerator>> {
        self.ofsted.as_ref()
    }

    pub fn has_ofsted(&self) -> bool {
        self.ofsted.is_some()
    }

    pub fn send(&self) -> &Arc<dyn StarterGenerator> {
        &self.send
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("ofsted", &self.ofsted.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStarterGenerator;

    #[test]
    fn test_registry_reports_ofsted_capability() {
        let with = GeneratorRegistry::new(
            Arc::new(MockStarterGenerator::returning(Vec::new())),
            Some(Arc::new(MockStarterGenerator::returning(Vec::new()))),
            Arc::new(MockStarterGenerator::returning(Vec::new())),
        );
        assert!(with.has_ofsted());
        assert!(with.ofsted().is_some());

        let without = GeneratorRegistry::new(
            Arc::new(MockStarterGenerator::returning(Vec::new())),
            None,
            Arc::new(MockStarterGenerator::returning(Vec::new())),
        );
        assert!(!without.has_ofsted());
        assert!(without.ofsted().is_none());
    }
}
