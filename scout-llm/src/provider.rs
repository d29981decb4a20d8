//! Chat-completion provider seam.
//!
//! The LLM backend is user-supplied. Generators only need a system + user
//! message pair turned into completion text; which vendor answers it is the
//! host's business.

use async_trait::async_trait;
use scout_core::GenerationError;

/// Blocking chat-completion backend.
pub trait ChatProvider: Send + Sync {
    /// Provider name used in error messages and logs.
    fn name(&self) -> &str;

    /// Run one system + user exchange and return the raw completion text.
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}

/// Async chat-completion backend.
#[async_trait]
pub trait AsyncChatProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}

/// Stand-in for hosts that have no LLM backend wired.
///
/// Every completion fails with [`GenerationError::ProviderNotConfigured`],
/// which the orchestration layer degrades to zero starters from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredChatProvider;

impl ChatProvider for UnconfiguredChatProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Err(GenerationError::ProviderNotConfigured)
    }
}

#[async_trait]
impl AsyncChatProvider for UnconfiguredChatProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Err(GenerationError::ProviderNotConfigured)
    }
}
