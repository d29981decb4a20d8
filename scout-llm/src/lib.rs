//! SCOUT LLM - Starter Generation
//!
//! The generation capability behind school intelligence: provider traits for
//! user-supplied chat backends, prompt templates, an LLM-backed financial
//! generator, rule-based Ofsted and SEND generators, and deterministic mocks
//! for tests.

mod financial;
pub mod mock;
mod ofsted;
mod openai;
pub mod prompts;
mod provider;
mod send;
mod traits;

pub use financial::FinancialStarterGenerator;
pub use ofsted::OfstedStarterGenerator;
pub use openai::OpenAiChatProvider;
pub use provider::{AsyncChatProvider, ChatProvider, UnconfiguredChatProvider};
pub use send::SendStarterGenerator;
pub use traits::{AsyncStarterGenerator, GeneratorRegistry, StarterGenerator};
