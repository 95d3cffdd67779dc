//! LLM client abstraction.

use crate::types::Result;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
///
/// The answer generator only depends on this trait, so tests can swap in a
/// canned client without touching the network.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Single-turn completion with a system prompt and one user message.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}
