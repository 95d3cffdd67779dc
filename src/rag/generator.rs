use crate::llm::LLMClient;
use crate::types::Result;
use std::sync::Arc;

/// System instruction sent with every question.
pub const SYSTEM_PROMPT: &str = "Use the context below to answer the question.";

/// Build the user message from retrieved context and the question.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!("Context:\n{}\n\nQuestion: {}", context, query)
}

/// Produces a grounded answer with a single chat completion.
pub struct AnswerGenerator {
    llm: Arc<dyn LLMClient>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Answer text exactly as the model returned it.
    pub async fn generate(&self, context: &str, query: &str) -> Result<String> {
        self.llm
            .generate_with_system(SYSTEM_PROMPT, &build_prompt(context, query))
            .await
    }
}
