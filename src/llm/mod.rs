//! LLM provider clients.
//!
//! - [`LLMClient`] - the trait the answer generator depends on
//! - [`ChatCompletionsClient`] - OpenAI-compatible chat completions over HTTP
//!   (Groq by default, see `[llm]` in `ragbot.toml`)

pub mod chat_completions;
pub mod client;

pub use chat_completions::ChatCompletionsClient;
pub use client::LLMClient;
