//! # stratum-generation
//!
//! Answers a question from retrieved passages:
//! retrieve → format context → build prompt → complete → strip reasoning.

pub mod chat_provider;
pub mod pipeline;
pub mod prompt;
pub mod reasoning;

pub use chat_provider::ChatCompletionProvider;
pub use pipeline::{Answer, AnswerPipeline};
pub use prompt::PromptBuilder;
pub use reasoning::strip_reasoning;
