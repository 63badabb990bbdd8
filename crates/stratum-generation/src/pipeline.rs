//! End-to-end answering: retrieval, prompt assembly, completion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stratum_core::config::RetrievalConfig;
use stratum_core::errors::StratumResult;
use stratum_core::models::{Match, RetrievalRequest};
use stratum_core::traits::{ICompletionProvider, IRetriever};
use stratum_observability::generation_span;
use stratum_retrieval::format_context;
use tracing::{debug, info};

use crate::prompt::PromptBuilder;

/// A generated answer and the passages it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// Retrieved passages in ranked order.
    pub sources: Vec<Match>,
    /// Retrieval skipped at least one failed tier.
    pub degraded: bool,
}

pub struct AnswerPipeline {
    retriever: Arc<dyn IRetriever>,
    completer: Arc<dyn ICompletionProvider>,
    prompt: PromptBuilder,
    retrieval: RetrievalConfig,
}

impl AnswerPipeline {
    pub fn new(retriever: Arc<dyn IRetriever>, completer: Arc<dyn ICompletionProvider>) -> Self {
        Self {
            retriever,
            completer,
            prompt: PromptBuilder::default(),
            retrieval: RetrievalConfig::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Request defaults (`top_k`, `threshold`, `max_tier`) for every question.
    pub fn with_retrieval(mut self, retrieval: RetrievalConfig) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn answer(&self, question: &str) -> StratumResult<Answer> {
        self.answer_with(RetrievalRequest::from_config(question, &self.retrieval))
    }

    /// Answer with explicit retrieval parameters. The request's query is the question.
    pub fn answer_with(&self, request: RetrievalRequest) -> StratumResult<Answer> {
        let span = generation_span!(self.completer.name());
        let _guard = span.enter();

        let response = self.retriever.retrieve(&request)?;
        if response.is_empty() {
            debug!("no passages retrieved, prompting with empty context");
        }

        let context = format_context(&response.matches);
        let prompt = self.prompt.build(&request.query, &context);
        let text = self.completer.complete(&prompt)?;

        info!(
            sources = response.matches.len(),
            degraded = response.degraded,
            answer_chars = text.len(),
            "answer generated"
        );
        Ok(Answer {
            text,
            degraded: response.degraded,
            sources: response.into_matches(),
        })
    }
}
