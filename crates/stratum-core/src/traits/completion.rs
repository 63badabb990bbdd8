use crate::errors::StratumResult;

/// Text-generation backend that turns an assembled prompt into an answer.
pub trait ICompletionProvider: Send + Sync {
    fn complete(&self, prompt: &str) -> StratumResult<String>;

    /// Model name used for the completion.
    fn name(&self) -> &str;
}
