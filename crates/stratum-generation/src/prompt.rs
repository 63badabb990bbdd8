use stratum_core::config::GenerationConfig;

/// Assembles the completion prompt from instructions, question and context.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    context_prompt: String,
}

impl PromptBuilder {
    pub fn new(context_prompt: impl Into<String>) -> Self {
        Self {
            context_prompt: context_prompt.into(),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.context_prompt.clone())
    }

    /// `<instructions>\n\nQuestion:\n<question>\n\nArticles context:\n<context>`
    pub fn build(&self, question: &str, context: &str) -> String {
        format!(
            "{}\n\nQuestion:\n{}\n\nArticles context:\n{}",
            self.context_prompt, question, context
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_stable() {
        let prompt = PromptBuilder::new("Be brief.").build("Why sleep?", "Paper: a\nText: t\n\n");
        assert_eq!(
            prompt,
            "Be brief.\n\nQuestion:\nWhy sleep?\n\nArticles context:\nPaper: a\nText: t\n\n"
        );
    }

    #[test]
    fn empty_context_still_has_section_header() {
        let prompt = PromptBuilder::new("x").build("q", "");
        assert!(prompt.ends_with("Articles context:\n"));
    }
}
