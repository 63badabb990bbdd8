use std::sync::{Arc, Mutex};

use stratum_core::config::{IndexFailurePolicy, RetrievalConfig};
use stratum_core::errors::{GenerationError, StratumResult};
use stratum_core::traits::ICompletionProvider;
use stratum_core::StratumError;
use stratum_generation::{strip_reasoning, AnswerPipeline, PromptBuilder};
use stratum_index::{load_chunks, IndexBootstrap, MemoryIndex};
use stratum_retrieval::TieredRetriever;
use test_fixtures::{fixture_path, FixedEmbedder, ScriptedIndex};

/// Records prompts and answers with a canned reply.
struct RecordingCompleter {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingCompleter {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ICompletionProvider for RecordingCompleter {
    fn complete(&self, prompt: &str) -> StratumResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(strip_reasoning(&self.reply))
    }
    fn name(&self) -> &str {
        "recording"
    }
}

struct RateLimitedCompleter;

impl ICompletionProvider for RateLimitedCompleter {
    fn complete(&self, _prompt: &str) -> StratumResult<String> {
        Err(GenerationError::RateLimited {
            model: "m".into(),
        }
        .into())
    }
    fn name(&self) -> &str {
        "limited"
    }
}

fn scripted_pipeline(index: ScriptedIndex, completer: Arc<RecordingCompleter>) -> AnswerPipeline {
    let retriever = TieredRetriever::new(Arc::new(index), Arc::new(FixedEmbedder::default()));
    AnswerPipeline::new(Arc::new(retriever), completer).with_prompt(PromptBuilder::new("Answer briefly."))
}

#[test]
fn answer_is_grounded_on_ranked_sources() {
    let completer = Arc::new(RecordingCompleter::new("<think>hmm</think> Sleep helps."));
    let index = ScriptedIndex::new().with_scores(1, &[("a", 0.7), ("b", 0.9), ("c", 0.8)]);
    let answer = scripted_pipeline(index, completer.clone())
        .answer("Why sleep?")
        .unwrap();

    assert_eq!(answer.text, "Sleep helps.");
    let ids: Vec<&str> = answer.sources.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert!(!answer.degraded);

    let prompt = &completer.prompts()[0];
    assert!(prompt.starts_with("Answer briefly.\n\nQuestion:\nWhy sleep?\n\nArticles context:\nPaper: b\n"));
}

#[test]
fn empty_retrieval_still_prompts() {
    let completer = Arc::new(RecordingCompleter::new("I don't know."));
    let answer = scripted_pipeline(ScriptedIndex::new(), completer.clone())
        .answer("Unknown?")
        .unwrap();

    assert!(answer.sources.is_empty());
    assert_eq!(answer.text, "I don't know.");
    assert!(completer.prompts()[0].ends_with("Articles context:\n"));
}

#[test]
fn retrieval_failure_skips_completion() {
    let completer = Arc::new(RecordingCompleter::new("unused"));
    let index = ScriptedIndex::new().failing_at(1, "down");
    let err = scripted_pipeline(index, completer.clone())
        .answer("q")
        .unwrap_err();
    assert!(matches!(err, StratumError::IndexError(_)));
    assert!(completer.prompts().is_empty());
}

#[test]
fn degraded_retrieval_is_reported() {
    let completer = Arc::new(RecordingCompleter::new("ok"));
    let config = RetrievalConfig {
        on_index_failure: IndexFailurePolicy::Degrade,
        ..Default::default()
    };
    let index = ScriptedIndex::new()
        .failing_at(1, "down")
        .with_scores(2, &[("x", 0.9)]);
    let retriever =
        TieredRetriever::from_config(Arc::new(index), Arc::new(FixedEmbedder::default()), &config);
    let answer = AnswerPipeline::new(Arc::new(retriever), completer)
        .with_retrieval(config)
        .answer("q")
        .unwrap();
    assert!(answer.degraded);
    assert_eq!(answer.sources[0].id, "x");
}

#[test]
fn completion_errors_propagate() {
    let retriever = TieredRetriever::new(
        Arc::new(ScriptedIndex::new().with_scores(1, &[("a", 0.9)])),
        Arc::new(FixedEmbedder::default()),
    );
    let err = AnswerPipeline::new(Arc::new(retriever), Arc::new(RateLimitedCompleter))
        .answer("q")
        .unwrap_err();
    assert!(matches!(
        err,
        StratumError::GenerationError(GenerationError::RateLimited { .. })
    ));
}

#[test]
fn bootstrapped_memory_index_end_to_end() {
    let chunks = load_chunks(fixture_path("corpus/chunks_small.json")).unwrap();
    let index = Arc::new(MemoryIndex::new());
    let embedder = Arc::new(FixedEmbedder::default());
    IndexBootstrap::default()
        .ensure_populated(index.as_ref(), embedder.as_ref(), &chunks)
        .unwrap();

    let completer = Arc::new(RecordingCompleter::new("Answer."));
    let retriever = TieredRetriever::new(index, embedder);
    let answer = AnswerPipeline::new(Arc::new(retriever), completer.clone())
        .with_retrieval(RetrievalConfig {
            top_k: 2,
            ..Default::default()
        })
        .answer("sleep and memory")
        .unwrap();

    assert_eq!(answer.sources.len(), 2);
    assert!(answer.sources.iter().all(|m| m.tier.level() == 1));
    assert!(completer.prompts()[0].contains("Source: https://pubmed.ncbi.nlm.nih.gov/"));
}
