// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MAX_TIER: u32 = 3;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "ollama";
pub const DEFAULT_EMBEDDING_MODEL: &str = "mxbai-embed-large";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Index ---
pub const DEFAULT_INDEX_BACKEND: &str = "memory";
pub const DEFAULT_INDEX_NAMESPACE: &str = "ns1";
pub const DEFAULT_INDEX_API_KEY_ENV: &str = "PINECONE_KEY";
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_BOOTSTRAP_BATCH_SIZE: usize = 32;

// --- Generation ---
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.together.xyz/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";
pub const DEFAULT_REASONING_MODEL: &str = "deepseek-ai/DeepSeek-R1-Distill-Llama-70B-free";
pub const DEFAULT_COMPLETION_API_KEY_ENV: &str = "TOGETHER_API_KEY";
pub const DEFAULT_COMPLETION_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_CONTEXT_PROMPT: &str = "Answer the question using only the articles below. \
If the articles do not contain the answer, say so.";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
