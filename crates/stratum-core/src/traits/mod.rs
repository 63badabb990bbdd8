pub mod completion;
pub mod embedding;
pub mod retriever;
pub mod similarity_index;

pub use completion::ICompletionProvider;
pub use embedding::IEmbeddingProvider;
pub use retriever::IRetriever;
pub use similarity_index::{IIndexWriter, ISimilarityIndex};
