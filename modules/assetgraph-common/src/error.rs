use thiserror::Error;

/// Failure taxonomy for the question-answering pipeline.
///
/// Every variant is recovered before the API boundary: execution
/// failures degrade to empty row sets, missing embeddings to an
/// "unavailable" answer, and LLM fallback errors to a static
/// suggestion list. None of these surface as a raw 500.
#[derive(Error, Debug)]
pub enum AssetGraphError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Query execution error: {0}")]
    QueryExecution(String),

    #[error("Vector search unavailable: embedding provider not configured")]
    EmbeddingUnavailable,

    #[error("LLM fallback error: {0}")]
    LlmFallback(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
