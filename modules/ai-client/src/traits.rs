use anyhow::Result;
use async_trait::async_trait;

/// Single-turn chat completion: system preamble + user prompt in,
/// completion text out.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Text embedding: fixed-length float vector for one input.
#[async_trait]
pub trait EmbedAgent: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
