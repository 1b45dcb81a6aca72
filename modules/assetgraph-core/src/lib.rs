pub mod client;
pub mod engine;
pub mod executor;
pub mod fallback;
pub mod format;
pub mod hybrid;
pub mod intent;
pub mod normalize;
pub mod patterns;
pub mod vector;

pub use client::GraphClient;
pub use engine::QueryEngine;
pub use executor::QueryExecutor;
pub use fallback::FallbackEscalator;
pub use hybrid::{HybridOutcome, HybridRanker};
pub use vector::{VectorOutcome, VectorSearch};
