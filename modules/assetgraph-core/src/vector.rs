use std::sync::Arc;

use ai_client::EmbedAgent;
use neo4rs::query;
use serde_json::Value;
use tracing::{debug, warn};

use assetgraph_common::ResultRow;

use crate::executor::bind_param;
use crate::normalize::row_to_json;
use crate::GraphClient;

/// Name of the cosine vector index over asset description embeddings.
/// Its dimensionality must match the embedding provider's output size.
pub const VECTOR_INDEX: &str = "asset_description_vector";

const VECTOR_QUERY: &str = "CALL db.index.vector.queryNodes('asset_description_vector', $limit, $embedding) \
     YIELD node AS asset, score \
     RETURN asset.name AS name, \
            asset.city + ', ' + asset.state AS location, \
            asset.building_type AS type, \
            asset.platform AS platform, \
            score AS similarity_score \
     ORDER BY similarity_score DESC";

const VECTOR_COLUMNS: &[&str] = &["name", "location", "type", "platform", "similarity_score"];

/// Outcome of a vector search. `Unavailable` covers both a missing
/// embedding provider and a failed embedding call; callers treat it
/// like an empty result with a distinct message.
#[derive(Debug)]
pub enum VectorOutcome {
    Rows(Vec<ResultRow>),
    Unavailable,
}

/// Nearest-neighbor search over the asset description index.
pub struct VectorSearch {
    client: GraphClient,
    embedder: Option<Arc<dyn EmbedAgent>>,
}

impl VectorSearch {
    pub fn new(client: GraphClient, embedder: Option<Arc<dyn EmbedAgent>>) -> Self {
        Self { client, embedder }
    }

    /// Embed `text` and return the top `limit` assets by cosine
    /// similarity, each row carrying a `similarity_score` column.
    pub async fn search(&self, text: &str, limit: usize) -> Result<VectorOutcome, neo4rs::Error> {
        let Some(embedder) = &self.embedder else {
            return Ok(VectorOutcome::Unavailable);
        };

        let embedding = match embedder.embed(text).await {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Embedding call failed, vector search unavailable");
                return Ok(VectorOutcome::Unavailable);
            }
        };

        debug!(dims = embedding.len(), limit, "Running vector index query");

        let embedding_f64: Vec<f64> = embedding.iter().map(|v| *v as f64).collect();
        let mut q = query(VECTOR_QUERY).param("limit", limit as i64);
        q = bind_param(
            q,
            "embedding",
            &assetgraph_common::ParamValue::FloatList(embedding_f64),
        );

        let mut rows = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let mut json = row_to_json(&row, VECTOR_COLUMNS);
            clamp_score(&mut json);
            rows.push(json);
        }
        Ok(VectorOutcome::Rows(rows))
    }
}

/// Index scores are cosine-derived and expected in [0, 1]; clamp
/// anything the engine reports outside that range.
fn clamp_score(row: &mut ResultRow) {
    let score = row.get("similarity_score").and_then(Value::as_f64);
    if let Some(score) = score {
        let clamped = score.clamp(0.0, 1.0);
        if clamped != score {
            row.insert("similarity_score".to_string(), Value::from(clamped));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clamp_score_bounds_to_unit_interval() {
        let mut row = ResultRow::new();
        row.insert("similarity_score".to_string(), json!(1.2));
        clamp_score(&mut row);
        assert_eq!(row["similarity_score"], json!(1.0));

        let mut row = ResultRow::new();
        row.insert("similarity_score".to_string(), json!(0.42));
        clamp_score(&mut row);
        assert_eq!(row["similarity_score"], json!(0.42));
    }
}
