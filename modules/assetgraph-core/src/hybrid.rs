use std::sync::Arc;

use ai_client::EmbedAgent;
use neo4rs::query;
use serde_json::Value;
use tracing::{debug, warn};

use assetgraph_common::{LocationFilter, ParamValue, ResultRow};

use crate::executor::bind_param;
use crate::GraphClient;

/// Outcome of a hybrid search. The two empty cases are distinct
/// because the formatter phrases them differently: no asset passed the
/// location filter, versus assets passed but none could be ranked.
#[derive(Debug)]
pub enum HybridOutcome {
    Ranked(Vec<ResultRow>),
    NoLocationMatches,
    NoSemanticMatches,
    Unavailable,
}

/// An asset that passed the location filter, with its stored
/// description embedding.
#[derive(Debug, Clone)]
pub struct AssetCandidate {
    pub name: String,
    pub city: String,
    pub state: String,
    pub building_type: String,
    pub platform: String,
    pub embedding: Vec<f64>,
}

/// Two-phase search for questions that combine a location constraint
/// with a semantic one. The order is fixed: filter by location first,
/// then rank only the filtered set by similarity. Ranking the whole
/// corpus is never allowed; it would defeat the geographic constraint
/// and cost more.
pub struct HybridRanker {
    client: GraphClient,
    embedder: Option<Arc<dyn EmbedAgent>>,
}

impl HybridRanker {
    pub fn new(client: GraphClient, embedder: Option<Arc<dyn EmbedAgent>>) -> Self {
        Self { client, embedder }
    }

    pub async fn search(
        &self,
        location: &LocationFilter,
        phrase: &str,
        limit: usize,
    ) -> Result<HybridOutcome, neo4rs::Error> {
        let Some(embedder) = &self.embedder else {
            return Ok(HybridOutcome::Unavailable);
        };

        // Phase 1: location filter.
        let candidates = self.fetch_candidates(location).await?;
        debug!(
            candidates = candidates.len(),
            phrase, "Hybrid filter phase complete"
        );

        // Zero filter hits means the rank phase is skipped entirely,
        // including the embedding call.
        if candidates.is_empty() {
            return Ok(HybridOutcome::NoLocationMatches);
        }

        // Phase 2: semantic rank over the filtered set only.
        let query_embedding = match embedder.embed(phrase).await {
            Ok(e) => e.iter().map(|v| *v as f64).collect::<Vec<f64>>(),
            Err(e) => {
                warn!(error = %e, "Embedding call failed, hybrid search unavailable");
                return Ok(HybridOutcome::Unavailable);
            }
        };

        let ranked = rank_candidates(candidates, &query_embedding, limit);
        if ranked.is_empty() {
            return Ok(HybridOutcome::NoSemanticMatches);
        }
        Ok(HybridOutcome::Ranked(ranked))
    }

    /// Fetch assets satisfying the location predicate, with their
    /// stored description embeddings.
    async fn fetch_candidates(
        &self,
        location: &LocationFilter,
    ) -> Result<Vec<AssetCandidate>, neo4rs::Error> {
        let (cypher, params) = filter_query(location);

        let mut q = query(&cypher);
        for (name, value) in &params {
            q = bind_param(q, name, value);
        }

        let mut candidates = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let name: String = row.get("name").unwrap_or_default();
            let embedding: Vec<f64> = row.get("embedding").unwrap_or_default();
            if name.is_empty() || embedding.is_empty() {
                continue;
            }
            candidates.push(AssetCandidate {
                name,
                city: row.get("city").unwrap_or_default(),
                state: row.get("state").unwrap_or_default(),
                building_type: row.get("building_type").unwrap_or_default(),
                platform: row.get("platform").unwrap_or_default(),
                embedding,
            });
        }
        Ok(candidates)
    }
}

/// Build the filter-phase Cypher for whichever location fields are set.
fn filter_query(location: &LocationFilter) -> (String, Vec<(&'static str, ParamValue)>) {
    const PROJECTION: &str = "RETURN a.name AS name, a.city AS city, a.state AS state, \
         a.building_type AS building_type, a.platform AS platform, \
         a.embedding AS embedding";

    if let Some(region) = &location.region {
        let cypher = format!(
            "MATCH (a:Asset)-[:LOCATED_IN]->(:City)-[:PART_OF]->(:State)-[:PART_OF]->(:Region {{name: $region}}) \
             WHERE a.embedding IS NOT NULL {PROJECTION}"
        );
        return (cypher, vec![("region", ParamValue::Str(region.clone()))]);
    }

    let mut clauses = vec!["a.embedding IS NOT NULL".to_string()];
    let mut params = Vec::new();
    if let Some(state) = &location.state {
        clauses.push("a.state = $state".to_string());
        params.push(("state", ParamValue::Str(state.clone())));
    }
    if let Some(city) = &location.city {
        clauses.push("a.city = $city".to_string());
        params.push(("city", ParamValue::Str(city.clone())));
    }

    let cypher = format!(
        "MATCH (a:Asset) WHERE {} {PROJECTION}",
        clauses.join(" AND ")
    );
    (cypher, params)
}

/// Rank filtered candidates by cosine similarity to the query
/// embedding. Pure; unit-testable without a live index.
pub fn rank_candidates(
    candidates: Vec<AssetCandidate>,
    query_embedding: &[f64],
    limit: usize,
) -> Vec<ResultRow> {
    let mut scored: Vec<(AssetCandidate, f64)> = candidates
        .into_iter()
        .filter_map(|c| {
            let sim = cosine_similarity(&c.embedding, query_embedding);
            sim.is_finite().then_some((c, sim))
        })
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(c, sim)| {
            let mut row = ResultRow::new();
            row.insert("name".to_string(), Value::String(c.name));
            row.insert(
                "location".to_string(),
                Value::String(format!("{}, {}", c.city, c.state)),
            );
            row.insert("type".to_string(), Value::String(c.building_type));
            row.insert("platform".to_string(), Value::String(c.platform));
            row.insert(
                "similarity_score".to_string(),
                Value::from(sim.clamp(0.0, 1.0)),
            );
            row
        })
        .collect()
}

/// Manual cosine similarity: dot(a,b) / (|a| * |b|). Used instead of a
/// native index function so the rank phase can run over an arbitrary
/// filtered subset.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, state: &str, embedding: Vec<f64>) -> AssetCandidate {
        AssetCandidate {
            name: name.to_string(),
            city: "Austin".to_string(),
            state: state.to_string(),
            building_type: "Commercial".to_string(),
            platform: "Real Estate".to_string(),
            embedding,
        }
    }

    #[test]
    fn identical_vectors_similarity_is_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn orthogonal_vectors_similarity_is_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-10);
    }

    #[test]
    fn zero_norm_returns_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn mismatched_lengths_return_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn rank_orders_by_descending_similarity() {
        let query = vec![1.0, 0.0];
        let rows = rank_candidates(
            vec![
                candidate("Far", "Texas", vec![0.0, 1.0]),
                candidate("Near", "Texas", vec![1.0, 0.1]),
                candidate("Mid", "Texas", vec![1.0, 1.0]),
            ],
            &query,
            10,
        );
        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Near", "Mid", "Far"]);
    }

    #[test]
    fn rank_respects_limit() {
        let query = vec![1.0, 0.0];
        let rows = rank_candidates(
            vec![
                candidate("A", "Texas", vec![1.0, 0.0]),
                candidate("B", "Texas", vec![0.9, 0.1]),
                candidate("C", "Texas", vec![0.8, 0.2]),
            ],
            &query,
            2,
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn rank_rows_carry_location_and_score() {
        let rows = rank_candidates(
            vec![candidate("Tower", "Texas", vec![1.0, 0.0])],
            &[1.0, 0.0],
            5,
        );
        assert_eq!(rows[0]["location"], "Austin, Texas");
        let score = rows[0]["similarity_score"].as_f64().unwrap();
        assert!((score - 1.0).abs() < 1e-10);
    }

    #[test]
    fn negative_similarity_clamps_to_zero() {
        let rows = rank_candidates(
            vec![candidate("Opposite", "Texas", vec![-1.0, 0.0])],
            &[1.0, 0.0],
            5,
        );
        assert_eq!(rows[0]["similarity_score"].as_f64().unwrap(), 0.0);
    }

    #[test]
    fn empty_candidate_set_ranks_to_nothing() {
        assert!(rank_candidates(vec![], &[1.0, 0.0], 5).is_empty());
    }
}
