use std::sync::Arc;

use ai_client::{ChatAgent, EmbedAgent};
use tracing::debug;

use assetgraph_common::{
    AssetGraphError, Intent, PlanStrategy, QueryCategory, QueryPlan, QueryResponse, ResultRow,
};

use crate::executor::QueryExecutor;
use crate::fallback::FallbackEscalator;
use crate::hybrid::{HybridOutcome, HybridRanker};
use crate::vector::{VectorOutcome, VectorSearch};
use crate::{format, intent, normalize, patterns, GraphClient};

/// The full question-answering pipeline: classify, match a pattern
/// rule, execute (template, vector, or hybrid), normalize, format.
/// Stateless per request; all shared state is the connection pool and
/// the immutable rule tables.
pub struct QueryEngine {
    client: GraphClient,
    executor: QueryExecutor,
    vector: VectorSearch,
    hybrid: HybridRanker,
    fallback: FallbackEscalator,
}

impl QueryEngine {
    /// Dependencies are injected once at startup: the graph client and
    /// the optional AI agents. No global singletons.
    pub fn new(
        client: GraphClient,
        chat: Option<Arc<dyn ChatAgent>>,
        embedder: Option<Arc<dyn EmbedAgent>>,
    ) -> Self {
        Self {
            executor: QueryExecutor::new(client.clone()),
            vector: VectorSearch::new(client.clone(), embedder.clone()),
            hybrid: HybridRanker::new(client.clone(), embedder),
            fallback: FallbackEscalator::new(chat),
            client,
        }
    }

    /// Answer one question. Total: every failure mode degrades to a
    /// well-formed response, never an error.
    pub async fn answer(&self, question: &str) -> QueryResponse {
        let intent = intent::classify(question);
        debug!(
            category = ?intent.category,
            confidence = intent.confidence,
            "Classified question"
        );

        if intent.category == QueryCategory::Unknown {
            return self.fallback.escalate(question, intent).await;
        }

        let Some(plan) = patterns::match_question(question) else {
            return self.fallback.escalate(question, intent).await;
        };

        match &plan.strategy {
            PlanStrategy::Cypher {
                template,
                columns,
                params,
            } => {
                let rows = self.executor.execute(template, columns, params).await;
                let rows = normalize::normalize_rows(rows);
                let answer = format::format_answer(plan.kind, &rows, question);
                matched_response(question, intent, &plan, answer, rows)
            }
            PlanStrategy::VectorSearch { phrase, limit } => {
                let (answer, rows) = match self.vector.search(phrase, *limit).await {
                    Ok(VectorOutcome::Rows(rows)) => {
                        let rows = normalize::normalize_rows(rows);
                        let answer = format::format_answer(plan.kind, &rows, question);
                        (answer, rows)
                    }
                    Ok(VectorOutcome::Unavailable) => {
                        (format::vector_unavailable_answer(), Vec::new())
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Vector search query failed");
                        (format::format_answer(plan.kind, &[], question), Vec::new())
                    }
                };
                matched_response(question, intent, &plan, answer, rows)
            }
            PlanStrategy::Hybrid {
                location,
                phrase,
                limit,
            } => {
                let (answer, rows) = match self.hybrid.search(location, phrase, *limit).await {
                    Ok(HybridOutcome::Ranked(rows)) => {
                        let rows = normalize::normalize_rows(rows);
                        let answer = format::format_answer(plan.kind, &rows, question);
                        (answer, rows)
                    }
                    Ok(HybridOutcome::NoLocationMatches) => {
                        (format::hybrid_no_location_answer(location), Vec::new())
                    }
                    Ok(HybridOutcome::NoSemanticMatches) => (
                        format::hybrid_no_semantic_answer(location, phrase),
                        Vec::new(),
                    ),
                    Ok(HybridOutcome::Unavailable) => {
                        (format::vector_unavailable_answer(), Vec::new())
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Hybrid search query failed");
                        (format::format_answer(plan.kind, &[], question), Vec::new())
                    }
                };
                matched_response(question, intent, &plan, answer, rows)
            }
        }
    }

    /// Liveness probe: a trivial count query against the graph.
    pub async fn health(&self) -> Result<i64, AssetGraphError> {
        let db_err = |e: neo4rs::Error| AssetGraphError::Database(e.to_string());
        let q = neo4rs::query("MATCH (n) RETURN count(n) AS count");
        let mut stream = self.client.graph.execute(q).await.map_err(db_err)?;
        if let Some(row) = stream.next().await.map_err(db_err)? {
            return Ok(row.get("count").unwrap_or(0));
        }
        Ok(0)
    }
}

fn matched_response(
    question: &str,
    intent: Intent,
    plan: &QueryPlan,
    answer: String,
    rows: Vec<ResultRow>,
) -> QueryResponse {
    QueryResponse {
        answer,
        cypher: Some(plan.describe()),
        data: rows,
        question: question.to_string(),
        pattern_matched: true,
        query_type: plan.kind.as_str().to_string(),
        intent_classification: intent,
    }
}
