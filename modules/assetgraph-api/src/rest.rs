use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::AppState;

#[derive(Deserialize)]
pub struct QaRequest {
    pub question: String,
}

/// POST /qa — answer a natural-language question about the asset graph.
/// Every question runs the full pipeline; an empty one classifies as
/// unknown and comes back as fallback guidance, still a 200.
pub async fn qa(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QaRequest>,
) -> impl IntoResponse {
    let response = state.engine.answer(&req.question).await;
    Json(response)
}

/// GET /health — liveness probe including graph connectivity.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.engine.health().await {
        Ok(count) => Json(json!({ "status": "healthy", "node_count": count })).into_response(),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_question_is_a_valid_request() {
        let req: QaRequest = serde_json::from_str(r#"{"question": ""}"#).unwrap();
        assert_eq!(req.question, "");
    }
}
