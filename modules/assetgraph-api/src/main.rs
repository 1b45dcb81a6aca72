use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::{ChatAgent, EmbedAgent, OpenAi};
use assetgraph_common::Settings;
use assetgraph_core::{GraphClient, QueryEngine};

mod rest;

pub struct AppState {
    pub engine: QueryEngine,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();

    let client = GraphClient::connect(
        &settings.neo4j_uri,
        &settings.neo4j_user,
        &settings.neo4j_password,
        &settings.neo4j_db,
    )
    .await?;
    info!(uri = %settings.neo4j_uri, db = %settings.neo4j_db, "Connected to Neo4j");

    // Without an API key the engine still answers template questions;
    // vector search and the LLM fallback degrade gracefully.
    let (chat, embedder): (
        Option<Arc<dyn ChatAgent>>,
        Option<Arc<dyn EmbedAgent>>,
    ) = match &settings.openai_api_key {
        Some(key) => {
            let openai = Arc::new(
                OpenAi::new(key.as_str(), settings.openai_model.as_str())
                    .with_embedding_model(settings.embedding_model.as_str()),
            );
            let chat: Arc<dyn ChatAgent> = openai.clone();
            let embedder: Arc<dyn EmbedAgent> = openai;
            (Some(chat), Some(embedder))
        }
        None => {
            info!("OPENAI_API_KEY not set; vector search and LLM fallback disabled");
            (None, None)
        }
    };

    let engine = QueryEngine::new(client, chat, embedder);
    let state = Arc::new(AppState { engine });

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/health", get(rest::health))
        .route("/qa", post(rest::qa))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", settings.api_host, settings.api_port);
    info!("AssetGraph API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
