mod lib;

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alias::AliasConfig;
use crate::error::Reason;
use crate::model::{RawReference, Reference};
use crate::parser::parse;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub reference: RawReference,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

/// Routes: `GET /health` and `POST /parse`.
pub fn create_app(config: Arc<AliasConfig>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/parse", post(handle_parse))
        .with_state(config)
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_parse(
    State(config): State<Arc<AliasConfig>>,
    Json(request): Json<ParseRequest>,
) -> (StatusCode, Json<ParseResponse>) {
    match parse(request.reference, Some(config.as_ref())) {
        Ok(reference) => {
            let response = ParseResponse {
                reference: Some(reference),
                error: None,
                reason: None,
            };
            (StatusCode::OK, Json(response))
        }
        Err(error) => {
            info!(reason = %error.reason(), "Rejected reference: {}", error);
            let response = ParseResponse {
                reference: None,
                error: Some(error.to_string()),
                reason: Some(error.reason()),
            };
            (StatusCode::BAD_REQUEST, Json(response))
        }
    }
}
