// rest/routes/generate.rs — generation route.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::generate::model::GenerationOutcome;
use crate::AppContext;

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub module: String,
}

pub async fn generate(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body.module.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Module description is required" })),
        ));
    }

    info!(module_len = body.module.len(), "generation requested");
    match ctx.generator.generate(&body.module).await {
        GenerationOutcome::Success(value) => Ok(Json(value)),
        GenerationOutcome::Failure(failure) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": failure.error,
                "raw_response": failure.raw_response,
            })),
        )),
    }
}
