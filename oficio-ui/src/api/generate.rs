//! Letter generation endpoint
//!
//! Assembles the generation request from the current aggregation snapshot,
//! the chosen signatory names and the letter number, calls the rendering
//! backend and streams the document back as a download. Generation is
//! read-only over the tables; a failed round-trip leaves them untouched.

use crate::{ApiError, ApiResult, AppState};
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use oficio_common::request;
use serde::Deserialize;
use tracing::info;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "numeroOficio")]
    pub letter_number: String,
    pub assinatura1: String,
    pub assinatura2: String,
}

/// POST /api/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> ApiResult<Response> {
    for (name, value) in [
        ("numeroOficio", &payload.letter_number),
        ("assinatura1", &payload.assinatura1),
        ("assinatura2", &payload.assinatura2),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{name} is required")));
        }
    }

    let groups = {
        let workflow = state.workflow.lock().await;
        if !request::can_build(workflow.tables.groups()) {
            return Err(ApiError::BadRequest(
                "process at least one document with suppliers before generating".to_string(),
            ));
        }
        workflow.tables.snapshot()
    };

    // The full signatory list travels with the letter; the two chosen slots
    // are plain name strings resolved at selection time.
    let signatories = state.registry.list().await?;

    let generation_request = request::build(
        &payload.letter_number,
        &payload.assinatura1,
        &payload.assinatura2,
        groups,
        signatories,
    );

    let document = state
        .generation
        .render(&generation_request)
        .await
        .map_err(|e| ApiError::Generation(e.to_string()))?;

    let filename = request::download_filename(&payload.letter_number);
    info!(letter = %payload.letter_number, size = document.len(), "Letter generated");

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| ApiError::Internal(format!("invalid download filename: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}
