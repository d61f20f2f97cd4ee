//! Signatory profile CRUD endpoints
//!
//! Thin HTTP shell over the registry; validation and index revalidation
//! happen there. Every mutation responds with the full updated list so the
//! management dialog can re-render from one response.

use crate::{ApiResult, AppState};
use axum::extract::{Path, State};
use axum::Json;
use oficio_common::model::SignatoryProfile;
use tracing::info;

/// GET /api/assinaturas
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<SignatoryProfile>>> {
    Ok(Json(state.registry.list().await?))
}

/// POST /api/assinaturas
pub async fn add(
    State(state): State<AppState>,
    Json(profile): Json<SignatoryProfile>,
) -> ApiResult<Json<Vec<SignatoryProfile>>> {
    let profiles = state.registry.add(profile).await?;
    info!(count = profiles.len(), "Signatory added");
    Ok(Json(profiles))
}

/// PUT /api/assinaturas/{index}
pub async fn update(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(profile): Json<SignatoryProfile>,
) -> ApiResult<Json<Vec<SignatoryProfile>>> {
    let profiles = state.registry.update(index, profile).await?;
    info!(index, "Signatory updated");
    Ok(Json(profiles))
}

/// DELETE /api/assinaturas/{index}
pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<Vec<SignatoryProfile>>> {
    let profiles = state.registry.remove(index).await?;
    info!(index, "Signatory removed");
    Ok(Json(profiles))
}
