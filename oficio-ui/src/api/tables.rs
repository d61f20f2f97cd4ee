//! Accumulated account tables endpoint

use crate::api::RecordView;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// One rendered table: the debit account and its tagged supplier rows.
#[derive(Debug, Serialize)]
pub struct TableView {
    pub conta: String,
    pub fornecedores: Vec<RecordView>,
}

/// GET /api/tables
///
/// Groups in first-appearance order, records in confirmation order; the
/// ordering is what the operator sees on screen.
pub async fn tables(State(state): State<AppState>) -> Json<Vec<TableView>> {
    let workflow = state.workflow.lock().await;

    let views = workflow
        .tables
        .groups()
        .iter()
        .map(|group| TableView {
            conta: group.account_key.clone(),
            fornecedores: group.records.iter().map(RecordView::tag).collect(),
        })
        .collect();

    Json(views)
}
