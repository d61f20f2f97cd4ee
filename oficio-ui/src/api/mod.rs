//! HTTP API for the letter-building workflow

pub mod generate;
pub mod health;
pub mod signatories;
pub mod tables;
pub mod upload;

use crate::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use oficio_common::classify::{classify, Treatment};
use oficio_common::model::SupplierRecord;
use serde::Serialize;

/// Build all workflow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/upload", post(upload::upload))
        .route("/api/upload/confirm", post(upload::confirm))
        .route("/api/upload/cancel", post(upload::cancel))
        .route("/api/tables", get(tables::tables))
        .route("/api/generate", post(generate::generate))
        .route(
            "/api/assinaturas",
            get(signatories::list).post(signatories::add),
        )
        .route(
            "/api/assinaturas/:index",
            put(signatories::update).delete(signatories::remove),
        )
}

/// One supplier row with its accounting-treatment tag, the shape the tables
/// render from (highlight color and tooltip follow the tag).
#[derive(Debug, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: SupplierRecord,
    pub treatment: Treatment,
}

impl RecordView {
    pub fn tag(record: &SupplierRecord) -> Self {
        Self {
            record: record.clone(),
            treatment: classify(record).treatment,
        }
    }
}
