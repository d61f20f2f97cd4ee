//! oficio-ui — client-side workflow service for the Gerador de Ofício
//!
//! Coordinates the interactive letter-building workflow: upload a scanned
//! payment authorization, confirm the extracted debit account, accumulate
//! account-grouped supplier tables, manage signatory profiles, and request
//! the rendered letter from the rendering backend.

pub mod api;
pub mod clients;
pub mod error;

pub use error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use clients::{ExtractionClient, GenerationClient};
use oficio_common::aggregation::AggregationStore;
use oficio_common::flow::UploadFlow;
use oficio_common::signatories::SignatoryRegistry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Scanned authorizations are small PDFs; 20 MiB is generous headroom.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// The single-operator workflow: one upload flow, one set of tables.
///
/// Both live behind one mutex so a commit observes a consistent pair; the
/// flow itself is the logical serialization point for the pending slot.
#[derive(Default)]
pub struct Workflow {
    pub flow: UploadFlow,
    pub tables: AggregationStore,
}

/// Shared state accessible by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<Mutex<Workflow>>,
    pub registry: Arc<SignatoryRegistry>,
    pub extraction: Arc<ExtractionClient>,
    pub generation: Arc<GenerationClient>,
}

impl AppState {
    pub fn new(
        registry: SignatoryRegistry,
        extraction: ExtractionClient,
        generation: GenerationClient,
    ) -> Self {
        Self {
            workflow: Arc::new(Mutex::new(Workflow::default())),
            registry: Arc::new(registry),
            extraction: Arc::new(extraction),
            generation: Arc::new(generation),
        }
    }
}

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    api::routes()
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
