//! Upload, confirmation and cancellation endpoints
//!
//! One extraction round-trip: the form carries the letter metadata plus the
//! document, the response is the pending extraction for the confirmation
//! dialog. Commit and cancel resolve the pending slot.

use crate::api::RecordView;
use crate::{ApiError, ApiResult, AppState, Workflow};
use axum::extract::{Multipart, State};
use axum::Json;
use oficio_common::flow::PendingExtraction;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Pending extraction as presented for human review.
#[derive(Debug, Serialize)]
pub struct PendingView {
    /// Normalized debit account, editable before confirming
    pub conta: String,
    pub fornecedores: Vec<RecordView>,
    #[serde(rename = "surplusFlagged")]
    pub surplus_flagged: bool,
}

impl PendingView {
    fn from_pending(pending: &PendingExtraction) -> Self {
        Self {
            conta: pending.normalized_account.clone(),
            fornecedores: pending.records.iter().map(RecordView::tag).collect(),
            surplus_flagged: pending.surplus_flagged,
        }
    }
}

/// POST /api/upload (multipart)
///
/// Fields: `numeroOficio`, `assinatura1`, `assinatura2`, `file`. The letter
/// metadata must already be chosen before a document is processed; missing
/// pieces are validation errors and change nothing.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<PendingView>> {
    let mut letter_number: Option<String> = None;
    let mut signatory1: Option<String> = None;
    let mut signatory2: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "numeroOficio" => {
                letter_number = Some(text(field).await?);
            }
            "assinatura1" => {
                signatory1 = Some(text(field).await?);
            }
            "assinatura2" => {
                signatory2 = Some(text(field).await?);
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("autorizacao.pdf")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                file = Some((file_name, data.to_vec()));
            }
            other => {
                warn!(field = %other, "Ignoring unknown upload field");
            }
        }
    }

    let (file_name, bytes) = file.ok_or_else(|| {
        ApiError::BadRequest("attach the payment authorization document".to_string())
    })?;
    require("numeroOficio", &letter_number)?;
    require("assinatura1", &signatory1)?;
    require("assinatura2", &signatory2)?;

    // Claim the pending slot before the round-trip; a busy flow is a conflict
    {
        let mut workflow = state.workflow.lock().await;
        workflow
            .flow
            .begin_submit()
            .map_err(|e| ApiError::Conflict(e.to_string()))?;
    }

    // A client disconnect drops this future mid-await; the guard makes sure
    // the claimed slot does not stay `Submitting` forever in that case.
    let guard = PendingSlotGuard::new(Arc::clone(&state.workflow));

    let result = state.extraction.extract(&file_name, bytes).await;

    let mut workflow = state.workflow.lock().await;
    guard.disarm();
    match result {
        Ok(response) => {
            let pending = workflow.flow.extraction_succeeded(response)?;
            info!(
                account = %pending.normalized_account,
                suppliers = pending.records.len(),
                "Extraction awaiting confirmation"
            );
            Ok(Json(PendingView::from_pending(pending)))
        }
        Err(e) => {
            workflow.flow.extraction_failed();
            Err(ApiError::Extraction(e.to_string()))
        }
    }
}

/// POST /api/upload/confirm
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// The account as reviewed (and possibly corrected) by the operator
    pub conta: String,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub conta: String,
    #[serde(rename = "mergedRecords")]
    pub merged_records: usize,
    #[serde(rename = "surplusAdvisory")]
    pub surplus_advisory: bool,
}

pub async fn confirm(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmRequest>,
) -> ApiResult<Json<ConfirmResponse>> {
    let mut workflow = state.workflow.lock().await;
    let Workflow { flow, tables } = &mut *workflow;

    flow.edit_account(payload.conta)?;
    let outcome = flow.confirm(tables)?;

    info!(
        account = %outcome.account,
        merged = outcome.merged_records,
        advisory = outcome.surplus_advisory,
        "Upload confirmed"
    );

    Ok(Json(ConfirmResponse {
        conta: outcome.account,
        merged_records: outcome.merged_records,
        surplus_advisory: outcome.surplus_advisory,
    }))
}

/// POST /api/upload/cancel
pub async fn cancel(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let mut workflow = state.workflow.lock().await;
    workflow.flow.cancel()?;

    info!("Pending extraction discarded");
    Ok(Json(json!({ "cancelled": true })))
}

/// Releases a claimed pending slot when the upload future is dropped before
/// the extraction round-trip resolves. Between the claim and the reset the
/// flow can only be `Submitting`, so the reset cannot discard anything.
struct PendingSlotGuard {
    workflow: Option<Arc<Mutex<Workflow>>>,
}

impl PendingSlotGuard {
    fn new(workflow: Arc<Mutex<Workflow>>) -> Self {
        Self {
            workflow: Some(workflow),
        }
    }

    /// Called once the flow has moved past `Submitting` under the lock.
    fn disarm(mut self) {
        self.workflow = None;
    }
}

impl Drop for PendingSlotGuard {
    fn drop(&mut self) {
        if let Some(workflow) = self.workflow.take() {
            tokio::spawn(async move {
                workflow.lock().await.flow.extraction_failed();
                warn!("Upload request dropped mid-extraction; pending slot released");
            });
        }
    }
}

async fn text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn require(name: &str, value: &Option<String>) -> ApiResult<()> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ApiError::BadRequest(format!(
            "{name} is required before processing a document"
        ))),
    }
}
