//! PDF-extraction backend client
//!
//! Sends one scanned payment authorization as a multipart upload and returns
//! the structured extraction result.

use oficio_common::model::ExtractionResponse;
use reqwest::multipart;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Extraction client errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Extraction backend returned {0}: {1}")]
    Backend(u16, String),

    #[error("Unusable extraction response: {0}")]
    Parse(String),
}

/// Client for the PDF-extraction backend
pub struct ExtractionClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ExtractionError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExtractionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Submit one document for extraction.
    pub async fn extract(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ExtractionResponse, ExtractionError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/upload", self.base_url);
        tracing::debug!(url = %url, file = %file_name, "Submitting document for extraction");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Backend(status.as_u16(), body));
        }

        let extracted: ExtractionResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        tracing::info!(
            account = %extracted.debit_account,
            suppliers = extracted.records.len(),
            surplus_alert = extracted.surplus_alert,
            "Extraction completed"
        );

        Ok(extracted)
    }
}
