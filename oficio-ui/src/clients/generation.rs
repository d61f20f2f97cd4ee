//! Letter-rendering backend client
//!
//! Posts the assembled generation request and returns the rendered document
//! as an opaque byte stream.

use oficio_common::model::GenerationRequest;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Generation client errors
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rendering backend returned {0}: {1}")]
    Backend(u16, String),
}

/// Client for the letter-rendering backend
pub struct GenerationClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Render the letter and return the document bytes.
    pub async fn render(&self, request: &GenerationRequest) -> Result<Vec<u8>, GenerationError> {
        let url = format!("{}/gerar-oficio", self.base_url);
        tracing::debug!(
            url = %url,
            letter = %request.letter_number,
            tables = request.groups.len(),
            "Requesting letter rendering"
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        tracing::info!(
            letter = %request.letter_number,
            size = bytes.len(),
            "Letter rendered"
        );

        Ok(bytes.to_vec())
    }
}
