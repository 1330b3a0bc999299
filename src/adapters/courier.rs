use crate::domain::model::ManifestPayload;
use crate::utils::error::{PipelineError, Result};
use reqwest::Client;
use std::time::Duration;

const CREATE_MANIFEST_PATH: &str = "api/cmu/create.json";

/// Thin client for the courier create-manifest endpoint. The API expects a
/// form-encoded body carrying `format=json` and `data=<json payload>` with a
/// token in the Authorization header. The token is never logged.
#[derive(Debug, Clone)]
pub struct CourierClient {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl CourierClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Commits a batch of shipments for pickup. Returns the raw JSON
    /// response; interpreting its shape is the reconciler's job.
    pub async fn create_manifest(&self, payload: &ManifestPayload) -> Result<serde_json::Value> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            CREATE_MANIFEST_PATH
        );
        let data = serde_json::to_string(payload)?;

        tracing::info!(
            shipments = payload.shipments.len(),
            pickup = %payload.pickup_location.name,
            %url,
            "Submitting manifest request"
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Token {}", self.token))
            .timeout(self.timeout)
            .form(&[("format", "json"), ("data", data.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| PipelineError::ResponseShape {
                details: format!("response body is not JSON: {}", e),
            })?;

        tracing::debug!("Manifest response: {}", json);
        Ok(json)
    }
}
