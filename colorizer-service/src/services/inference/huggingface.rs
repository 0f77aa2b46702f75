//! Hosted inference client for the example-based colorization model.

use super::{InferenceClient, InferenceError};
use crate::config::InferenceConfig;
use async_trait::async_trait;
use reqwest::Client;

pub struct HuggingFaceClient {
    config: InferenceConfig,
    client: Client,
}

impl HuggingFaceClient {
    pub fn new(config: InferenceConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn infer(
        &self,
        input: &[u8],
        reference: Option<&[u8]>,
    ) -> Result<Vec<u8>, InferenceError> {
        // Fail before any network I/O when no credential is configured.
        let token = self.config.api_token.as_deref().ok_or_else(|| {
            InferenceError::NotConfigured("HUGGING_FACE_TOKEN is not set".to_string())
        })?;

        tracing::debug!(
            url = %self.config.model_url,
            input_len = input.len(),
            has_reference = reference.is_some(),
            "Sending request to inference endpoint"
        );

        // The hosted endpoint takes the raw image as the request body. It
        // has no slot for the reference image yet, so the reference only
        // informs logging here.
        let response = self
            .client
            .post(&self.config.model_url)
            .bearer_auth(token)
            .body(input.to_vec())
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        if bytes.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        Ok(bytes.to_vec())
    }
}
