//! Canned inference backend for tests.

use super::{InferenceClient, InferenceError};
use async_trait::async_trait;

/// Returns fixed bytes or a fixed failure, without touching the network.
pub struct MockInferenceClient {
    response: Option<Vec<u8>>,
}

impl MockInferenceClient {
    /// Always succeeds with the given bytes. An empty payload is returned
    /// as-is so callers can exercise their empty-response handling.
    pub fn succeeding(bytes: Vec<u8>) -> Self {
        Self {
            response: Some(bytes),
        }
    }

    /// Always fails as if the endpoint were unreachable.
    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn infer(
        &self,
        _input: &[u8],
        _reference: Option<&[u8]>,
    ) -> Result<Vec<u8>, InferenceError> {
        match &self.response {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(InferenceError::Network(
                "mock endpoint unreachable".to_string(),
            )),
        }
    }
}
