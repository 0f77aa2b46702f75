//! Remote inference backends.
//!
//! The trait keeps the orchestrator independent of the concrete endpoint,
//! so tests can swap in a canned backend.

pub mod huggingface;
pub mod mock;

pub use huggingface::HuggingFaceClient;
pub use mock::MockInferenceClient;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for remote inference calls.
///
/// The orchestrator treats every variant as "remote unavailable" and
/// recovers through the local fallback; none of these cross the HTTP
/// boundary directly.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference endpoint not configured: {0}")]
    NotConfigured(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("empty response from inference endpoint")]
    EmptyResponse,
}

/// Image-to-image inference backend.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Single blocking attempt, no retry. Callers decide how to recover.
    async fn infer(
        &self,
        input: &[u8],
        reference: Option<&[u8]>,
    ) -> Result<Vec<u8>, InferenceError>;
}
