use crate::models::{ArtifactRef, ArtifactRole, BatchResult, ColorizationOutcome};
use crate::services::fallback;
use crate::services::inference::InferenceClient;
use crate::services::store::ArtifactStore;
use service_core::error::AppError;
use std::sync::Arc;

/// Core decision logic for a colorization request.
///
/// Tries the remote model first and recovers through the deterministic
/// local transform on any remote failure, so availability never hinges on
/// the external endpoint. Only when both paths are exhausted does the
/// request fail, and then without writing a partial artifact.
pub struct Colorizer {
    store: Arc<ArtifactStore>,
    client: Arc<dyn InferenceClient>,
}

impl Colorizer {
    pub fn new(store: Arc<ArtifactStore>, client: Arc<dyn InferenceClient>) -> Self {
        Self { store, client }
    }

    pub async fn colorize(
        &self,
        input: &ArtifactRef,
        reference: Option<&ArtifactRef>,
    ) -> Result<ArtifactRef, AppError> {
        let input_bytes = self.store.read(input).await?;
        let reference_bytes = match reference {
            Some(r) => Some(self.store.read(r).await?),
            None => None,
        };

        let result_bytes = match self
            .client
            .infer(&input_bytes, reference_bytes.as_deref())
            .await
        {
            Ok(bytes) if !bytes.is_empty() => {
                metrics::counter!("colorize_remote_success_total").increment(1);
                tracing::info!(
                    input = %input.name,
                    result_len = bytes.len(),
                    "Remote inference succeeded"
                );
                bytes
            }
            Ok(_) => {
                tracing::warn!(
                    input = %input.name,
                    "Remote inference returned an empty payload, falling back"
                );
                self.colorize_fallback(&input_bytes, input)?
            }
            Err(e) => {
                tracing::warn!(
                    input = %input.name,
                    error = %e,
                    "Remote inference unavailable, falling back"
                );
                self.colorize_fallback(&input_bytes, input)?
            }
        };

        let result = self
            .store
            .save(&result_bytes, ArtifactRole::Result, None)
            .await?;

        tracing::info!(input = %input.name, result = %result.name, "Colorization completed");
        Ok(result)
    }

    fn colorize_fallback(
        &self,
        input_bytes: &[u8],
        input: &ArtifactRef,
    ) -> Result<Vec<u8>, AppError> {
        metrics::counter!("colorize_fallback_total").increment(1);

        fallback::colorize_locally(input_bytes).map_err(|e| {
            metrics::counter!("colorize_failed_total").increment(1);
            tracing::error!(input = %input.name, error = %e, "Fallback colorization failed");
            AppError::UnprocessableImage(e.to_string())
        })
    }

    /// Runs every item through [`colorize`](Self::colorize), isolating
    /// per-item failures so one bad image never aborts its siblings.
    ///
    /// Each input is deleted right after its attempt to bound storage
    /// growth during long batches. The shared reference belongs to the
    /// caller and is deleted once, after the whole batch.
    pub async fn colorize_batch(
        &self,
        inputs: Vec<(ArtifactRef, String)>,
        reference: Option<&ArtifactRef>,
    ) -> BatchResult {
        let total = inputs.len();
        let mut outcomes = Vec::with_capacity(total);

        for (input, original_name) in inputs {
            let outcome = match self.colorize(&input, reference).await {
                Ok(result) => ColorizationOutcome::Success {
                    original_name,
                    result,
                },
                Err(e) => {
                    tracing::error!(
                        input = %input.name,
                        original_name = %original_name,
                        error = %e,
                        "Batch item failed"
                    );
                    ColorizationOutcome::Failure {
                        original_name,
                        error: e.to_string(),
                    }
                }
            };

            if let Err(e) = self.store.delete(&input).await {
                tracing::warn!(input = %input.name, error = %e, "Failed to delete batch input");
            }

            outcomes.push(outcome);
        }

        let processed = outcomes.iter().filter(|o| o.is_success()).count();
        BatchResult {
            outcomes,
            processed,
            total,
        }
    }
}
