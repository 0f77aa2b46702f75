use crate::models::ArtifactRef;

/// Result of processing one image within a batch.
///
/// Failures carry the original filename so callers can correlate items
/// with what they uploaded.
#[derive(Debug)]
pub enum ColorizationOutcome {
    Success {
        original_name: String,
        result: ArtifactRef,
    },
    Failure {
        original_name: String,
        error: String,
    },
}

impl ColorizationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ColorizationOutcome::Success { .. })
    }

    pub fn original_name(&self) -> &str {
        match self {
            ColorizationOutcome::Success { original_name, .. } => original_name,
            ColorizationOutcome::Failure { original_name, .. } => original_name,
        }
    }
}

/// Ordered per-item outcomes of a batch plus aggregate counts.
///
/// `outcomes` keeps the input order regardless of which items failed, and
/// `processed` counts only the successes.
#[derive(Debug)]
pub struct BatchResult {
    pub outcomes: Vec<ColorizationOutcome>,
    pub processed: usize,
    pub total: usize,
}
