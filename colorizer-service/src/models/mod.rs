pub mod artifact;
pub mod outcome;

pub use artifact::{ArtifactRef, ArtifactRole};
pub use outcome::{BatchResult, ColorizationOutcome};
