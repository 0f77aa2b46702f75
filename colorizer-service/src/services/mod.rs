pub mod fallback;
pub mod inference;
pub mod metrics;
pub mod orchestrator;
pub mod store;

pub use metrics::{get_metrics, init_metrics};
pub use orchestrator::Colorizer;
pub use store::ArtifactStore;
