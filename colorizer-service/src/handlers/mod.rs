pub mod colorize;
pub mod download;
pub mod health;

pub use colorize::{colorize_batch, colorize_image};
pub use download::download_file;
pub use health::{health_check, list_models, metrics_endpoint};
