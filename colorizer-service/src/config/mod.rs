use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Name of the hosted colorization model, reported by /health and /models.
pub const MODEL_NAME: &str = "Keiser41/Example_Based_Manga_Colorization";

const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/Keiser41/Example_Based_Manga_Colorization";

#[derive(Debug, Clone, Deserialize)]
pub struct ColorizerConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub storage: StorageConfig,
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Transient area for uploaded inputs and references.
    pub upload_dir: String,
    /// Results stay here until downloaded or manually reaped.
    pub results_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Bearer token for the hosted model. When absent every request takes
    /// the local fallback path.
    pub api_token: Option<String>,
    pub model_url: String,
    pub timeout_secs: u64,
}

impl ColorizerConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env and the APP__ prefix.
        let common = core_config::Config::load()?;

        Ok(ColorizerConfig {
            common,
            storage: StorageConfig {
                upload_dir: get_env("UPLOAD_DIR", "uploads"),
                results_dir: get_env("RESULTS_DIR", "results"),
            },
            inference: InferenceConfig {
                api_token: env::var("HUGGING_FACE_TOKEN")
                    .ok()
                    .filter(|t| !t.is_empty()),
                model_url: get_env("MODEL_URL", DEFAULT_MODEL_URL),
                timeout_secs: env::var("INFERENCE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
