use crate::config::StorageConfig;
use crate::models::{ArtifactRef, ArtifactRole};
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Filesystem-backed store for uploaded inputs and produced results.
///
/// Every save generates a fresh unique name, so concurrent requests never
/// contend on a path and deletes stay best-effort cleanup.
pub struct ArtifactStore {
    upload_dir: PathBuf,
    results_dir: PathBuf,
}

impl ArtifactStore {
    pub async fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let upload_dir = PathBuf::from(&config.upload_dir);
        let results_dir = PathBuf::from(&config.results_dir);
        fs::create_dir_all(&upload_dir).await?;
        fs::create_dir_all(&results_dir).await?;
        Ok(Self {
            upload_dir,
            results_dir,
        })
    }

    fn dir_for(&self, role: ArtifactRole) -> &Path {
        match role {
            ArtifactRole::Input | ArtifactRole::Reference => &self.upload_dir,
            ArtifactRole::Result => &self.results_dir,
        }
    }

    fn path_for(&self, artifact: &ArtifactRef) -> PathBuf {
        self.dir_for(artifact.role).join(&artifact.name)
    }

    /// Write bytes under a freshly generated unique name.
    ///
    /// When an original filename is given it is kept as a sanitized suffix
    /// for traceability. Content is not inspected; any byte sequence is
    /// accepted.
    pub async fn save(
        &self,
        bytes: &[u8],
        role: ArtifactRole,
        original_name: Option<&str>,
    ) -> Result<ArtifactRef, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let name = match original_name {
            Some(original) => format!("{}_{}_{}", role.prefix(), token, sanitize(original)),
            None => format!("{}_{}.png", role.prefix(), token),
        };

        let artifact = ArtifactRef { name, role };
        fs::write(self.path_for(&artifact), bytes).await?;
        Ok(artifact)
    }

    pub async fn read(&self, artifact: &ArtifactRef) -> Result<Vec<u8>, AppError> {
        match fs::read(self.path_for(artifact)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                anyhow::anyhow!("Artifact {} not found", artifact.name),
            )),
            Err(e) => Err(AppError::from(e)),
        }
    }

    /// Look up a result by bare name, as the download endpoint does.
    ///
    /// Rejects anything that could resolve outside the results directory.
    pub async fn read_result(&self, name: &str) -> Result<Vec<u8>, AppError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::NotFound(anyhow::anyhow!("File not found")));
        }

        self.read(&ArtifactRef {
            name: name.to_string(),
            role: ArtifactRole::Result,
        })
        .await
    }

    /// Idempotent delete; a missing file is not an error.
    pub async fn delete(&self, artifact: &ArtifactRef) -> Result<(), AppError> {
        match fs::remove_file(self.path_for(artifact)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }

    pub async fn exists(&self, artifact: &ArtifactRef) -> bool {
        fs::metadata(self.path_for(artifact)).await.is_ok()
    }
}

/// Keep filenames shell- and path-safe without losing the extension.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (ArtifactStore, StorageConfig) {
        let config = StorageConfig {
            upload_dir: format!(
                "{}/colorizer-test-uploads-{}",
                std::env::temp_dir().display(),
                Uuid::new_v4()
            ),
            results_dir: format!(
                "{}/colorizer-test-results-{}",
                std::env::temp_dir().display(),
                Uuid::new_v4()
            ),
        };
        let store = ArtifactStore::new(&config).await.expect("store init");
        (store, config)
    }

    async fn cleanup(config: &StorageConfig) {
        let _ = fs::remove_dir_all(&config.upload_dir).await;
        let _ = fs::remove_dir_all(&config.results_dir).await;
    }

    #[tokio::test]
    async fn save_then_read_round_trips() {
        let (store, config) = test_store().await;

        let payload = b"\x89PNG not really, content is not inspected".to_vec();
        let artifact = store
            .save(&payload, ArtifactRole::Input, Some("page one.png"))
            .await
            .expect("save");

        assert!(artifact.name.starts_with("input_"));
        assert!(artifact.name.ends_with("page_one.png"));
        assert_eq!(store.read(&artifact).await.expect("read"), payload);

        cleanup(&config).await;
    }

    #[tokio::test]
    async fn unique_names_per_save() {
        let (store, config) = test_store().await;

        let a = store
            .save(b"a", ArtifactRole::Result, None)
            .await
            .expect("save a");
        let b = store
            .save(b"b", ArtifactRole::Result, None)
            .await
            .expect("save b");
        assert_ne!(a.name, b.name);

        cleanup(&config).await;
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (store, config) = test_store().await;

        let artifact = store
            .save(b"bytes", ArtifactRole::Input, Some("x.png"))
            .await
            .expect("save");
        assert!(store.exists(&artifact).await);

        store.delete(&artifact).await.expect("first delete");
        assert!(!store.exists(&artifact).await);

        // Absence is not an error.
        store.delete(&artifact).await.expect("second delete");

        cleanup(&config).await;
    }

    #[tokio::test]
    async fn read_missing_artifact_is_not_found() {
        let (store, config) = test_store().await;

        let missing = ArtifactRef {
            name: "input_deadbeef_missing.png".to_string(),
            role: ArtifactRole::Input,
        };
        match store.read(&missing).await {
            Err(AppError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }

        cleanup(&config).await;
    }

    #[tokio::test]
    async fn read_result_rejects_traversal() {
        let (store, config) = test_store().await;

        for name in ["../secret", "..", "a/b.png", "a\\b.png", ""] {
            match store.read_result(name).await {
                Err(AppError::NotFound(_)) => {}
                other => panic!("expected NotFound for {:?}, got {:?}", name, other),
            }
        }

        cleanup(&config).await;
    }
}
