use colorizer_service::config::ColorizerConfig;
use colorizer_service::startup::Application;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::io::Cursor;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub upload_dir: String,
    pub results_dir: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upload_dir = format!("target/test-uploads-{}", Uuid::new_v4());
        let results_dir = format!("target/test-results-{}", Uuid::new_v4());

        let mut config = ColorizerConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.storage.upload_dir = upload_dir.clone();
        config.storage.results_dir = results_dir.clone();
        // No credential: every request deterministically takes the local
        // fallback path, so tests never touch the network.
        config.inference.api_token = None;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            upload_dir,
            results_dir,
        }
    }

    pub async fn upload_count(&self) -> usize {
        count_files(&self.upload_dir).await
    }

    pub async fn result_count(&self) -> usize {
        count_files(&self.results_dir).await
    }

    /// Cleanup test resources (storage directories).
    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.upload_dir).await;
        let _ = tokio::fs::remove_dir_all(&self.results_dir).await;
    }
}

async fn count_files(dir: &str) -> usize {
    let mut entries = tokio::fs::read_dir(dir).await.expect("read dir");
    let mut count = 0;
    while entries.next_entry().await.expect("dir entry").is_some() {
        count += 1;
    }
    count
}

/// Encode a solid-color PNG for upload fixtures.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb(rgb));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, image::ImageOutputFormat::Png)
        .expect("encode test image");
    buffer.into_inner()
}

/// First pixel of an encoded image, for asserting on channel math.
pub fn first_pixel(bytes: &[u8]) -> [u8; 3] {
    image::load_from_memory(bytes)
        .expect("decode image")
        .to_rgb8()
        .get_pixel(0, 0)
        .0
}
