mod common;

use base64::{Engine as _, engine::general_purpose};
use common::{TestApp, first_pixel, solid_png};
use reqwest::StatusCode;
use reqwest::multipart;

#[tokio::test]
async fn colorize_falls_back_when_remote_is_unavailable() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    // Solid gray 2x2: the fallback transform's output is fully predictable.
    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(solid_png(2, 2, [100, 100, 100]))
            .file_name("gray.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let response = client
        .post(format!("{}/colorize", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
    assert!(body["timestamp"].as_str().is_some());

    let encoded = body["colorized_image"].as_str().expect("base64 image");
    let result_bytes = general_purpose::STANDARD
        .decode(encoded)
        .expect("valid base64");
    // Red x1.10, green x1.05, blue untouched.
    assert_eq!(first_pixel(&result_bytes), [110, 105, 100]);

    let result_path = body["result_path"].as_str().expect("result path");
    assert!(result_path.starts_with("colorized_"));

    // Input was transient; result persists until downloaded or reaped.
    assert_eq!(app.upload_count().await, 0);
    assert_eq!(app.result_count().await, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn colorize_with_reference_cleans_up_both_uploads() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new()
        .part(
            "image",
            multipart::Part::bytes(solid_png(2, 2, [50, 50, 50]))
                .file_name("page.png")
                .mime_str("image/png")
                .unwrap(),
        )
        .part(
            "reference",
            multipart::Part::bytes(solid_png(2, 2, [200, 10, 10]))
                .file_name("palette.png")
                .mime_str("image/png")
                .unwrap(),
        );

    let response = client
        .post(format!("{}/colorize", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(app.upload_count().await, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn colorize_without_image_field_is_rejected() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().text("unrelated", "value");

    let response = client
        .post(format!("{}/colorize", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert_eq!(app.upload_count().await, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn colorize_with_empty_filename_is_rejected_before_any_write() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(solid_png(2, 2, [100, 100, 100]))
            .file_name("")
            .mime_str("image/png")
            .unwrap(),
    );

    let response = client
        .post(format!("{}/colorize", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    // No stray artifact written anywhere.
    assert_eq!(app.upload_count().await, 0);
    assert_eq!(app.result_count().await, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn colorize_undecodable_upload_fails_terminally() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(b"this is not an image".to_vec())
            .file_name("broken.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let response = client
        .post(format!("{}/colorize", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().is_some());

    // No partial artifact, and the input was still cleaned up.
    assert_eq!(app.upload_count().await, 0);
    assert_eq!(app.result_count().await, 0);

    app.cleanup().await;
}
