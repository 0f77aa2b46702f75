use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ColorizeResponse {
    pub success: bool,
    /// Base64-encoded result image.
    pub colorized_image: String,
    /// Name usable with GET /download/{name}.
    pub result_path: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct BatchItemResponse {
    pub success: bool,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorized_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResponse {
    pub fn success(original_name: String, colorized_image: String, result_path: String) -> Self {
        Self {
            success: true,
            original_name,
            colorized_image: Some(colorized_image),
            result_path: Some(result_path),
            error: None,
        }
    }

    pub fn failure(original_name: String, error: String) -> Self {
        Self {
            success: false,
            original_name,
            colorized_image: None,
            result_path: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<BatchItemResponse>,
    pub processed_count: usize,
    pub total_count: usize,
    pub timestamp: String,
}
