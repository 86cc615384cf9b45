use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::models::config::OcrServerConfig;
use crate::models::text_block::TextBlock;

/// HTTP client for the external OCR recognition server
#[derive(Clone)]
pub struct HttpOcrClient {
    client: reqwest::Client,
    base_url: String,
    min_score: f64,
}

#[derive(Serialize)]
struct ImageRequest {
    image_base64: String,
}

/// Single recognized region with bounding box coordinates
#[derive(Deserialize, Clone, Debug)]
struct TextRegion {
    #[serde(rename = "box")]
    bbox: Vec<Vec<f64>>, // 4 corner points [[x1,y1], [x2,y2], [x3,y3], [x4,y4]]
    text: String,
    score: f64,
}

/// OCR response from the recognition server
#[derive(Deserialize)]
struct OcrResponse {
    blocks: Vec<TextRegion>,
    #[allow(dead_code)]
    raw_text: String, // Legacy concatenated text
}

impl TextRegion {
    /// Get topmost y-coordinate (for reading-order sorting)
    fn top_y(&self) -> f64 {
        self.bbox.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min)
    }

    /// Get leftmost x-coordinate (for left-to-right sorting)
    fn left_x(&self) -> f64 {
        self.bbox.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min)
    }
}

impl HttpOcrClient {
    /// Create a new OCR client from the server configuration
    pub fn new(config: &OcrServerConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            min_score: config.min_score,
        })
    }

    /// Check if the server is healthy
    pub async fn health_check(&self) -> Result<(), String> {
        let url = format!("{}/health", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Health check failed: {}", e))?;
        Ok(())
    }

    /// Encode image to base64 PNG
    fn encode_image(image: &DynamicImage) -> Result<String, String> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| format!("Failed to encode image: {}", e))?;
        Ok(general_purpose::STANDARD.encode(&buffer))
    }

    /// Order regions into reading order and map them to text blocks.
    /// Low-confidence regions are dropped first.
    fn regions_to_blocks(regions: Vec<TextRegion>, min_score: f64) -> Vec<TextBlock> {
        let mut kept: Vec<TextRegion> = regions
            .into_iter()
            .filter(|r| r.score >= min_score)
            .collect();

        // Top-to-bottom, then left-to-right
        kept.sort_by(|a, b| {
            a.top_y()
                .partial_cmp(&b.top_y())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    a.left_x()
                        .partial_cmp(&b.left_x())
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });

        kept.into_iter().map(|r| TextBlock::new(r.text)).collect()
    }

    /// Recognize text regions in an image and return them as blocks in
    /// reading order
    pub async fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextBlock>, String> {
        let image_base64 = Self::encode_image(image)?;
        let url = format!("{}/ocr", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ImageRequest { image_base64 })
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("OCR server error: {}", error_text));
        }

        let data: OcrResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        Ok(Self::regions_to_blocks(data.blocks, self.min_score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::text_block::ScriptHint;

    fn region(text: &str, x: f64, y: f64, score: f64) -> TextRegion {
        TextRegion {
            bbox: vec![
                vec![x, y],
                vec![x + 50.0, y],
                vec![x + 50.0, y + 20.0],
                vec![x, y + 20.0],
            ],
            text: text.to_string(),
            score,
        }
    }

    #[test]
    fn test_client_creation() {
        let result = HttpOcrClient::new(&OcrServerConfig::default());
        assert!(result.is_ok(), "client creation should succeed");
    }

    #[test]
    fn test_regions_sorted_into_reading_order() {
        let regions = vec![
            region("지방 5g", 10.0, 80.0, 0.9),
            region("나트륨 200mg", 120.0, 10.0, 0.9),
            region("단백질 10g", 10.0, 10.0, 0.9),
        ];

        let blocks = HttpOcrClient::regions_to_blocks(regions, 0.3);
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();

        assert_eq!(texts, vec!["단백질 10g", "나트륨 200mg", "지방 5g"]);
    }

    #[test]
    fn test_low_score_regions_dropped() {
        let regions = vec![
            region("단백질 10g", 10.0, 10.0, 0.9),
            region("###@@@", 10.0, 40.0, 0.1),
        ];

        let blocks = HttpOcrClient::regions_to_blocks(regions, 0.3);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "단백질 10g");
    }

    #[test]
    fn test_blocks_carry_script_hint() {
        let regions = vec![region("단백질 Protein 10g", 0.0, 0.0, 0.9)];

        let blocks = HttpOcrClient::regions_to_blocks(regions, 0.3);
        assert_eq!(blocks[0].script, Some(ScriptHint::Mixed));
    }
}
