use std::path::Path;

use crate::models::config::{AppConfig, ParserLimits};
use crate::models::nutrition::NutritionItem;
use crate::models::text_block::TextBlock;
use crate::services::ocr::{parse_nutrition, HttpOcrClient, PreprocessingService};

/// Scan pipeline: image file → preprocess → OCR server → nutrition rows.
///
/// Failures from the collaborators (file access, decode, recognition) come
/// back as retryable error strings; the parse step itself never fails.
pub struct ScanService {
    ocr: HttpOcrClient,
    preprocessing: PreprocessingService,
    limits: ParserLimits,
}

impl ScanService {
    /// Create a scan service from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        Ok(Self {
            ocr: HttpOcrClient::new(&config.ocr)?,
            preprocessing: PreprocessingService::new(config.preprocessing.clone()),
            limits: config.parser.clone(),
        })
    }

    /// Check that the OCR server is reachable
    pub async fn health_check(&self) -> Result<(), String> {
        self.ocr.health_check().await
    }

    /// Scan a label photo and return its nutrition rows
    pub async fn scan_image(&self, path: &Path) -> Result<Vec<NutritionItem>, String> {
        let image = image::open(path)
            .map_err(|e| format!("Failed to load image {}: {}", path.display(), e))?;

        let prepared = self.preprocessing.preprocess(&image);

        let blocks = self
            .ocr
            .recognize(&prepared)
            .await
            .map_err(|e| format!("Recognition failed: {}", e))?;

        Ok(self.parse_blocks(blocks))
    }

    /// Parse already-recognized blocks, applying the configured input bounds
    pub fn parse_blocks(&self, blocks: Vec<TextBlock>) -> Vec<NutritionItem> {
        let bounded = self.bound_blocks(blocks);
        parse_nutrition(&bounded)
    }

    /// Cap block count and per-block length so pathological OCR output
    /// cannot inflate the nutrient-percentage association cost
    fn bound_blocks(&self, mut blocks: Vec<TextBlock>) -> Vec<TextBlock> {
        if blocks.len() > self.limits.max_blocks {
            tracing::warn!(
                dropped = blocks.len() - self.limits.max_blocks,
                "dropping recognized blocks over the configured limit"
            );
            blocks.truncate(self.limits.max_blocks);
        }

        for block in &mut blocks {
            if block.text.chars().count() > self.limits.max_block_chars {
                tracing::warn!(
                    limit = self.limits.max_block_chars,
                    "truncating oversized recognized block"
                );
                block.text = block.text.chars().take(self.limits.max_block_chars).collect();
            }
        }

        blocks
    }
}
