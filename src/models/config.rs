use serde::{Deserialize, Serialize};

/// OCR server connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Regions scoring below this are dropped before parsing
    pub min_score: f64,
}

impl Default for OcrServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:39835".to_string(),
            timeout_secs: 5,
            min_score: 0.3,
        }
    }
}

/// Image preprocessing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreprocessingConfig {
    pub scale_factor: f64,
    pub grayscale: bool,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            grayscale: true,
        }
    }
}

/// Bounds applied to recognized blocks before parsing.
/// The parser itself accepts any input; these keep pathological OCR output
/// from inflating the nutrient-percentage association cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParserLimits {
    pub max_blocks: usize,
    pub max_block_chars: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_blocks: 256,
            max_block_chars: 4096,
        }
    }
}

/// Step counter settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepConfig {
    pub daily_goal: u64,
    pub stride_meters: f64,
    pub kcal_per_step: f64,
    /// Largest step delta accepted from a single sensor update
    pub max_delta_per_update: u64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            daily_goal: 10_000,
            stride_meters: 0.762,
            kcal_per_step: 0.04,
            max_delta_per_update: 2_000,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    pub ocr: OcrServerConfig,
    pub preprocessing: PreprocessingConfig,
    #[serde(default)]
    pub parser: ParserLimits,
    pub steps: StepConfig,
}
