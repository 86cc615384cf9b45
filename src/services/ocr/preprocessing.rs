use image::DynamicImage;

use crate::models::config::PreprocessingConfig;

/// Image preprocessing service for OCR optimization
pub struct PreprocessingService {
    config: PreprocessingConfig,
}

impl PreprocessingService {
    /// Create a new preprocessing service with custom configuration
    pub fn new(config: PreprocessingConfig) -> Self {
        Self { config }
    }

    /// Preprocessing pipeline: grayscale (when enabled) → scale
    pub fn preprocess(&self, image: &DynamicImage) -> DynamicImage {
        let staged = if self.config.grayscale {
            self.to_grayscale(image)
        } else {
            image.clone()
        };

        self.scale(&staged, self.config.scale_factor)
    }

    /// Convert image to grayscale
    pub fn to_grayscale(&self, image: &DynamicImage) -> DynamicImage {
        DynamicImage::ImageLuma8(image.to_luma8())
    }

    /// Scale image by factor
    pub fn scale(&self, image: &DynamicImage, factor: f64) -> DynamicImage {
        let new_width = (image.width() as f64 * factor) as u32;
        let new_height = (image.height() as f64 * factor) as u32;

        image.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
    }
}

impl Default for PreprocessingService {
    fn default() -> Self {
        Self::new(PreprocessingConfig::default())
    }
}
