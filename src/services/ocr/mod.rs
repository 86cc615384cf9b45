pub mod http_ocr;
pub mod parser;
pub mod preprocessing;

// Re-export main types
pub use http_ocr::HttpOcrClient;
pub use parser::parse_nutrition;
pub use preprocessing::PreprocessingService;
