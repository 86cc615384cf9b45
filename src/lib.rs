pub mod models;
pub mod services;

pub use models::config::AppConfig;
pub use models::nutrition::NutritionItem;
pub use models::step_data::StepStats;
pub use models::text_block::{ScriptHint, TextBlock};
pub use services::config::ConfigManager;
pub use services::ocr::parse_nutrition;
pub use services::scanner::ScanService;
pub use services::step_tracker::{SharedStepTracker, StepTracker};
