//! nutri-scan
//!
//! Scans nutrition label photos through the OCR server and prints the
//! reconstructed nutrition facts table for each image.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use nutri_scan::services::config::ConfigManager;
use nutri_scan::services::scanner::ScanService;
use nutri_scan::NutritionItem;

fn print_table(items: &[NutritionItem]) {
    if items.is_empty() {
        println!("  (no nutrition entries recognized)");
        return;
    }

    for item in items {
        let percentage = item.percentage.as_deref().unwrap_or("-");
        println!("  {:<16} {:<14} {}", item.name, item.amount, percentage);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the tables
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutri_scan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("Usage: nutri-scan <image>...");
        std::process::exit(2);
    }

    let config = ConfigManager::new()?.load()?;
    let scanner = ScanService::new(&config)?;

    if let Err(e) = scanner.health_check().await {
        tracing::warn!("OCR server not reachable yet: {}", e);
    }

    let mut failures = 0usize;
    for path in &paths {
        match scanner.scan_image(path).await {
            Ok(items) => {
                println!("{}:", path.display());
                print_table(&items);
            }
            Err(e) => {
                // Recognition failures are recoverable - retry with the
                // same or a sharper photo
                eprintln!("{}: recognition failed, try again ({})", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures == paths.len() {
        std::process::exit(1);
    }

    Ok(())
}
