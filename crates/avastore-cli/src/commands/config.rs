use anyhow::Result;

use avastore_core::AppConfig;
use avastore_tui::theme::available_themes;

pub fn run(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("Config: {}", path.display());
    } else {
        config.save()?;
        println!("Wrote default config to {}", path.display());
    }

    println!("Data directory: {}", config.data_dir().display());
    println!("Database: {}", config.database_path().display());
    println!("Uploads: {}", config.storage_dir().join(&config.uploads.bucket).display());
    println!("Carousel images: {}", config.assets_dir().display());
    println!("Log file: {}", config.log_path().display());
    println!(
        "Theme: {} (available: {})",
        config.ui.theme.name,
        available_themes().join(", ")
    );

    Ok(())
}
