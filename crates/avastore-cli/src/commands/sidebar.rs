use anyhow::Result;

use avastore_core::{
    catalog::select_whitelisted,
    storage::{Database, ProductRepository},
    AppConfig,
};

pub async fn run(db: &Database, config: &AppConfig) -> Result<()> {
    let repo = ProductRepository::new(db);
    let products = repo.list_all().await?;
    let whitelist = &config.catalog.sidebar_whitelist;
    let selected = select_whitelisted(&products, whitelist);

    println!("Sidebar products ({} of {}):", selected.len(), whitelist.len());
    for product in &selected {
        let summary = product.summary(&config.catalog.fallback_image);
        println!("  {} - {}", summary.name, summary.price);
        if !summary.short_description.is_empty() {
            println!("    {}", summary.short_description);
        }
        println!("    {}", summary.thumbnail);
    }

    let missing: Vec<&String> = whitelist
        .iter()
        .filter(|name| {
            let name = name.trim().to_lowercase();
            !selected.iter().any(|p| p.name.trim().to_lowercase() == name)
        })
        .collect();
    if !missing.is_empty() {
        println!("\nNot in the catalog:");
        for name in missing {
            println!("  {}", name);
        }
    }

    Ok(())
}
