use anyhow::Result;

use avastore_core::{
    catalog::ordering,
    storage::{Database, ProductRepository},
    AppConfig,
};

pub async fn run(db: &Database, config: &AppConfig) -> Result<()> {
    let repo = ProductRepository::new(db);
    let products = repo.list_all().await?;

    if products.is_empty() {
        println!("No products yet.");
        println!("\nTo add a product, run:");
        println!("  avastore add -n <name> -p <price>");
        return Ok(());
    }

    println!("Products ({}):", products.len());

    let page_size = config.catalog.page_size.max(1);
    let mut index = 0;
    for (page, items) in ordering::group_by_page(&products, page_size) {
        println!("\nPage {}", page);
        for product in items {
            let summary = product.short_description().unwrap_or("");
            println!(
                "  {:>3}. #{:<4} {} - {}  {}",
                index, product.id, product.name, product.price, summary
            );
            index += 1;
        }
    }

    Ok(())
}
