pub mod add;
pub mod config;
pub mod edit;
pub mod list;
pub mod remove;
pub mod reorder;
pub mod run;
pub mod show;
pub mod sidebar;
pub mod upload;

use avastore_core::catalog::Product;

/// Multi-line plain-text rendering used by `show`, `add` and `edit`
pub(crate) fn print_product(product: &Product) {
    println!("  #{} {}", product.id, product.name);
    println!("    Price: {}", product.price);
    for (i, description) in product.descriptions().iter().enumerate() {
        println!("    Description {}: {}", i + 1, description);
    }
    if product.images.is_empty() {
        println!("    Images: none");
    } else {
        println!("    Images:");
        for image in &product.images {
            println!("      {}", image);
        }
    }
    println!("    Updated: {}", product.updated_at.format("%Y-%m-%d %H:%M"));
}

/// Split up to three descriptions into the product's description slots
pub(crate) fn description_slots(
    descriptions: Vec<String>,
) -> anyhow::Result<[Option<String>; 3]> {
    if descriptions.len() > 3 {
        anyhow::bail!("A product has at most 3 descriptions, got {}", descriptions.len());
    }
    let mut slots: [Option<String>; 3] = Default::default();
    for (slot, description) in slots.iter_mut().zip(descriptions) {
        *slot = Some(description);
    }
    Ok(slots)
}
