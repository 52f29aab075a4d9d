use anyhow::Result;

use avastore_core::{
    storage::{Database, ProductRepository},
    upload::{delete_product, LocalImageStore},
    AppConfig, Error,
};

pub async fn run(db: &Database, config: &AppConfig, id: i64) -> Result<()> {
    let store = LocalImageStore::new(&config.storage_dir(), &config.uploads)?;
    let (product, removed) = delete_product(&ProductRepository::new(db), &store, id)
        .await?
        .ok_or(Error::ProductNotFound(id))?;

    println!("Deleted product: {} (#{})", product.name, id);
    if removed > 0 {
        println!("Removed {} uploaded image(s)", removed);
    }

    Ok(())
}
