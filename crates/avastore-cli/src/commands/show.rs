use anyhow::Result;

use avastore_core::{
    storage::{Database, ProductRepository},
    Error,
};

pub async fn run(db: &Database, id: i64) -> Result<()> {
    let repo = ProductRepository::new(db);
    let product = repo.find_by_id(id).await?.ok_or(Error::ProductNotFound(id))?;
    super::print_product(&product);
    Ok(())
}
