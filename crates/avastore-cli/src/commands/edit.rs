use anyhow::Result;

use avastore_core::{
    storage::{Database, ProductRepository},
    Error,
};

pub async fn run(
    db: &Database,
    id: i64,
    name: Option<String>,
    price: Option<String>,
    descriptions: Vec<String>,
    images: Vec<String>,
) -> Result<()> {
    let repo = ProductRepository::new(db);
    let product = repo.find_by_id(id).await?.ok_or(Error::ProductNotFound(id))?;

    let mut draft = product.to_draft();
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(price) = price {
        draft.price = price;
    }
    if !descriptions.is_empty() {
        let [d1, d2, d3] = super::description_slots(descriptions)?;
        draft.description_1 = d1;
        draft.description_2 = d2;
        draft.description_3 = d3;
    }
    if !images.is_empty() {
        draft.images = images;
    }

    let updated = repo.update(id, &draft).await?;
    println!("Updated product:");
    super::print_product(&updated);
    Ok(())
}
