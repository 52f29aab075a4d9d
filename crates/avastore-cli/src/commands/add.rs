use anyhow::Result;

use avastore_core::{
    catalog::ProductDraft,
    storage::{Database, ProductRepository},
};

pub async fn run(
    db: &Database,
    name: String,
    price: String,
    descriptions: Vec<String>,
    images: Vec<String>,
) -> Result<()> {
    let [description_1, description_2, description_3] = super::description_slots(descriptions)?;
    let draft = ProductDraft {
        name,
        price,
        description_1,
        description_2,
        description_3,
        images,
    };

    let repo = ProductRepository::new(db);
    let product = repo.create(&draft).await?;

    println!("Created product:");
    super::print_product(&product);
    Ok(())
}
