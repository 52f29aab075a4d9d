use std::path::PathBuf;

use anyhow::{Context, Result};

use avastore_core::{
    storage::{Database, ProductRepository},
    upload::{ImageStore, LocalImageStore},
    AppConfig, Error,
};

pub async fn run(db: &Database, config: &AppConfig, id: i64, files: &[PathBuf]) -> Result<()> {
    let repo = ProductRepository::new(db);
    let product = repo.find_by_id(id).await?.ok_or(Error::ProductNotFound(id))?;

    let mut payloads = Vec::with_capacity(files.len());
    for file in files {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        payloads.push((file_name, bytes));
    }

    let store = LocalImageStore::new(&config.storage_dir(), &config.uploads)?;
    let urls = store.upload_many(&payloads).await?;

    let mut draft = product.to_draft();
    draft.images.extend(urls.iter().cloned());
    if let Err(e) = repo.update(id, &draft).await {
        // Don't leave orphaned files behind
        for url in &urls {
            if let Err(cleanup) = store.delete(url).await {
                tracing::warn!(url = %url, error = %cleanup, "Failed to remove orphaned upload");
            }
        }
        return Err(e.into());
    }

    for ((file_name, _), url) in payloads.iter().zip(&urls) {
        println!("Uploaded {} to {}", file_name, url);
    }
    println!("Product #{} now has {} image(s)", id, draft.images.len());
    Ok(())
}
