//! Product image uploads

use std::path::{Path, PathBuf};

use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::catalog::Product;
use crate::config::UploadConfig;
use crate::storage::ProductRepository;
use crate::{Error, Result};

/// Storage backend for product images
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image and return its public URL
    async fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String>;

    /// Remove a previously uploaded image. Returns false if it was not found.
    async fn delete(&self, url: &str) -> Result<bool>;

    /// Upload several images in order. All or nothing: on the first failure
    /// the images already stored by this call are removed again.
    async fn upload_many(&self, files: &[(String, Vec<u8>)]) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(files.len());
        for (file_name, bytes) in files {
            match self.upload(file_name, bytes).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    tracing::warn!(file = %file_name, stored = urls.len(), "Batch upload failed, rolling back");
                    for url in &urls {
                        if let Err(cleanup) = self.delete(url).await {
                            tracing::warn!(url = %url, error = %cleanup, "Failed to remove image");
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(urls)
    }
}

/// Delete a product and the images it uploaded to `store`
///
/// Returns the deleted product and how many images were removed, or `None`
/// when no such product exists. Image URLs from elsewhere are left alone and
/// image failures are logged without undoing the delete.
pub async fn delete_product(
    repo: &ProductRepository<'_>,
    store: &dyn ImageStore,
    id: i64,
) -> Result<Option<(Product, usize)>> {
    let Some(product) = repo.find_by_id(id).await? else {
        return Ok(None);
    };
    if !repo.delete(id).await? {
        return Ok(None);
    }

    let mut removed = 0;
    for url in &product.images {
        match store.delete(url).await {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(e) => tracing::warn!(url = %url, error = %e, "Failed to delete image"),
        }
    }
    Ok(Some((product, removed)))
}

/// Image store backed by a local directory per bucket
pub struct LocalImageStore {
    bucket_dir: PathBuf,
    bucket: String,
    max_bytes: u64,
    base_url: Url,
}

impl LocalImageStore {
    pub fn new(storage_root: &Path, config: &UploadConfig) -> Result<Self> {
        if config.bucket.is_empty() || config.bucket.contains(['/', '\\']) || config.bucket == ".." {
            return Err(Error::Config(format!("Invalid storage bucket: {:?}", config.bucket)));
        }

        let mut base = config.public_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            bucket_dir: storage_root.join(&config.bucket),
            bucket: config.bucket.clone(),
            max_bytes: config.max_bytes,
            base_url: Url::parse(&base)?,
        })
    }

    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    fn validate(&self, bytes: &[u8]) -> Result<image::ImageFormat> {
        if bytes.len() as u64 > self.max_bytes {
            return Err(Error::Upload(format!(
                "Image size must be less than {}",
                format_size(self.max_bytes)
            )));
        }
        image::guess_format(bytes).map_err(|_| Error::Upload("File must be an image".to_string()))
    }

    fn public_url(&self, stored_name: &str) -> Result<String> {
        Ok(self
            .base_url
            .join(&format!("{}/{}", self.bucket, stored_name))?
            .to_string())
    }

    /// Stored file name for a URL produced by this store
    fn stored_name(&self, url: &str) -> Option<String> {
        let url = Url::parse(url).ok()?;
        let rest = url.as_str().strip_prefix(self.base_url.as_str())?;
        let name = rest.strip_prefix(&format!("{}/", self.bucket))?;
        if name.is_empty() || name.contains('/') || name.starts_with('.') {
            return None;
        }
        Some(name.to_string())
    }
}

#[async_trait::async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let format = self.validate(bytes)?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");

        let random = Uuid::new_v4().simple().to_string();
        let stored_name = format!(
            "{}_{}.{}",
            Utc::now().timestamp_millis(),
            &random[..8],
            extension
        );

        tokio::fs::create_dir_all(&self.bucket_dir).await?;
        tokio::fs::write(self.bucket_dir.join(&stored_name), bytes).await?;

        tracing::info!(
            original = file_name,
            stored = %stored_name,
            bytes = bytes.len(),
            "Uploaded image"
        );

        self.public_url(&stored_name)
    }

    async fn delete(&self, url: &str) -> Result<bool> {
        let Some(name) = self.stored_name(url) else {
            tracing::debug!(url, "Not an image from this store");
            return Ok(false);
        };

        match tokio::fs::remove_file(self.bucket_dir.join(&name)).await {
            Ok(()) => {
                tracing::info!(stored = %name, "Deleted image");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use crate::storage::Database;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

    fn store(max_bytes: u64) -> (LocalImageStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("avastore-upload-{}", Uuid::new_v4()));
        let config = UploadConfig {
            bucket: "products".to_string(),
            max_bytes,
            public_base_url: "http://localhost:8080/storage".to_string(),
        };
        (LocalImageStore::new(&root, &config).unwrap(), root)
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_returns_url() {
        let (store, root) = store(1024);

        let url = store.upload("cryo.png", PNG).await.unwrap();
        assert!(url.starts_with("http://localhost:8080/storage/products/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        let (millis, rest) = name.split_once('_').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest.len(), "12345678.png".len());

        let written = std::fs::read(store.bucket_dir().join(name)).unwrap();
        assert_eq!(written, PNG);

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_uploads_never_collide() {
        let (store, root) = store(1024);
        let a = store.upload("same.png", PNG).await.unwrap();
        let b = store.upload("same.png", PNG).await.unwrap();
        assert_ne!(a, b);
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_oversized() {
        let (store, root) = store(16);

        let err = store.upload("notes.txt", b"hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Upload error: File must be an image");

        let err = store.upload("big.png", PNG).await.unwrap_err();
        assert!(matches!(err, Error::Upload(_)));
        assert!(!store.bucket_dir().exists());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, root) = store(1024);
        let url = store.upload("a.png", PNG).await.unwrap();

        assert!(store.delete(&url).await.unwrap());
        assert!(!store.delete(&url).await.unwrap());
        assert!(!store.delete("https://elsewhere.example/products/a.png").await.unwrap());
        assert!(!store.delete("not a url").await.unwrap());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_upload_many() {
        let (store, root) = store(1024);
        let files = vec![
            ("a.png".to_string(), PNG.to_vec()),
            ("b.png".to_string(), PNG.to_vec()),
        ];
        let urls = store.upload_many(&files).await.unwrap();
        assert_eq!(urls.len(), 2);

        let bad = vec![("a.txt".to_string(), b"text".to_vec())];
        assert!(store.upload_many(&bad).await.is_err());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_nothing_behind() {
        let (store, root) = store(1024);
        let files = vec![
            ("cryo.png".to_string(), PNG.to_vec()),
            ("notes.txt".to_string(), b"text".to_vec()),
        ];
        assert!(store.upload_many(&files).await.is_err());

        let leftovers = std::fs::read_dir(store.bucket_dir())
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftovers, 0);

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_delete_product_removes_its_images() {
        let (store, root) = store(1024);
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);

        let uploaded = store.upload("warm.png", PNG).await.unwrap();
        let draft = ProductDraft {
            name: "Warm Pro".to_string(),
            price: "120 €".to_string(),
            images: vec![uploaded.clone(), "https://cdn.example/warm.png".to_string()],
            ..Default::default()
        };
        let product = repo.create(&draft).await.unwrap();

        let (deleted, removed) = delete_product(&repo, &store, product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deleted.id, product.id);
        assert_eq!(removed, 1);
        assert!(repo.find_by_id(product.id).await.unwrap().is_none());
        assert!(!store.delete(&uploaded).await.unwrap());

        assert!(delete_product(&repo, &store, product.id).await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn test_invalid_bucket() {
        let config = UploadConfig {
            bucket: "../etc".to_string(),
            ..Default::default()
        };
        assert!(LocalImageStore::new(Path::new("/tmp"), &config).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(5 * 1024 * 1024), "5MB");
        assert_eq!(format_size(2048), "2KB");
    }
}
