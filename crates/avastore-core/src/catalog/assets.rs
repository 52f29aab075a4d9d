use std::path::Path;

use crate::Result;

const IMAGE_EXTENSIONS: &[&str] = &["webp", "jpg", "jpeg", "png", "avif"];

/// Image files in `dir` as public paths under `public_prefix`, sorted by name
///
/// A missing directory yields an empty list so the carousel shows its
/// placeholder instead of failing.
pub async fn list_image_assets(dir: &Path, public_prefix: &str) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "Asset directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_image_name(&name) && entry.file_type().await?.is_file() {
            names.push(name);
        }
    }
    names.sort();

    let prefix = public_prefix.trim_end_matches('/');
    Ok(names
        .into_iter()
        .map(|name| format!("{prefix}/{name}"))
        .collect())
}

fn is_image_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_name() {
        assert!(is_image_name("logo.WEBP"));
        assert!(is_image_name("team.photo.jpeg"));
        assert!(!is_image_name("notes.txt"));
        assert!(!is_image_name("png"));
    }

    #[tokio::test]
    async fn test_lists_sorted_images_only() {
        let dir = std::env::temp_dir().join(format!("avastore-assets-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("nested.png")).unwrap();
        for name in ["b.png", "a.webp", "readme.md"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let assets = list_image_assets(&dir, "/images/teamlogos/").await.unwrap();
        assert_eq!(
            assets,
            vec![
                "/images/teamlogos/a.webp".to_string(),
                "/images/teamlogos/b.png".to_string()
            ]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = std::env::temp_dir().join(format!("avastore-missing-{}", uuid::Uuid::new_v4()));
        assert!(list_image_assets(&dir, "/images").await.unwrap().is_empty());
    }
}
