use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::retry::with_retry;
use super::Database;
use crate::catalog::{Product, ProductDraft};
use crate::{Error, Result};

/// Repository for product CRUD and admin ordering
pub struct ProductRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: String,
    description_1: Option<String>,
    description_2: Option<String>,
    description_3: Option<String>,
    images: String,
    position: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = Error;

    fn try_from(row: ProductRow) -> Result<Self> {
        Ok(Product {
            id: row.id,
            name: row.name,
            price: row.price,
            description_1: row.description_1,
            description_2: row.description_2,
            description_3: row.description_3,
            images: serde_json::from_str(&row.images)?,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, price, description_1, description_2, description_3,
           images, position, created_at, updated_at
    FROM products
"#;

impl<'a> ProductRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All products in admin order
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let pool = self.db.pool().clone();
        let sql = format!("{SELECT_COLUMNS} ORDER BY position ASC, id ASC");

        let rows: Vec<ProductRow> = with_retry("list products", || {
            let pool = pool.clone();
            let sql = sql.clone();
            async move { sqlx::query_as(&sql).fetch_all(&pool).await }
        })
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let pool = self.db.pool().clone();
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");

        let row: Option<ProductRow> = with_retry("find product", || {
            let pool = pool.clone();
            let sql = sql.clone();
            async move { sqlx::query_as(&sql).bind(id).fetch_optional(&pool).await }
        })
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a product at the end of the admin order
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let draft = draft.normalized()?;
        let images = serde_json::to_string(&draft.images)?;
        let pool = self.db.pool().clone();
        let now = Utc::now();

        let id = with_retry("create product", || {
            let pool = pool.clone();
            let draft = draft.clone();
            let images = images.clone();
            async move {
                sqlx::query(
                    r#"
                    INSERT INTO products (name, price, description_1, description_2, description_3,
                                          images, position, created_at, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?,
                            (SELECT COALESCE(MAX(position) + 1, 0) FROM products), ?, ?)
                    "#,
                )
                .bind(&draft.name)
                .bind(&draft.price)
                .bind(&draft.description_1)
                .bind(&draft.description_2)
                .bind(&draft.description_3)
                .bind(&images)
                .bind(now)
                .bind(now)
                .execute(&pool)
                .await
                .map(|result| result.last_insert_rowid())
            }
        })
        .await?;

        tracing::info!(id, name = %draft.name, "Created product");

        self.find_by_id(id).await?.ok_or(Error::ProductNotFound(id))
    }

    /// Replace a product's fields, keeping its position
    pub async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product> {
        let draft = draft.normalized()?;
        let images = serde_json::to_string(&draft.images)?;
        let pool = self.db.pool().clone();
        let now = Utc::now();

        let affected = with_retry("update product", || {
            let pool = pool.clone();
            let draft = draft.clone();
            let images = images.clone();
            async move {
                sqlx::query(
                    r#"
                    UPDATE products
                    SET name = ?,
                        price = ?,
                        description_1 = ?,
                        description_2 = ?,
                        description_3 = ?,
                        images = ?,
                        updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&draft.name)
                .bind(&draft.price)
                .bind(&draft.description_1)
                .bind(&draft.description_2)
                .bind(&draft.description_3)
                .bind(&images)
                .bind(now)
                .bind(id)
                .execute(&pool)
                .await
                .map(|result| result.rows_affected())
            }
        })
        .await?;

        if affected == 0 {
            return Err(Error::ProductNotFound(id));
        }

        tracing::info!(id, "Updated product");

        self.find_by_id(id).await?.ok_or(Error::ProductNotFound(id))
    }

    /// Delete a product. Returns false when it did not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let pool = self.db.pool().clone();

        let affected = with_retry("delete product", || {
            let pool = pool.clone();
            async move {
                sqlx::query("DELETE FROM products WHERE id = ?")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            }
        })
        .await?;

        if affected > 0 {
            tracing::info!(id, "Deleted product");
        }
        Ok(affected > 0)
    }

    /// Persist a full admin order
    ///
    /// `ids` must list every product exactly once; positions become the
    /// indices in `ids`.
    pub async fn reorder(&self, ids: &[i64]) -> Result<()> {
        let mut sorted = ids.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != ids.len() {
            return Err(Error::Validation("Duplicate product in new order".to_string()));
        }

        let mut tx = self.db.pool().begin().await?;

        let existing: Vec<(i64,)> = sqlx::query_as("SELECT id FROM products ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
        let existing: Vec<i64> = existing.into_iter().map(|(id,)| id).collect();

        if let Some(missing) = sorted.iter().find(|id| existing.binary_search(*id).is_err()) {
            return Err(Error::ProductNotFound(*missing));
        }
        if existing.len() != ids.len() {
            return Err(Error::Validation(format!(
                "New order lists {} of {} products",
                ids.len(),
                existing.len()
            )));
        }

        for (position, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE products SET position = ? WHERE id = ?")
                .bind(position as i64)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(count = ids.len(), "Saved product order");
        Ok(())
    }

    pub async fn count(&self) -> Result<u32> {
        let pool = self.db.pool().clone();

        let count: (i64,) = with_retry("count products", || {
            let pool = pool.clone();
            async move {
                sqlx::query_as("SELECT COUNT(*) FROM products")
                    .fetch_one(&pool)
                    .await
            }
        })
        .await?;

        Ok(count.0 as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: "99 €".to_string(),
            description_1: Some("Recovery".to_string()),
            images: vec!["http://localhost/storage/products/a.png".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);

        let created = repo.create(&draft(" Cryo Sport ")).await.unwrap();
        assert_eq!(created.name, "Cryo Sport");
        assert_eq!(created.position, 0);
        assert_eq!(created.images.len(), 1);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_appends_in_order() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);

        for name in ["Warm Pro", "LedBoots", "Cryo Sport"] {
            repo.create(&draft(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Warm Pro", "LedBoots", "Cryo Sport"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);

        let err = repo.create(&draft("   ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_missing() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);
        let created = repo.create(&draft("Warm Pro")).await.unwrap();

        let mut changed = created.to_draft();
        changed.price = "110 €".to_string();
        changed.images.push("http://localhost/storage/products/b.png".to_string());

        let updated = repo.update(created.id, &changed).await.unwrap();
        assert_eq!(updated.price, "110 €");
        assert_eq!(updated.images.len(), 2);
        assert_eq!(updated.position, created.position);

        let err = repo.update(9999, &changed).await.unwrap_err();
        assert!(matches!(err, Error::ProductNotFound(9999)));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);
        let created = repo.create(&draft("LedBoots")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reorder() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = ProductRepository::new(&db);
        let a = repo.create(&draft("A")).await.unwrap();
        let b = repo.create(&draft("B")).await.unwrap();
        let c = repo.create(&draft("C")).await.unwrap();

        repo.reorder(&[c.id, a.id, b.id]).await.unwrap();
        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);

        assert!(matches!(
            repo.reorder(&[a.id, a.id, b.id]).await.unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            repo.reorder(&[a.id, b.id]).await.unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            repo.reorder(&[a.id, b.id, 4242]).await.unwrap_err(),
            Error::ProductNotFound(4242)
        ));

        // Failed attempts leave the saved order alone
        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
    }
}
