use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::Duration;

use crate::config::AppConfig;
use crate::Result;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the catalog database from the configured data directory
    pub async fn new(config: &AppConfig) -> Result<Self> {
        Self::open(&config.database_path()).await
    }

    /// Open (or create) a database file and run migrations
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!("Connecting to database: {}", db_path.display());

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Create an in-memory database for testing
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    async fn run_migrations(&self) -> Result<()> {
        tracing::debug!("Running database migrations");

        sqlx::query(MIGRATION_001_PRODUCTS)
            .execute(&self.pool)
            .await?;

        sqlx::query(MIGRATION_INDEXES)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

const MIGRATION_001_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price TEXT NOT NULL,
    description_1 TEXT,
    description_2 TEXT,
    description_3 TEXT,
    images TEXT NOT NULL DEFAULT '[]',
    position INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const MIGRATION_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_products_position ON products(position, id)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new_in_memory().await.unwrap();
        db.run_migrations().await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_open_creates_file() {
        let dir = std::env::temp_dir().join(format!("avastore-db-{}", uuid::Uuid::new_v4()));
        let path = dir.join("catalog.db");

        let db = Database::open(&path).await.unwrap();
        assert!(path.exists());
        db.pool().close().await;

        let _ = std::fs::remove_dir_all(&dir);
    }
}
