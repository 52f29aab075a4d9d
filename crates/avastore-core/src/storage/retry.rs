//! Retry for transient SQLite errors
//!
//! Busy and locked errors show up when the CLI edits the catalog while the
//! terminal UI holds the same database open.

use std::future::Future;
use std::time::Duration;

/// Maximum number of retry attempts for database operations
pub const MAX_RETRIES: u32 = 5;

/// Check if a SQLite error is transient and should be retried
///
/// Covers SQLITE_BUSY (5), SQLITE_LOCKED (6), SQLITE_IOERR (10) and the
/// extended codes built on them (BUSY_SNAPSHOT, IOERR_READ/WRITE/FSYNC/LOCK).
pub fn is_transient_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string());
            matches!(
                code.as_deref(),
                Some("5")     // SQLITE_BUSY
                | Some("6")   // SQLITE_LOCKED
                | Some("10")  // SQLITE_IOERR
                | Some("266") // SQLITE_IOERR_READ
                | Some("517") // SQLITE_BUSY_RECOVERY
                | Some("1032") // SQLITE_BUSY_SNAPSHOT
                | Some("2314") // SQLITE_IOERR_WRITE
                | Some("3338") // SQLITE_IOERR_FSYNC
                | Some("5386") // SQLITE_IOERR_LOCK
            )
        }
        _ => false,
    }
}

/// Delay before retry `attempt`: 200ms doubling each time
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(200 * 2u64.pow(attempt.saturating_sub(1)))
}

/// Run `operation`, retrying transient errors with exponential backoff
pub async fn with_retry<F, Fut, T>(label: &str, operation: F) -> std::result::Result<T, sqlx::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    let mut attempts = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if is_transient_error(&e) && attempts < MAX_RETRIES => {
                attempts += 1;
                let delay = backoff_delay(attempts);
                tracing::debug!(
                    error = %e,
                    operation = label,
                    attempt = attempts,
                    max_retries = MAX_RETRIES,
                    delay_ms = delay.as_millis(),
                    "Database transient error, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
