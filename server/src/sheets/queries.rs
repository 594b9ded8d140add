//! Sheet Cache Queries
//!
//! Runtime queries (`sqlx::query` / `sqlx::query_as`) against the
//! `sheet_cache` table; no compile-time database required.

use chrono::Utc;
use sqlx::SqlitePool;

use super::Sheet;

/// A row from the cache: the durable identity plus the last-stored content.
#[derive(Debug, Clone)]
pub struct StoredSheet {
    pub sheet_id: String,
    pub sheet: Sheet,
}

/// Load the cached sheet for a user, if any.
pub async fn load(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<StoredSheet>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT sheet_id, sheet_json FROM sheet_cache WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    match row {
        None => Ok(None),
        Some((sheet_id, json)) => {
            let sheet =
                serde_json::from_str(&json).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            Ok(Some(StoredSheet { sheet_id, sheet }))
        }
    }
}

/// Store a sheet for a user, replacing any prior entry wholesale.
pub async fn store(pool: &SqlitePool, user_id: &str, sheet: &Sheet) -> sqlx::Result<()> {
    let json = serde_json::to_string(sheet).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r"
        INSERT INTO sheet_cache (user_id, sheet_id, sheet_json, synced_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(user_id) DO UPDATE SET
            sheet_id = excluded.sheet_id,
            sheet_json = excluded.sheet_json,
            synced_at = excluded.synced_at
        ",
    )
    .bind(user_id)
    .bind(&sheet.id)
    .bind(json)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}
