//! Sheet Cache
//!
//! Single-slot-per-user store keyed by platform user id. `put` fetches by
//! id and overwrites the slot; `get` revalidates the stored identity
//! against the upstream service and rewrites the slot with fresh content.
//! A failed revalidation falls back to the stored snapshot rather than
//! failing the read: upstream errors surface the last good content and
//! never mutate the slot.
//! No TTL, no eviction; the last write for a user always wins. Concurrent
//! same-user sync/roll can race on the slot; whole-row overwrites make
//! that benign and it is tolerated, not resolved.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::warn;

use super::{client, queries, Sheet};

/// Errors from a cache write-through (`put`).
#[derive(Error, Debug)]
pub enum CacheError {
    /// Upstream fetch failed (network or non-success status).
    #[error("sheet fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),
    /// The sheet exists but is not publicly readable.
    #[error("sheet is not public")]
    NotPublic,
    /// Local store failure.
    #[error("cache store failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read the user's sheet, revalidating content against upstream.
///
/// No entry means `None` — identity is never invented. When revalidation
/// fails the stored snapshot is returned unchanged; upstream errors never
/// mutate the cache.
pub async fn get(
    pool: &SqlitePool,
    http: &reqwest::Client,
    base_url: &str,
    user_id: &str,
) -> sqlx::Result<Option<Sheet>> {
    let Some(stored) = queries::load(pool, user_id).await? else {
        return Ok(None);
    };

    match client::fetch_sheet(http, base_url, &stored.sheet_id).await {
        Ok(fresh) => {
            queries::store(pool, user_id, &fresh).await?;
            Ok(Some(fresh))
        }
        Err(err) => {
            warn!(
                user_id = %user_id,
                sheet_id = %stored.sheet_id,
                error = %err,
                "Sheet revalidation failed, using cached copy"
            );
            Ok(Some(stored.sheet))
        }
    }
}

/// Fetch a sheet by id and overwrite the user's slot with it.
pub async fn put(
    pool: &SqlitePool,
    http: &reqwest::Client,
    base_url: &str,
    user_id: &str,
    sheet_id: &str,
) -> Result<Sheet, CacheError> {
    let sheet = client::fetch_sheet(http, base_url, sheet_id).await?;
    if !sheet.public {
        return Err(CacheError::NotPublic);
    }
    queries::store(pool, user_id, &sheet).await?;
    Ok(sheet)
}
