//! Use cases behind the HTTP handlers.
//!
//! Services take the persistence contract ([`Store`]) and file storage
//! ([`FileStore`]) as trait objects so they run unchanged against
//! PostgreSQL in production and against in-memory doubles in unit tests.

pub mod catalog;
pub mod character;
pub mod image;
pub mod quest;

#[cfg(test)]
pub(crate) mod testing;

use dungeon_core::catalog::CatalogKind;
use dungeon_core::error::CoreError;
use dungeon_core::storage::FileStore;
use dungeon_core::types::DbId;
use dungeon_db::store::Store;

use crate::error::{AppError, AppResult};

/// Fail with `NotFound` unless a live catalog entry of `kind` exists.
pub(crate) async fn require_catalog_entry(
    store: &dyn Store,
    kind: CatalogKind,
    id: DbId,
) -> AppResult<()> {
    store
        .find_catalog_entry(kind, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: kind.entity(),
            id,
        })?;
    Ok(())
}

/// Error for a status-guarded write that matched no active row.
///
/// The record was archived after it was loaded if it still exists, otherwise
/// it was deleted in the meantime.
pub(crate) fn rejected_write(still_exists: bool, entity: &'static str, id: DbId) -> AppError {
    if still_exists {
        CoreError::InvalidState(format!("{entity} was archived and cannot be modified")).into()
    } else {
        CoreError::NotFound { entity, id }.into()
    }
}

/// Delete stored files, logging failures instead of returning them.
pub(crate) async fn remove_files_best_effort(files: &dyn FileStore, paths: &[String]) {
    for path in paths {
        if let Err(e) = files.delete_if_exists(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove stored image");
        }
    }
}
