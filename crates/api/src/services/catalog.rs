//! Admin-managed lookup tables (classes, races, quest levels).

use dungeon_core::catalog::CatalogKind;
use dungeon_core::error::CoreError;
use dungeon_core::types::DbId;
use dungeon_core::validation::validate_catalog_name;
use dungeon_db::models::catalog::{CascadeOutcome, CatalogEntry};
use dungeon_db::store::Store;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Request body for creating or renaming a catalog entry.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CatalogEntryRequest {
    pub name: String,
}

fn not_found(kind: CatalogKind, id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: kind.entity(),
        id,
    }
}

pub async fn list(store: &dyn Store, kind: CatalogKind) -> AppResult<Vec<CatalogEntry>> {
    Ok(store.list_catalog_entries(kind).await?)
}

pub async fn get(store: &dyn Store, kind: CatalogKind, id: DbId) -> AppResult<CatalogEntry> {
    Ok(store
        .find_catalog_entry(kind, id)
        .await?
        .ok_or_else(|| not_found(kind, id))?)
}

pub async fn create(store: &dyn Store, kind: CatalogKind, name: &str) -> AppResult<CatalogEntry> {
    let name = validate_catalog_name(name)?;
    let entry = store.create_catalog_entry(kind, name).await?;
    tracing::info!(kind = %kind, entry_id = %entry.id, name = %entry.name, "Catalog entry created");
    Ok(entry)
}

pub async fn update(
    store: &dyn Store,
    kind: CatalogKind,
    id: DbId,
    name: &str,
) -> AppResult<CatalogEntry> {
    get(store, kind, id).await?;
    let name = validate_catalog_name(name)?;
    let entry = store
        .rename_catalog_entry(kind, id, name)
        .await?
        .ok_or_else(|| not_found(kind, id))?;
    tracing::info!(kind = %kind, entry_id = %id, name = %entry.name, "Catalog entry renamed");
    Ok(entry)
}

/// Archive every active record that references the entry, then soft-delete
/// the entry. Both steps commit together or not at all.
pub async fn delete(store: &dyn Store, kind: CatalogKind, id: DbId) -> AppResult<CascadeOutcome> {
    get(store, kind, id).await?;

    let outcome = store.delete_catalog_cascading(kind, id).await?;
    if !outcome.deleted {
        // Lost a race with a concurrent delete.
        return Err(not_found(kind, id).into());
    }

    tracing::info!(
        kind = %kind,
        entry_id = %id,
        archived = outcome.archived,
        "Catalog entry deleted"
    );
    Ok(outcome)
}
