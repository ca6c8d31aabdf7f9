//! Catalog entry model shared by the `classes`, `races`, and
//! `quest_levels` tables.

use dungeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A row from one of the catalog tables.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct CatalogEntry {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    pub name: String,
    #[serde(skip)]
    pub is_deleted: bool,
    #[serde(skip)]
    pub deleted_at: Option<Timestamp>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// Result of deleting a catalog entry together with its dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Dependents moved from active to archived.
    pub archived: u64,
    /// Whether the catalog row itself was soft-deleted.
    pub deleted: bool,
}
