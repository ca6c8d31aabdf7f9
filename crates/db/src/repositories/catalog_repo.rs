//! Repository for the catalog tables (`classes`, `races`, `quest_levels`).
//!
//! All three tables share one shape, so every method takes the
//! [`CatalogKind`] whose table it targets. Table and column names come from
//! `CatalogKind` and are never user input.

use dungeon_core::catalog::CatalogKind;
use dungeon_core::lifecycle::{STATUS_ACTIVE, STATUS_ARCHIVED};
use dungeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{CascadeOutcome, CatalogEntry};

const COLUMNS: &str = "id, name, is_deleted, deleted_at, created_at, updated_at";

pub struct CatalogRepo;

impl CatalogRepo {
    /// Insert a new entry. A live duplicate name fails on `uq_<table>_name`.
    pub async fn create(
        pool: &PgPool,
        kind: CatalogKind,
        name: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (name) VALUES ($1) RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE id = $1 AND deleted_at IS NULL",
            table = kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live entries ordered by name ascending.
    pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE deleted_at IS NULL ORDER BY name ASC",
            table = kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .fetch_all(pool)
            .await
    }

    /// Rename an entry. Returns `None` if it does not exist or is deleted.
    pub async fn rename(
        pool: &PgPool,
        kind: CatalogKind,
        id: DbId,
        name: &str,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET name = $2
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Archive every active dependent of an entry, then soft-delete the entry.
    ///
    /// Both statements run in one transaction: if either fails, neither is
    /// applied. Zero archived dependents is a normal outcome. If the entry
    /// was already deleted the transaction is rolled back and nothing changes.
    pub async fn delete_cascading(
        pool: &PgPool,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<CascadeOutcome, sqlx::Error> {
        let dependent = kind.dependent();
        let mut tx = pool.begin().await?;

        let archive = format!(
            "UPDATE {table} SET status = $2 WHERE {column} = $1 AND status = $3",
            table = dependent.table,
            column = dependent.column,
        );
        let archived = sqlx::query(&archive)
            .bind(id)
            .bind(STATUS_ARCHIVED)
            .bind(STATUS_ACTIVE)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let delete = format!(
            "UPDATE {table} SET is_deleted = TRUE, deleted_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
            table = kind.table()
        );
        let deleted = sqlx::query(&delete)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !deleted {
            // Entry was already gone; keep dependents as they were.
            tx.rollback().await?;
            return Ok(CascadeOutcome {
                archived: 0,
                deleted: false,
            });
        }

        tx.commit().await?;
        tracing::debug!(table = kind.table(), %id, archived, "Catalog cascade committed");
        Ok(CascadeOutcome { archived, deleted })
    }
}
