//! Repository for `character_images` and `quest_images`.

use dungeon_core::lifecycle::STATUS_ACTIVE;
use dungeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{ImageTarget, StoredImage};

pub struct ImageRepo;

impl ImageRepo {
    /// List the current image rows of one owner, oldest first.
    pub async fn list(
        pool: &PgPool,
        target: ImageTarget,
        owner_id: DbId,
    ) -> Result<Vec<StoredImage>, sqlx::Error> {
        let query = format!(
            "SELECT id, {column} AS owner_id, path, created_at FROM {table}
             WHERE {column} = $1 AND deleted_at IS NULL
             ORDER BY created_at ASC, id ASC",
            table = target.image_table(),
            column = target.owner_column(),
        );
        sqlx::query_as::<_, StoredImage>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the whole image set of one active owner in a single
    /// transaction.
    ///
    /// The owner's `image_paths` is written first, filtered on active status,
    /// which also locks the owner row against a concurrent archive. Then the
    /// prior image rows are swapped for one row per new path.
    ///
    /// Returns the prior paths so the caller can remove the files once the
    /// transaction has committed, or `None` (nothing written) if no active
    /// owner with `owner_id` exists.
    pub async fn replace(
        pool: &PgPool,
        target: ImageTarget,
        owner_id: DbId,
        paths: &[String],
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let table = target.image_table();
        let column = target.owner_column();
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(&format!(
            "UPDATE {owner_table} SET image_paths = $2
             WHERE id = $1 AND status = $3 AND deleted_at IS NULL",
            owner_table = target.owner_table()
        ))
        .bind(owner_id)
        .bind(serde_json::json!(paths))
        .bind(STATUS_ACTIVE)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let old_paths = sqlx::query_scalar::<_, String>(&format!(
            "DELETE FROM {table} WHERE {column} = $1 RETURNING path"
        ))
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;

        let insert = format!("INSERT INTO {table} ({column}, path) VALUES ($1, $2)");
        for path in paths {
            sqlx::query(&insert)
                .bind(owner_id)
                .bind(path)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(old_paths))
    }
}
