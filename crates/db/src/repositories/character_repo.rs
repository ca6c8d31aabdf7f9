//! Repository for the `characters` table.

use dungeon_core::lifecycle::STATUS_ACTIVE;
use dungeon_core::ownership::Privacy;
use dungeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, class_id, race_id, privacy, status, \
                       image_paths, created_at, updated_at";

/// Provides CRUD operations and listing filters for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new active character, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (user_id, title, description, class_id, race_id, privacy, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.class_id)
            .bind(input.race_id)
            .bind(input.privacy.as_str())
            .bind(STATUS_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find a character by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM characters WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All active characters, newest first. Callers filter by visibility.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE status = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Public, active characters, newest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE status = $1 AND privacy = $2 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(STATUS_ACTIVE)
            .bind(Privacy::Public.as_str())
            .fetch_all(pool)
            .await
    }

    /// Every character owned by `user_id`, any status, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an active character. Only non-`None` fields in `input` are applied.
    ///
    /// The status filter is part of the statement, so a row archived after
    /// the caller loaded it is left untouched. Returns `None` if no active
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                class_id = COALESCE($4, class_id),
                race_id = COALESCE($5, race_id),
                privacy = COALESCE($6, privacy)
             WHERE id = $1 AND status = $7 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.class_id)
            .bind(input.race_id)
            .bind(input.privacy.map(Privacy::as_str))
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a character. Image rows go with it via
    /// `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
