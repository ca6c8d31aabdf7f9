//! Repository for the `quests` table.

use dungeon_core::lifecycle::STATUS_ACTIVE;
use dungeon_core::ownership::Privacy;
use dungeon_core::types::DbId;
use sqlx::PgPool;

use crate::models::quest::{CreateQuest, Quest, UpdateQuest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, quest_level_id, privacy, status, \
                       image_paths, created_at, updated_at";

/// Provides CRUD operations and listing filters for quests.
///
/// Mirrors [`super::CharacterRepo`] with a single `quest_level_id` reference.
pub struct QuestRepo;

impl QuestRepo {
    /// Insert a new active quest, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuest) -> Result<Quest, sqlx::Error> {
        let query = format!(
            "INSERT INTO quests (user_id, title, description, quest_level_id, privacy, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.quest_level_id)
            .bind(input.privacy.as_str())
            .bind(STATUS_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find a quest by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM quests WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All active quests, newest first. Callers filter by visibility.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests
             WHERE status = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Public, active quests, newest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests
             WHERE status = $1 AND privacy = $2 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(STATUS_ACTIVE)
            .bind(Privacy::Public.as_str())
            .fetch_all(pool)
            .await
    }

    /// Every quest owned by `user_id`, any status, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an active quest. Only non-`None` fields in `input` are applied.
    ///
    /// The status filter is part of the statement, so a row archived after
    /// the caller loaded it is left untouched. Returns `None` if no active
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuest,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!(
            "UPDATE quests SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                quest_level_id = COALESCE($4, quest_level_id),
                privacy = COALESCE($5, privacy)
             WHERE id = $1 AND status = $6 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.quest_level_id)
            .bind(input.privacy.map(Privacy::as_str))
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a quest. Image rows go with it via
    /// `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
