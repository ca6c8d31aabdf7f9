//! Character entity model and DTOs.

use dungeon_core::lifecycle::ItemStatus;
use dungeon_core::ownership::{OwnedRecord, Privacy};
use dungeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::image::parse_image_paths;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub class_id: DbId,
    pub race_id: DbId,
    #[sqlx(try_from = "String")]
    pub privacy: Privacy,
    #[sqlx(try_from = "String")]
    pub status: ItemStatus,
    /// JSONB array of stored paths; see [`Character::stored_image_paths`].
    pub image_paths: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    pub fn stored_image_paths(&self) -> Vec<String> {
        parse_image_paths(&self.image_paths)
    }
}

impl OwnedRecord for Character {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
    fn privacy(&self) -> Privacy {
        self.privacy
    }
    fn status(&self) -> ItemStatus {
        self.status
    }
}

/// DTO for creating a new character. Status always starts as active.
#[derive(Debug, Clone)]
pub struct CreateCharacter {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub class_id: DbId,
    pub race_id: DbId,
    pub privacy: Privacy,
}

/// DTO for updating an existing character. All fields are optional.
///
/// No status field: archival only happens through the catalog cascade.
#[derive(Debug, Clone, Default)]
pub struct UpdateCharacter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub class_id: Option<DbId>,
    pub race_id: Option<DbId>,
    pub privacy: Option<Privacy>,
}
