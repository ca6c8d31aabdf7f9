//! Quest entity model and DTOs.

use dungeon_core::lifecycle::ItemStatus;
use dungeon_core::ownership::{OwnedRecord, Privacy};
use dungeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::image::parse_image_paths;

/// A quest row from the `quests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quest {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub quest_level_id: DbId,
    #[sqlx(try_from = "String")]
    pub privacy: Privacy,
    #[sqlx(try_from = "String")]
    pub status: ItemStatus,
    pub image_paths: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quest {
    pub fn stored_image_paths(&self) -> Vec<String> {
        parse_image_paths(&self.image_paths)
    }
}

impl OwnedRecord for Quest {
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

#[derive(Debug, Clone)]
pub struct CreateQuest {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub quest_level_id: DbId,
    pub privacy: Privacy,
}

/// DTO for updating an existing quest. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateQuest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub quest_level_id: Option<DbId>,
    pub privacy: Option<Privacy>,
}
