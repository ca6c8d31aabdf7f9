//! Image attachment rows for characters and quests.

use dungeon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Which owner table an image set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Character,
    Quest,
}

impl ImageTarget {
    /// Table holding the owning record (and its `image_paths` column).
    pub fn owner_table(self) -> &'static str {
        match self {
            Self::Character => "characters",
            Self::Quest => "quests",
        }
    }

    /// Table holding one row per stored image.
    pub fn image_table(self) -> &'static str {
        match self {
            Self::Character => "character_images",
            Self::Quest => "quest_images",
        }
    }

    /// Foreign-key column on the image table.
    pub fn owner_column(self) -> &'static str {
        match self {
            Self::Character => "character_id",
            Self::Quest => "quest_id",
        }
    }

    pub fn entity(self) -> &'static str {
        match self {
            Self::Character => "Character",
            Self::Quest => "Quest",
        }
    }
}

/// A row from `character_images` or `quest_images`.
///
/// The owner column is aliased to `owner_id` so both tables share a struct.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredImage {
    pub id: DbId,
    pub owner_id: DbId,
    pub path: String,
    pub created_at: Timestamp,
}

/// Decode an `image_paths` JSONB value. Anything other than an array of
/// strings yields an empty list.
pub fn parse_image_paths(value: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}
