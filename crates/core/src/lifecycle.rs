//! Lifecycle rules for characters and quests.
//!
//! A record starts `Active` and can only move to `Archived`, which is
//! terminal. The only path into `Archived` is the cascade triggered when a
//! catalog entry the record depends on is deleted (see
//! [`crate::catalog::CatalogKind::dependent`]).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;
use crate::ownership::OwnedRecord;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ARCHIVED: &str = "archived";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Archived,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Archived => STATUS_ARCHIVED,
        }
    }

    pub fn is_archived(self) -> bool {
        self == Self::Archived
    }
}

impl TryFrom<String> for ItemStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_ARCHIVED => Ok(Self::Archived),
            other => Err(CoreError::Internal(format!("Unknown status '{other}'"))),
        }
    }
}

/// Whether a record may move from `from` to `to`.
pub fn can_transition(from: ItemStatus, to: ItemStatus) -> bool {
    matches!((from, to), (ItemStatus::Active, ItemStatus::Archived))
}

/// Reject field updates and image uploads on archived records.
pub fn guard_mutable<R: OwnedRecord + ?Sized>(record: &R) -> Result<(), CoreError> {
    if record.status().is_archived() {
        return Err(CoreError::InvalidState(
            "Archived records cannot be modified".into(),
        ));
    }
    Ok(())
}
