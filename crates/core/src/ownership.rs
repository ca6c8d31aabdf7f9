//! Ownership guard for user-owned records (characters and quests).
//!
//! Rules:
//! - The owner may read and mutate their record regardless of privacy.
//! - Anyone else, authenticated or not, may only read public records.
//! - Mutation is owner-only, unconditionally.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;
use crate::lifecycle::ItemStatus;
use crate::types::DbId;

/// Visibility of a user-owned record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

impl Privacy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl TryFrom<String> for Privacy {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(CoreError::Internal(format!("Unknown privacy '{other}'"))),
        }
    }
}

/// A record with an owner, a privacy flag, and a lifecycle status.
pub trait OwnedRecord {
    fn owner_id(&self) -> DbId;
    fn privacy(&self) -> Privacy;
    fn status(&self) -> ItemStatus;
}

/// Kind of access being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Mutate,
}

/// Decide whether `actor` may perform `access` on `record`.
///
/// `actor` is `None` for unauthenticated requests.
pub fn authorize<R: OwnedRecord + ?Sized>(
    actor: Option<DbId>,
    record: &R,
    access: Access,
) -> Result<(), CoreError> {
    if actor == Some(record.owner_id()) {
        return Ok(());
    }
    match (access, record.privacy()) {
        (Access::Read, Privacy::Public) => Ok(()),
        (Access::Read, Privacy::Private) => Err(CoreError::Forbidden(
            "This record is private".into(),
        )),
        (Access::Mutate, _) => Err(CoreError::Forbidden(
            "Only the owner can modify this record".into(),
        )),
    }
}

/// Whether `actor` may see `record` in a read or listing context.
pub fn can_read<R: OwnedRecord + ?Sized>(actor: Option<DbId>, record: &R) -> bool {
    authorize(actor, record, Access::Read).is_ok()
}
