//! Catalog (option) variants and the dependents each one cascades into.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A reference lookup table consumed by characters or quests.
///
/// Deserializes from the URL segment used by the `/options/{kind}` routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CatalogKind {
    #[serde(rename = "classes")]
    Class,
    #[serde(rename = "races")]
    Race,
    #[serde(rename = "quest-levels")]
    QuestLevel,
}

/// The foreign-key column that references a catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependentRef {
    pub table: &'static str,
    pub column: &'static str,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [Self::Class, Self::Race, Self::QuestLevel];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Class => "classes",
            Self::Race => "races",
            Self::QuestLevel => "quest_levels",
        }
    }

    /// Entity name used in error messages.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Race => "Race",
            Self::QuestLevel => "QuestLevel",
        }
    }

    /// URL segment under `/options`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Class => "classes",
            Self::Race => "races",
            Self::QuestLevel => "quest-levels",
        }
    }

    /// Rows archived when an entry of this kind is deleted.
    pub fn dependent(self) -> DependentRef {
        match self {
            Self::Class => DependentRef {
                table: "characters",
                column: "class_id",
            },
            Self::Race => DependentRef {
                table: "characters",
                column: "race_id",
            },
            Self::QuestLevel => DependentRef {
                table: "quests",
                column: "quest_level_id",
            },
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
