//! Persistence contract consumed by the service layer.
//!
//! The services talk to [`Store`] rather than to the repositories directly so
//! their rules can be exercised against an in-memory implementation. [`PgStore`]
//! is the production implementation and simply delegates to the repositories.

use async_trait::async_trait;
use dungeon_core::catalog::CatalogKind;
use dungeon_core::types::DbId;

use crate::models::catalog::{CascadeOutcome, CatalogEntry};
use crate::models::character::{Character, CreateCharacter, UpdateCharacter};
use crate::models::image::{ImageTarget, StoredImage};
use crate::models::quest::{CreateQuest, Quest, UpdateQuest};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CatalogRepo, CharacterRepo, ImageRepo, QuestRepo, UserRepo};
use crate::DbPool;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, input: &CreateUser) -> Result<User, sqlx::Error>;
    async fn find_user(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_catalog_entry(
        &self,
        kind: CatalogKind,
        name: &str,
    ) -> Result<CatalogEntry, sqlx::Error>;

    /// Live (non-deleted) entry by ID.
    async fn find_catalog_entry(
        &self,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<Option<CatalogEntry>, sqlx::Error>;

    async fn list_catalog_entries(&self, kind: CatalogKind)
        -> Result<Vec<CatalogEntry>, sqlx::Error>;

    async fn rename_catalog_entry(
        &self,
        kind: CatalogKind,
        id: DbId,
        name: &str,
    ) -> Result<Option<CatalogEntry>, sqlx::Error>;

    /// Archive active dependents and soft-delete the entry, atomically.
    async fn delete_catalog_cascading(
        &self,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<CascadeOutcome, sqlx::Error>;
}

#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn create_character(&self, input: &CreateCharacter) -> Result<Character, sqlx::Error>;
    async fn find_character(&self, id: DbId) -> Result<Option<Character>, sqlx::Error>;
    async fn update_character(
        &self,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error>;
    async fn delete_character(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn list_active_characters(&self) -> Result<Vec<Character>, sqlx::Error>;
    async fn list_public_characters(&self) -> Result<Vec<Character>, sqlx::Error>;
    async fn list_characters_by_user(&self, user_id: DbId) -> Result<Vec<Character>, sqlx::Error>;
}

#[async_trait]
pub trait QuestStore: Send + Sync {
    async fn create_quest(&self, input: &CreateQuest) -> Result<Quest, sqlx::Error>;
    async fn find_quest(&self, id: DbId) -> Result<Option<Quest>, sqlx::Error>;
    async fn update_quest(&self, id: DbId, input: &UpdateQuest)
        -> Result<Option<Quest>, sqlx::Error>;
    async fn delete_quest(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn list_active_quests(&self) -> Result<Vec<Quest>, sqlx::Error>;
    async fn list_public_quests(&self) -> Result<Vec<Quest>, sqlx::Error>;
    async fn list_quests_by_user(&self, user_id: DbId) -> Result<Vec<Quest>, sqlx::Error>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn list_images(
        &self,
        target: ImageTarget,
        owner_id: DbId,
    ) -> Result<Vec<StoredImage>, sqlx::Error>;

    /// Swap an active owner's image set for `paths`; returns the replaced
    /// paths, or `None` if the owner is missing or archived.
    async fn replace_images(
        &self,
        target: ImageTarget,
        owner_id: DbId,
        paths: &[String],
    ) -> Result<Option<Vec<String>>, sqlx::Error>;
}

/// Everything the services need from persistence.
pub trait Store: UserStore + CatalogStore + CharacterStore + QuestStore + ImageStore {}

impl<T> Store for T where T: UserStore + CatalogStore + CharacterStore + QuestStore + ImageStore {}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`Store`] backed by the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        UserRepo::create(&self.pool, input).await
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_id(&self.pool, id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_username(&self.pool, username).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_email(&self.pool, email).await
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn create_catalog_entry(
        &self,
        kind: CatalogKind,
        name: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        CatalogRepo::create(&self.pool, kind, name).await
    }

    async fn find_catalog_entry(
        &self,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        CatalogRepo::find_by_id(&self.pool, kind, id).await
    }

    async fn list_catalog_entries(
        &self,
        kind: CatalogKind,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        CatalogRepo::list(&self.pool, kind).await
    }

    async fn rename_catalog_entry(
        &self,
        kind: CatalogKind,
        id: DbId,
        name: &str,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        CatalogRepo::rename(&self.pool, kind, id, name).await
    }

    async fn delete_catalog_cascading(
        &self,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<CascadeOutcome, sqlx::Error> {
        CatalogRepo::delete_cascading(&self.pool, kind, id).await
    }
}

#[async_trait]
impl CharacterStore for PgStore {
    async fn create_character(&self, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        CharacterRepo::create(&self.pool, input).await
    }

    async fn find_character(&self, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        CharacterRepo::find_by_id(&self.pool, id).await
    }

    async fn update_character(
        &self,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        CharacterRepo::update(&self.pool, id, input).await
    }

    async fn delete_character(&self, id: DbId) -> Result<bool, sqlx::Error> {
        CharacterRepo::hard_delete(&self.pool, id).await
    }

    async fn list_active_characters(&self) -> Result<Vec<Character>, sqlx::Error> {
        CharacterRepo::list_active(&self.pool).await
    }

    async fn list_public_characters(&self) -> Result<Vec<Character>, sqlx::Error> {
        CharacterRepo::list_public(&self.pool).await
    }

    async fn list_characters_by_user(&self, user_id: DbId) -> Result<Vec<Character>, sqlx::Error> {
        CharacterRepo::list_by_user(&self.pool, user_id).await
    }
}

#[async_trait]
impl QuestStore for PgStore {
    async fn create_quest(&self, input: &CreateQuest) -> Result<Quest, sqlx::Error> {
        QuestRepo::create(&self.pool, input).await
    }

    async fn find_quest(&self, id: DbId) -> Result<Option<Quest>, sqlx::Error> {
        QuestRepo::find_by_id(&self.pool, id).await
    }

    async fn update_quest(
        &self,
        id: DbId,
        input: &UpdateQuest,
    ) -> Result<Option<Quest>, sqlx::Error> {
        QuestRepo::update(&self.pool, id, input).await
    }

    async fn delete_quest(&self, id: DbId) -> Result<bool, sqlx::Error> {
        QuestRepo::hard_delete(&self.pool, id).await
    }

    async fn list_active_quests(&self) -> Result<Vec<Quest>, sqlx::Error> {
        QuestRepo::list_active(&self.pool).await
    }

    async fn list_public_quests(&self) -> Result<Vec<Quest>, sqlx::Error> {
        QuestRepo::list_public(&self.pool).await
    }

    async fn list_quests_by_user(&self, user_id: DbId) -> Result<Vec<Quest>, sqlx::Error> {
        QuestRepo::list_by_user(&self.pool, user_id).await
    }
}

#[async_trait]
impl ImageStore for PgStore {
    async fn list_images(
        &self,
        target: ImageTarget,
        owner_id: DbId,
    ) -> Result<Vec<StoredImage>, sqlx::Error> {
        ImageRepo::list(&self.pool, target, owner_id).await
    }

    async fn replace_images(
        &self,
        target: ImageTarget,
        owner_id: DbId,
        paths: &[String],
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        ImageRepo::replace(&self.pool, target, owner_id, paths).await
    }
}
