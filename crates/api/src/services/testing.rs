//! In-memory doubles for service unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dungeon_core::catalog::CatalogKind;
use dungeon_core::error::CoreError;
use dungeon_core::lifecycle::ItemStatus;
use dungeon_core::storage::{FileStore, LocalFileStore};
use dungeon_core::types::DbId;
use dungeon_db::models::catalog::{CascadeOutcome, CatalogEntry};
use dungeon_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use dungeon_db::models::image::{ImageTarget, StoredImage};
use dungeon_db::models::quest::{CreateQuest, Quest, UpdateQuest};
use dungeon_db::models::user::{CreateUser, User};
use dungeon_db::store::{CatalogStore, CharacterStore, ImageStore, QuestStore, UserStore};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    catalogs: HashMap<CatalogKind, Vec<CatalogEntry>>,
    characters: Vec<Character>,
    quests: Vec<Quest>,
    images: Vec<(ImageTarget, StoredImage)>,
    fail_replace: bool,
    archive_before_write: bool,
}

impl Tables {
    /// Archive every active record if a concurrent archive was scheduled.
    fn land_pending_archive(&mut self) {
        if !std::mem::take(&mut self.archive_before_write) {
            return;
        }
        for c in self.characters.iter_mut() {
            c.status = ItemStatus::Archived;
        }
        for q in self.quests.iter_mut() {
            q.status = ItemStatus::Archived;
        }
    }
}

/// A `Store` that keeps rows in insertion order. Listing methods return
/// newest first by reversing that order.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a live catalog entry and return its id.
    pub fn seed_catalog(&self, kind: CatalogKind, name: &str) -> DbId {
        let entry = new_entry(name);
        let id = entry.id;
        self.tables
            .lock()
            .unwrap()
            .catalogs
            .entry(kind)
            .or_default()
            .push(entry);
        id
    }

    /// Make every subsequent `replace_images` call fail.
    pub fn fail_image_replacement(&self) {
        self.tables.lock().unwrap().fail_replace = true;
    }

    /// Archive every record just before the next update or image
    /// replacement is applied, as a catalog cascade racing the caller would.
    pub fn archive_before_next_write(&self) {
        self.tables.lock().unwrap().archive_before_write = true;
    }

    pub fn image_rows(&self, target: ImageTarget, owner_id: DbId) -> Vec<StoredImage> {
        self.tables
            .lock()
            .unwrap()
            .images
            .iter()
            .filter(|(t, img)| *t == target && img.owner_id == owner_id)
            .map(|(_, img)| img.clone())
            .collect()
    }
}

fn new_entry(name: &str) -> CatalogEntry {
    let now = Utc::now();
    CatalogEntry {
        id: Uuid::new_v4(),
        name: name.to_string(),
        is_deleted: false,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Postgres would raise a unique violation here; the double has no way to
/// build one, so it reports a protocol error instead.
fn duplicate(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("duplicate {what}"))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        if t
            .users
            .iter()
            .any(|u| u.username == input.username || u.email == input.email)
        {
            return Err(duplicate("user"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn create_catalog_entry(
        &self,
        kind: CatalogKind,
        name: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let entries = t.catalogs.entry(kind).or_default();
        if entries.iter().any(|e| !e.is_deleted && e.name == name) {
            return Err(duplicate("catalog name"));
        }
        let entry = new_entry(name);
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn find_catalog_entry(
        &self,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .catalogs
            .get(&kind)
            .and_then(|entries| entries.iter().find(|e| e.id == id && !e.is_deleted))
            .cloned())
    }

    async fn list_catalog_entries(
        &self,
        kind: CatalogKind,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        let mut live: Vec<CatalogEntry> = t
            .catalogs
            .get(&kind)
            .map(|entries| entries.iter().filter(|e| !e.is_deleted).cloned().collect())
            .unwrap_or_default();
        live.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(live)
    }

    async fn rename_catalog_entry(
        &self,
        kind: CatalogKind,
        id: DbId,
        name: &str,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let Some(entries) = t.catalogs.get_mut(&kind) else {
            return Ok(None);
        };
        if entries
            .iter()
            .any(|e| !e.is_deleted && e.id != id && e.name == name)
        {
            return Err(duplicate("catalog name"));
        }
        Ok(entries
            .iter_mut()
            .find(|e| e.id == id && !e.is_deleted)
            .map(|e| {
                e.name = name.to_string();
                e.updated_at = Utc::now();
                e.clone()
            }))
    }

    async fn delete_catalog_cascading(
        &self,
        kind: CatalogKind,
        id: DbId,
    ) -> Result<CascadeOutcome, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let live = t
            .catalogs
            .get(&kind)
            .is_some_and(|entries| entries.iter().any(|e| e.id == id && !e.is_deleted));
        if !live {
            return Ok(CascadeOutcome {
                archived: 0,
                deleted: false,
            });
        }
        let mut archived = 0;

        match kind {
            CatalogKind::Class | CatalogKind::Race => {
                for c in t.characters.iter_mut() {
                    let fk = if kind == CatalogKind::Class {
                        c.class_id
                    } else {
                        c.race_id
                    };
                    if fk == id && c.status == ItemStatus::Active {
                        c.status = ItemStatus::Archived;
                        archived += 1;
                    }
                }
            }
            CatalogKind::QuestLevel => {
                for q in t.quests.iter_mut() {
                    if q.quest_level_id == id && q.status == ItemStatus::Active {
                        q.status = ItemStatus::Archived;
                        archived += 1;
                    }
                }
            }
        }

        if let Some(entry) = t
            .catalogs
            .get_mut(&kind)
            .and_then(|entries| entries.iter_mut().find(|e| e.id == id && !e.is_deleted))
        {
            entry.is_deleted = true;
            entry.deleted_at = Some(Utc::now());
        }

        Ok(CascadeOutcome {
            archived,
            deleted: true,
        })
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn create_character(&self, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let now = Utc::now();
        let character = Character {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            title: input.title.clone(),
            description: input.description.clone(),
            class_id: input.class_id,
            race_id: input.race_id,
            privacy: input.privacy,
            status: ItemStatus::Active,
            image_paths: serde_json::json!([]),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().characters.push(character.clone());
        Ok(character)
    }

    async fn find_character(&self, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.characters.iter().find(|c| c.id == id).cloned())
    }

    async fn update_character(
        &self,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        t.land_pending_archive();
        Ok(t
            .characters
            .iter_mut()
            .find(|c| c.id == id && c.status == ItemStatus::Active)
            .map(|c| {
                if let Some(title) = &input.title {
                    c.title = title.clone();
                }
                if let Some(description) = &input.description {
                    c.description = description.clone();
                }
                if let Some(class_id) = input.class_id {
                    c.class_id = class_id;
                }
                if let Some(race_id) = input.race_id {
                    c.race_id = race_id;
                }
                if let Some(privacy) = input.privacy {
                    c.privacy = privacy;
                }
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn delete_character(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let before = t.characters.len();
        t.characters.retain(|c| c.id != id);
        t.images
            .retain(|(target, img)| !(*target == ImageTarget::Character && img.owner_id == id));
        Ok(t.characters.len() < before)
    }

    async fn list_active_characters(&self) -> Result<Vec<Character>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .characters
            .iter()
            .rev()
            .filter(|c| c.status == ItemStatus::Active)
            .cloned()
            .collect())
    }

    async fn list_public_characters(&self) -> Result<Vec<Character>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .characters
            .iter()
            .rev()
            .filter(|c| {
                c.status == ItemStatus::Active
                    && c.privacy == dungeon_core::ownership::Privacy::Public
            })
            .cloned()
            .collect())
    }

    async fn list_characters_by_user(&self, user_id: DbId) -> Result<Vec<Character>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .characters
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuestStore for MemoryStore {
    async fn create_quest(&self, input: &CreateQuest) -> Result<Quest, sqlx::Error> {
        let now = Utc::now();
        let quest = Quest {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            title: input.title.clone(),
            description: input.description.clone(),
            quest_level_id: input.quest_level_id,
            privacy: input.privacy,
            status: ItemStatus::Active,
            image_paths: serde_json::json!([]),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().quests.push(quest.clone());
        Ok(quest)
    }

    async fn find_quest(&self, id: DbId) -> Result<Option<Quest>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.quests.iter().find(|q| q.id == id).cloned())
    }

    async fn update_quest(
        &self,
        id: DbId,
        input: &UpdateQuest,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        t.land_pending_archive();
        Ok(t
            .quests
            .iter_mut()
            .find(|q| q.id == id && q.status == ItemStatus::Active)
            .map(|q| {
                if let Some(title) = &input.title {
                    q.title = title.clone();
                }
                if let Some(description) = &input.description {
                    q.description = description.clone();
                }
                if let Some(level) = input.quest_level_id {
                    q.quest_level_id = level;
                }
                if let Some(privacy) = input.privacy {
                    q.privacy = privacy;
                }
                q.updated_at = Utc::now();
                q.clone()
            }))
    }

    async fn delete_quest(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let before = t.quests.len();
        t.quests.retain(|q| q.id != id);
        t.images
            .retain(|(target, img)| !(*target == ImageTarget::Quest && img.owner_id == id));
        Ok(t.quests.len() < before)
    }

    async fn list_active_quests(&self) -> Result<Vec<Quest>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .quests
            .iter()
            .rev()
            .filter(|q| q.status == ItemStatus::Active)
            .cloned()
            .collect())
    }

    async fn list_public_quests(&self) -> Result<Vec<Quest>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .quests
            .iter()
            .rev()
            .filter(|q| {
                q.status == ItemStatus::Active
                    && q.privacy == dungeon_core::ownership::Privacy::Public
            })
            .cloned()
            .collect())
    }

    async fn list_quests_by_user(&self, user_id: DbId) -> Result<Vec<Quest>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .quests
            .iter()
            .rev()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn list_images(
        &self,
        target: ImageTarget,
        owner_id: DbId,
    ) -> Result<Vec<StoredImage>, sqlx::Error> {
        Ok(self.image_rows(target, owner_id))
    }

    async fn replace_images(
        &self,
        target: ImageTarget,
        owner_id: DbId,
        paths: &[String],
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        if t.fail_replace {
            return Err(sqlx::Error::PoolTimedOut);
        }
        t.land_pending_archive();

        let json = serde_json::json!(paths);
        let owner_found = match target {
            ImageTarget::Character => t
                .characters
                .iter_mut()
                .find(|c| c.id == owner_id && c.status == ItemStatus::Active)
                .map(|c| c.image_paths = json)
                .is_some(),
            ImageTarget::Quest => t
                .quests
                .iter_mut()
                .find(|q| q.id == owner_id && q.status == ItemStatus::Active)
                .map(|q| q.image_paths = json)
                .is_some(),
        };
        if !owner_found {
            return Ok(None);
        }

        let mut old = Vec::new();
        t.images.retain(|(t_, img)| {
            if *t_ == target && img.owner_id == owner_id {
                old.push(img.path.clone());
                false
            } else {
                true
            }
        });
        let now = Utc::now();
        for path in paths {
            t.images.push((
                target,
                StoredImage {
                    id: Uuid::new_v4(),
                    owner_id,
                    path: path.clone(),
                    created_at: now,
                },
            ));
        }
        Ok(Some(old))
    }
}

/// A `FileStore` over a temp directory whose `save` fails on the
/// `fail_on`-th call (0-based).
pub struct FlakyFileStore {
    pub inner: LocalFileStore,
    pub fail_on: usize,
    saves: AtomicUsize,
}

impl FlakyFileStore {
    pub fn new(inner: LocalFileStore, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            saves: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FileStore for FlakyFileStore {
    async fn save(&self, name: &str, data: &[u8]) -> Result<String, CoreError> {
        if self.saves.fetch_add(1, Ordering::SeqCst) == self.fail_on {
            return Err(CoreError::Internal("disk full".into()));
        }
        self.inner.save(name, data).await
    }

    async fn exists(&self, stored_path: &str) -> bool {
        self.inner.exists(stored_path).await
    }

    async fn delete_if_exists(&self, stored_path: &str) -> Result<(), CoreError> {
        self.inner.delete_if_exists(stored_path).await
    }

    fn public_url(&self, stored_path: &str) -> String {
        self.inner.public_url(stored_path)
    }
}

/// Count regular files directly under `dir`.
pub async fn count_files(dir: &std::path::Path) -> usize {
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return 0;
    };
    let mut count = 0;
    while let Ok(Some(_)) = entries.next_entry().await {
        count += 1;
    }
    count
}
