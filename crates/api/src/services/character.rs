//! Character use cases.
//!
//! Every mutation goes through the same gate: load the record, check the
//! caller owns it, then check it is still active.

use dungeon_core::catalog::CatalogKind;
use dungeon_core::error::CoreError;
use dungeon_core::lifecycle::{guard_mutable, ItemStatus};
use dungeon_core::ownership::{authorize, can_read, Access, Privacy};
use dungeon_core::storage::FileStore;
use dungeon_core::types::{DbId, Timestamp};
use dungeon_core::validation::validate_description;
use dungeon_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use dungeon_db::store::Store;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{rejected_write, remove_files_best_effort, require_catalog_entry};
use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /characters`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCharacterRequest {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, format = Uuid)]
    pub class_id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub race_id: DbId,
    /// Defaults to public.
    #[serde(default)]
    pub privacy: Privacy,
}

/// Request body for `PUT /characters/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCharacterRequest {
    #[validate(length(min = 1, max = 128))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub class_id: Option<DbId>,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub race_id: Option<DbId>,
    pub privacy: Option<Privacy>,
}

/// Character as returned by the API, with image paths turned into URLs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CharacterResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Uuid)]
    pub class_id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub race_id: DbId,
    pub privacy: Privacy,
    pub status: ItemStatus,
    pub images: Vec<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

impl CharacterResponse {
    pub fn project(character: Character, files: &dyn FileStore) -> Self {
        let images = character
            .stored_image_paths()
            .iter()
            .map(|p| files.public_url(p))
            .collect();
        Self {
            id: character.id,
            user_id: character.user_id,
            title: character.title,
            description: character.description,
            class_id: character.class_id,
            race_id: character.race_id,
            privacy: character.privacy,
            status: character.status,
            images,
            created_at: character.created_at,
            updated_at: character.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load(store: &dyn Store, id: DbId) -> AppResult<Character> {
    Ok(store.find_character(id).await?.ok_or(CoreError::NotFound {
        entity: "Character",
        id,
    })?)
}

fn project_all(characters: Vec<Character>, files: &dyn FileStore) -> Vec<CharacterResponse> {
    characters
        .into_iter()
        .map(|c| CharacterResponse::project(c, files))
        .collect()
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub async fn create(
    store: &dyn Store,
    files: &dyn FileStore,
    owner: DbId,
    input: &CreateCharacterRequest,
) -> AppResult<CharacterResponse> {
    input.validate()?;
    validate_description(&input.description)?;
    require_catalog_entry(store, CatalogKind::Class, input.class_id).await?;
    require_catalog_entry(store, CatalogKind::Race, input.race_id).await?;

    let character = store
        .create_character(&CreateCharacter {
            user_id: owner,
            title: input.title.clone(),
            description: input.description.clone(),
            class_id: input.class_id,
            race_id: input.race_id,
            privacy: input.privacy,
        })
        .await?;

    tracing::info!(character_id = %character.id, user_id = %owner, "Character created");
    Ok(CharacterResponse::project(character, files))
}

/// Fetch one character. Private characters are only visible to their owner.
pub async fn get(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: Option<DbId>,
    id: DbId,
) -> AppResult<CharacterResponse> {
    let character = load(store, id).await?;
    authorize(actor, &character, Access::Read)?;
    Ok(CharacterResponse::project(character, files))
}

/// Apply a partial update. Archived characters cannot be changed.
pub async fn update(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
    id: DbId,
    input: &UpdateCharacterRequest,
) -> AppResult<CharacterResponse> {
    let character = load(store, id).await?;
    authorize(Some(actor), &character, Access::Mutate)?;
    guard_mutable(&character)?;

    input.validate()?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(class_id) = input.class_id {
        require_catalog_entry(store, CatalogKind::Class, class_id).await?;
    }
    if let Some(race_id) = input.race_id {
        require_catalog_entry(store, CatalogKind::Race, race_id).await?;
    }

    let Some(updated) = store
        .update_character(
            id,
            &UpdateCharacter {
                title: input.title.clone(),
                description: input.description.clone(),
                class_id: input.class_id,
                race_id: input.race_id,
                privacy: input.privacy,
            },
        )
        .await?
    else {
        let still_exists = store.find_character(id).await?.is_some();
        return Err(rejected_write(still_exists, "Character", id));
    };

    tracing::info!(character_id = %id, user_id = %actor, "Character updated");
    Ok(CharacterResponse::project(updated, files))
}

/// Hard-delete a character regardless of status, then remove its files.
pub async fn delete(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
    id: DbId,
) -> AppResult<()> {
    let character = load(store, id).await?;
    authorize(Some(actor), &character, Access::Mutate)?;

    if !store.delete_character(id).await? {
        return Err(CoreError::NotFound {
            entity: "Character",
            id,
        }
        .into());
    }
    remove_files_best_effort(files, &character.stored_image_paths()).await;

    tracing::info!(character_id = %id, user_id = %actor, "Character deleted");
    Ok(())
}

/// Active characters visible to the caller, newest first.
///
/// Authenticated callers see public characters plus their own private ones;
/// anonymous callers see public characters only.
pub async fn list_for_user(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: Option<DbId>,
) -> AppResult<Vec<CharacterResponse>> {
    let characters = match actor {
        Some(_) => store
            .list_active_characters()
            .await?
            .into_iter()
            .filter(|c| can_read(actor, c))
            .collect(),
        None => store.list_public_characters().await?,
    };
    Ok(project_all(characters, files))
}

/// Public, active characters, newest first.
pub async fn list_public(
    store: &dyn Store,
    files: &dyn FileStore,
) -> AppResult<Vec<CharacterResponse>> {
    Ok(project_all(store.list_public_characters().await?, files))
}

/// All of the caller's characters, archived ones included.
pub async fn list_mine(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
) -> AppResult<Vec<CharacterResponse>> {
    Ok(project_all(store.list_characters_by_user(actor).await?, files))
}
