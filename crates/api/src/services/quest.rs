//! Quest use cases. Same access rules as characters; the only catalog
//! reference is the quest level.

use dungeon_core::catalog::CatalogKind;
use dungeon_core::error::CoreError;
use dungeon_core::lifecycle::{guard_mutable, ItemStatus};
use dungeon_core::ownership::{authorize, can_read, Access, Privacy};
use dungeon_core::storage::FileStore;
use dungeon_core::types::{DbId, Timestamp};
use dungeon_core::validation::validate_description;
use dungeon_db::models::quest::{CreateQuest, Quest, UpdateQuest};
use dungeon_db::store::Store;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{rejected_write, remove_files_best_effort, require_catalog_entry};
use crate::error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuestRequest {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, format = Uuid)]
    pub quest_level_id: DbId,
    #[serde(default)]
    pub privacy: Privacy,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateQuestRequest {
    #[validate(length(min = 1, max = 128))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub quest_level_id: Option<DbId>,
    pub privacy: Option<Privacy>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Uuid)]
    pub quest_level_id: DbId,
    pub privacy: Privacy,
    pub status: ItemStatus,
    pub images: Vec<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

impl QuestResponse {
    pub fn project(quest: Quest, files: &dyn FileStore) -> Self {
        let images = quest
            .stored_image_paths()
            .iter()
            .map(|p| files.public_url(p))
            .collect();
        Self {
            id: quest.id,
            user_id: quest.user_id,
            title: quest.title,
            description: quest.description,
            quest_level_id: quest.quest_level_id,
            privacy: quest.privacy,
            status: quest.status,
            images,
            created_at: quest.created_at,
            updated_at: quest.updated_at,
        }
    }
}

async fn load(store: &dyn Store, id: DbId) -> AppResult<Quest> {
    Ok(store.find_quest(id).await?.ok_or(CoreError::NotFound {
        entity: "Quest",
        id,
    })?)
}

fn project_all(quests: Vec<Quest>, files: &dyn FileStore) -> Vec<QuestResponse> {
    quests
        .into_iter()
        .map(|q| QuestResponse::project(q, files))
        .collect()
}

pub async fn create(
    store: &dyn Store,
    files: &dyn FileStore,
    owner: DbId,
    input: &CreateQuestRequest,
) -> AppResult<QuestResponse> {
    input.validate()?;
    validate_description(&input.description)?;
    require_catalog_entry(store, CatalogKind::QuestLevel, input.quest_level_id).await?;

    let quest = store
        .create_quest(&CreateQuest {
            user_id: owner,
            title: input.title.clone(),
            description: input.description.clone(),
            quest_level_id: input.quest_level_id,
            privacy: input.privacy,
        })
        .await?;

    tracing::info!(quest_id = %quest.id, user_id = %owner, "Quest created");
    Ok(QuestResponse::project(quest, files))
}

pub async fn get(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: Option<DbId>,
    id: DbId,
) -> AppResult<QuestResponse> {
    let quest = load(store, id).await?;
    authorize(actor, &quest, Access::Read)?;
    Ok(QuestResponse::project(quest, files))
}

pub async fn update(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
    id: DbId,
    input: &UpdateQuestRequest,
) -> AppResult<QuestResponse> {
    let quest = load(store, id).await?;
    authorize(Some(actor), &quest, Access::Mutate)?;
    guard_mutable(&quest)?;

    input.validate()?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(level_id) = input.quest_level_id {
        require_catalog_entry(store, CatalogKind::QuestLevel, level_id).await?;
    }

    let Some(updated) = store
        .update_quest(
            id,
            &UpdateQuest {
                title: input.title.clone(),
                description: input.description.clone(),
                quest_level_id: input.quest_level_id,
                privacy: input.privacy,
            },
        )
        .await?
    else {
        let still_exists = store.find_quest(id).await?.is_some();
        return Err(rejected_write(still_exists, "Quest", id));
    };

    tracing::info!(quest_id = %id, user_id = %actor, "Quest updated");
    Ok(QuestResponse::project(updated, files))
}

pub async fn delete(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
    id: DbId,
) -> AppResult<()> {
    let quest = load(store, id).await?;
    authorize(Some(actor), &quest, Access::Mutate)?;

    if !store.delete_quest(id).await? {
        return Err(CoreError::NotFound { entity: "Quest", id }.into());
    }
    remove_files_best_effort(files, &quest.stored_image_paths()).await;

    tracing::info!(quest_id = %id, user_id = %actor, "Quest deleted");
    Ok(())
}

pub async fn list_for_user(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: Option<DbId>,
) -> AppResult<Vec<QuestResponse>> {
    let quests = match actor {
        Some(_) => store
            .list_active_quests()
            .await?
            .into_iter()
            .filter(|q| can_read(actor, q))
            .collect(),
        None => store.list_public_quests().await?,
    };
    Ok(project_all(quests, files))
}

pub async fn list_public(
    store: &dyn Store,
    files: &dyn FileStore,
) -> AppResult<Vec<QuestResponse>> {
    Ok(project_all(store.list_public_quests().await?, files))
}

pub async fn list_mine(
    store: &dyn Store,
    files: &dyn FileStore,
    actor: DbId,
) -> AppResult<Vec<QuestResponse>> {
    Ok(project_all(store.list_quests_by_user(actor).await?, files))
}
