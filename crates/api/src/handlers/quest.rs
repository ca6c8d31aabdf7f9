//! Handlers for the `/quests` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dungeon_core::types::DbId;

use crate::error::{AppResult, ErrorResponse};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::ApiResponse;
use crate::services::quest::{self, CreateQuestRequest, QuestResponse, UpdateQuestRequest};
use crate::state::AppState;

/// Tag for grouping quest endpoints in the OpenAPI document.
pub static QUEST_TAG: &str = "quests";

/// GET /api/v1/quests
#[utoipa::path(
    get,
    path = "/api/v1/quests",
    tag = QUEST_TAG,
    security((), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Visible active quests", body = ApiResponse<Vec<QuestResponse>>),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    ),
)]
pub async fn list_quests(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<QuestResponse>>>> {
    let items =
        quest::list_for_user(state.store.as_ref(), state.files.as_ref(), auth.user_id()).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// GET /api/v1/quests/public
#[utoipa::path(
    get,
    path = "/api/v1/quests/public",
    tag = QUEST_TAG,
    responses(
        (status = 200, description = "Public active quests", body = ApiResponse<Vec<QuestResponse>>)
    ),
)]
pub async fn list_public_quests(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<QuestResponse>>>> {
    let items = quest::list_public(state.store.as_ref(), state.files.as_ref()).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// GET /api/v1/quests/mine
#[utoipa::path(
    get,
    path = "/api/v1/quests/mine",
    tag = QUEST_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's quests", body = ApiResponse<Vec<QuestResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
)]
pub async fn list_my_quests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<QuestResponse>>>> {
    let items = quest::list_mine(state.store.as_ref(), state.files.as_ref(), auth.user_id).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// POST /api/v1/quests
#[utoipa::path(
    post,
    path = "/api/v1/quests",
    tag = QUEST_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateQuestRequest,
    responses(
        (status = 201, description = "Quest created", body = ApiResponse<QuestResponse>),
        (status = 400, description = "Description too long", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Quest level not found", body = ErrorResponse),
        (status = 422, description = "Invalid title", body = ErrorResponse)
    ),
)]
pub async fn create_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuestRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<QuestResponse>>)> {
    let created =
        quest::create(state.store.as_ref(), state.files.as_ref(), auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}

/// GET /api/v1/quests/{id}
#[utoipa::path(
    get,
    path = "/api/v1/quests/{id}",
    tag = QUEST_TAG,
    security((), ("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Quest ID")),
    responses(
        (status = 200, description = "Quest", body = ApiResponse<QuestResponse>),
        (status = 403, description = "Private quest of another user", body = ErrorResponse),
        (status = 404, description = "Quest not found", body = ErrorResponse)
    ),
)]
pub async fn get_quest(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<QuestResponse>>> {
    let found = quest::get(state.store.as_ref(), state.files.as_ref(), auth.user_id(), id).await?;
    Ok(Json(ApiResponse::new(found)))
}

/// PUT /api/v1/quests/{id}
#[utoipa::path(
    put,
    path = "/api/v1/quests/{id}",
    tag = QUEST_TAG,
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Quest ID")),
    request_body = UpdateQuestRequest,
    responses(
        (status = 200, description = "Updated quest", body = ApiResponse<QuestResponse>),
        (status = 400, description = "Description too long", body = ErrorResponse),
        (status = 403, description = "Not the owner (FORBIDDEN) or archived (INVALID_STATE)", body = ErrorResponse),
        (status = 404, description = "Quest or quest level not found", body = ErrorResponse)
    ),
)]
pub async fn update_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuestRequest>,
) -> AppResult<Json<ApiResponse<QuestResponse>>> {
    let updated = quest::update(
        state.store.as_ref(),
        state.files.as_ref(),
        auth.user_id,
        id,
        &input,
    )
    .await?;
    Ok(Json(ApiResponse::new(updated)))
}

/// DELETE /api/v1/quests/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/quests/{id}",
    tag = QUEST_TAG,
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Quest ID")),
    responses(
        (status = 200, description = "Quest and its images deleted; `data` is null"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Quest not found", body = ErrorResponse)
    ),
)]
pub async fn delete_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    quest::delete(state.store.as_ref(), state.files.as_ref(), auth.user_id, id).await?;
    Ok(Json(ApiResponse::empty("deleted")))
}
