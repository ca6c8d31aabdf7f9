//! Handlers for the `/characters` resource.
//!
//! Reads accept anonymous callers and apply the privacy rules; every write
//! requires a token and is owner-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dungeon_core::types::DbId;

use crate::error::{AppResult, ErrorResponse};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::ApiResponse;
use crate::services::character::{
    self, CharacterResponse, CreateCharacterRequest, UpdateCharacterRequest,
};
use crate::state::AppState;

/// Tag for grouping character endpoints in the OpenAPI document.
pub static CHARACTER_TAG: &str = "characters";

/// GET /api/v1/characters
///
/// Active characters visible to the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/characters",
    tag = CHARACTER_TAG,
    security((), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Visible active characters", body = ApiResponse<Vec<CharacterResponse>>),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    ),
)]
pub async fn list_characters(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CharacterResponse>>>> {
    let items =
        character::list_for_user(state.store.as_ref(), state.files.as_ref(), auth.user_id())
            .await?;
    Ok(Json(ApiResponse::list(items)))
}

/// GET /api/v1/characters/public
#[utoipa::path(
    get,
    path = "/api/v1/characters/public",
    tag = CHARACTER_TAG,
    responses(
        (status = 200, description = "Public active characters", body = ApiResponse<Vec<CharacterResponse>>)
    ),
)]
pub async fn list_public_characters(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CharacterResponse>>>> {
    let items = character::list_public(state.store.as_ref(), state.files.as_ref()).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// GET /api/v1/characters/mine
///
/// All of the caller's characters, archived ones included.
#[utoipa::path(
    get,
    path = "/api/v1/characters/mine",
    tag = CHARACTER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's characters", body = ApiResponse<Vec<CharacterResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
)]
pub async fn list_my_characters(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CharacterResponse>>>> {
    let items =
        character::list_mine(state.store.as_ref(), state.files.as_ref(), auth.user_id).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// POST /api/v1/characters
#[utoipa::path(
    post,
    path = "/api/v1/characters",
    tag = CHARACTER_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateCharacterRequest,
    responses(
        (status = 201, description = "Character created", body = ApiResponse<CharacterResponse>),
        (status = 400, description = "Description too long", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Class or race not found", body = ErrorResponse),
        (status = 422, description = "Invalid title", body = ErrorResponse)
    ),
)]
pub async fn create_character(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCharacterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CharacterResponse>>)> {
    let created = character::create(
        state.store.as_ref(),
        state.files.as_ref(),
        auth.user_id,
        &input,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}

/// GET /api/v1/characters/{id}
#[utoipa::path(
    get,
    path = "/api/v1/characters/{id}",
    tag = CHARACTER_TAG,
    security((), ("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character", body = ApiResponse<CharacterResponse>),
        (status = 403, description = "Private character of another user", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    ),
)]
pub async fn get_character(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CharacterResponse>>> {
    let found = character::get(
        state.store.as_ref(),
        state.files.as_ref(),
        auth.user_id(),
        id,
    )
    .await?;
    Ok(Json(ApiResponse::new(found)))
}

/// PUT /api/v1/characters/{id}
#[utoipa::path(
    put,
    path = "/api/v1/characters/{id}",
    tag = CHARACTER_TAG,
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Character ID")),
    request_body = UpdateCharacterRequest,
    responses(
        (status = 200, description = "Updated character", body = ApiResponse<CharacterResponse>),
        (status = 400, description = "Description too long", body = ErrorResponse),
        (status = 403, description = "Not the owner (FORBIDDEN) or archived (INVALID_STATE)", body = ErrorResponse),
        (status = 404, description = "Character, class, or race not found", body = ErrorResponse)
    ),
)]
pub async fn update_character(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacterRequest>,
) -> AppResult<Json<ApiResponse<CharacterResponse>>> {
    let updated = character::update(
        state.store.as_ref(),
        state.files.as_ref(),
        auth.user_id,
        id,
        &input,
    )
    .await?;
    Ok(Json(ApiResponse::new(updated)))
}

/// DELETE /api/v1/characters/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/characters/{id}",
    tag = CHARACTER_TAG,
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character and its images deleted; `data` is null"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    ),
)]
pub async fn delete_character(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    character::delete(state.store.as_ref(), state.files.as_ref(), auth.user_id, id).await?;
    Ok(Json(ApiResponse::empty("deleted")))
}
