//! Multipart image upload handlers for characters and quests.
//!
//! Files are read from repeated `images` form fields. Other fields are
//! ignored. The request body is capped by the router's body limit.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use dungeon_core::types::DbId;
use dungeon_db::models::image::ImageTarget;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::handlers::character::CHARACTER_TAG;
use crate::handlers::quest::QUEST_TAG;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::image::{self, UploadedImage};
use crate::state::AppState;

/// Multipart field name carrying image files.
pub const IMAGES_FIELD: &str = "images";

/// Multipart form accepted by the upload endpoints.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    /// One part per image, repeated; at most 10.
    #[schema(value_type = Vec<String>, format = Binary)]
    images: Vec<Vec<u8>>,
}

/// Fallback client filename when a part carries none.
const DEFAULT_UPLOAD_NAME: &str = "image";

async fn read_images(multipart: &mut Multipart) -> AppResult<Vec<UploadedImage>> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .unwrap_or(DEFAULT_UPLOAD_NAME)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        images.push(UploadedImage {
            file_name,
            data: data.to_vec(),
        });
    }

    Ok(images)
}

async fn upload_for(
    state: &AppState,
    auth: &AuthUser,
    target: ImageTarget,
    id: DbId,
    multipart: &mut Multipart,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let images = read_images(multipart).await?;
    let urls = image::upload(
        state.store.as_ref(),
        state.files.as_ref(),
        auth.user_id,
        target,
        id,
        &images,
    )
    .await?;

    Ok(Json(ApiResponse::list(urls).with_message("uploaded")))
}

/// POST /api/v1/characters/{id}/images
///
/// Replace the character's images. Owner only.
#[utoipa::path(
    post,
    path = "/api/v1/characters/{id}/images",
    tag = CHARACTER_TAG,
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Character ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image set replaced; public URLs in upload order", body = ApiResponse<Vec<String>>),
        (status = 400, description = "No images, more than 10, or character archived", body = ErrorResponse),
        (status = 401, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    ),
)]
pub async fn upload_character_images(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    upload_for(&state, &auth, ImageTarget::Character, id, &mut multipart).await
}

/// POST /api/v1/quests/{id}/images
#[utoipa::path(
    post,
    path = "/api/v1/quests/{id}/images",
    tag = QUEST_TAG,
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Quest ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image set replaced; public URLs in upload order", body = ApiResponse<Vec<String>>),
        (status = 400, description = "No images, more than 10, or quest archived", body = ErrorResponse),
        (status = 401, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Quest not found", body = ErrorResponse)
    ),
)]
pub async fn upload_quest_images(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    upload_for(&state, &auth, ImageTarget::Quest, id, &mut multipart).await
}
