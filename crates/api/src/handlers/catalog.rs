//! Handlers for catalog lookups (`/options`) and their admin management
//! (`/admin/options`).
//!
//! The `{kind}` path segment is one of `classes`, `races`, `quest-levels`;
//! anything else is rejected by the path extractor with 400.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dungeon_core::catalog::CatalogKind;
use dungeon_core::types::DbId;
use dungeon_db::models::catalog::CatalogEntry;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppResult, ErrorResponse};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::services::catalog::{self, CatalogEntryRequest};
use crate::state::AppState;

/// Tag for grouping catalog endpoints in the OpenAPI document.
pub static CATALOG_TAG: &str = "options";

/// Payload returned after a cascading delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteCatalogResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    /// Number of characters or quests moved to `archived`.
    pub archived: u64,
}

/// GET /api/v1/options/{kind}
#[utoipa::path(
    get,
    path = "/api/v1/options/{kind}",
    tag = CATALOG_TAG,
    params(("kind" = CatalogKind, Path, description = "classes, races, or quest-levels")),
    responses(
        (status = 200, description = "Live entries ordered by name", body = ApiResponse<Vec<CatalogEntry>>),
        (status = 400, description = "Unknown catalog kind")
    ),
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
) -> AppResult<Json<ApiResponse<Vec<CatalogEntry>>>> {
    let entries = catalog::list(state.store.as_ref(), kind).await?;
    Ok(Json(ApiResponse::list(entries)))
}

/// GET /api/v1/options/{kind}/{id}
#[utoipa::path(
    get,
    path = "/api/v1/options/{kind}/{id}",
    tag = CATALOG_TAG,
    params(
        ("kind" = CatalogKind, Path, description = "classes, races, or quest-levels"),
        ("id" = uuid::Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry", body = ApiResponse<CatalogEntry>),
        (status = 404, description = "Entry not found or deleted", body = ErrorResponse)
    ),
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, DbId)>,
) -> AppResult<Json<ApiResponse<CatalogEntry>>> {
    let entry = catalog::get(state.store.as_ref(), kind, id).await?;
    Ok(Json(ApiResponse::new(entry)))
}

/// POST /api/v1/admin/options/{kind}
#[utoipa::path(
    post,
    path = "/api/v1/admin/options/{kind}",
    tag = CATALOG_TAG,
    security(("bearer_auth" = [])),
    params(("kind" = CatalogKind, Path, description = "classes, races, or quest-levels")),
    request_body = CatalogEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = ApiResponse<CatalogEntry>),
        (status = 400, description = "Blank or too long name", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    ),
)]
pub async fn create_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
    Json(input): Json<CatalogEntryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CatalogEntry>>)> {
    let entry = catalog::create(state.store.as_ref(), kind, &input.name).await?;
    tracing::debug!(user_id = %admin.user_id, kind = %kind, "Admin created catalog entry");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(entry))))
}

/// PUT /api/v1/admin/options/{kind}/{id}
#[utoipa::path(
    put,
    path = "/api/v1/admin/options/{kind}/{id}",
    tag = CATALOG_TAG,
    security(("bearer_auth" = [])),
    params(
        ("kind" = CatalogKind, Path, description = "classes, races, or quest-levels"),
        ("id" = uuid::Uuid, Path, description = "Entry ID")
    ),
    request_body = CatalogEntryRequest,
    responses(
        (status = 200, description = "Entry renamed", body = ApiResponse<CatalogEntry>),
        (status = 400, description = "Blank or too long name", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Entry not found or deleted", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    ),
)]
pub async fn update_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, DbId)>,
    Json(input): Json<CatalogEntryRequest>,
) -> AppResult<Json<ApiResponse<CatalogEntry>>> {
    let entry = catalog::update(state.store.as_ref(), kind, id, &input.name).await?;
    Ok(Json(ApiResponse::new(entry)))
}

/// DELETE /api/v1/admin/options/{kind}/{id}
///
/// Archives every active character or quest referencing the entry first.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/options/{kind}/{id}",
    tag = CATALOG_TAG,
    security(("bearer_auth" = [])),
    params(
        ("kind" = CatalogKind, Path, description = "classes, races, or quest-levels"),
        ("id" = uuid::Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted and dependents archived", body = ApiResponse<DeleteCatalogResponse>),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Entry not found or already deleted", body = ErrorResponse)
    ),
)]
pub async fn delete_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, DbId)>,
) -> AppResult<Json<ApiResponse<DeleteCatalogResponse>>> {
    let outcome = catalog::delete(state.store.as_ref(), kind, id).await?;
    Ok(Json(
        ApiResponse::new(DeleteCatalogResponse {
            id,
            archived: outcome.archived,
        })
        .with_message("deleted"),
    ))
}
