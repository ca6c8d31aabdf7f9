//! Route definitions for the `/quests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{image, quest};
use crate::state::AppState;

/// Routes mounted at `/quests`. Same shape as `/characters`.
///
/// ```text
/// GET    /              -> list_quests (optional auth)
/// POST   /              -> create_quest
/// GET    /public        -> list_public_quests
/// GET    /mine          -> list_my_quests
/// GET    /{id}          -> get_quest (optional auth)
/// PUT    /{id}          -> update_quest
/// DELETE /{id}          -> delete_quest
/// POST   /{id}/images   -> upload_quest_images (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quest::list_quests).post(quest::create_quest))
        .route("/public", get(quest::list_public_quests))
        .route("/mine", get(quest::list_my_quests))
        .route(
            "/{id}",
            get(quest::get_quest)
                .put(quest::update_quest)
                .delete(quest::delete_quest),
        )
        .route("/{id}/images", post(image::upload_quest_images))
}
