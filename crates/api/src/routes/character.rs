//! Route definitions for the `/characters` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{character, image};
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /              -> list_characters (optional auth)
/// POST   /              -> create_character
/// GET    /public        -> list_public_characters
/// GET    /mine          -> list_my_characters
/// GET    /{id}          -> get_character (optional auth)
/// PUT    /{id}          -> update_character
/// DELETE /{id}          -> delete_character
/// POST   /{id}/images   -> upload_character_images (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(character::list_characters).post(character::create_character),
        )
        .route("/public", get(character::list_public_characters))
        .route("/mine", get(character::list_my_characters))
        .route(
            "/{id}",
            get(character::get_character)
                .put(character::update_character)
                .delete(character::delete_character),
        )
        .route("/{id}/images", post(image::upload_character_images))
}
