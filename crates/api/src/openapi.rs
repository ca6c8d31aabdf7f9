//! OpenAPI document for the HTTP surface.
//!
//! Served as JSON at [`OPENAPI_ROUTE`] with a Swagger UI at [`DOCS_ROUTE`]
//! (see [`crate::router::build_app_router`]).

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorResponse;
use crate::handlers::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::handlers::catalog::DeleteCatalogResponse;
use crate::handlers::image::ImageUploadForm;
use crate::handlers::{auth, catalog, character, image, quest};
use crate::routes::health::{self, HealthResponse};
use crate::services::catalog::CatalogEntryRequest;
use crate::services::character::{
    CharacterResponse, CreateCharacterRequest, UpdateCharacterRequest,
};
use crate::services::quest::{CreateQuestRequest, QuestResponse, UpdateQuestRequest};

/// Path of the generated OpenAPI JSON.
pub const OPENAPI_ROUTE: &str = "/openapi.json";

/// Path of the Swagger UI.
pub const DOCS_ROUTE: &str = "/docs";

/// Name of the JWT security scheme referenced by `security(...)` on handlers.
pub const BEARER_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dungeon API",
        description = "API for managing characters, quests, and their catalogs"
    ),
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        character::list_characters,
        character::list_public_characters,
        character::list_my_characters,
        character::create_character,
        character::get_character,
        character::update_character,
        character::delete_character,
        quest::list_quests,
        quest::list_public_quests,
        quest::list_my_quests,
        quest::create_quest,
        quest::get_quest,
        quest::update_quest,
        quest::delete_quest,
        image::upload_character_images,
        image::upload_quest_images,
        catalog::list_entries,
        catalog::get_entry,
        catalog::create_entry,
        catalog::update_entry,
        catalog::delete_entry,
    ),
    components(schemas(
        ErrorResponse,
        HealthResponse,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        CharacterResponse,
        CreateCharacterRequest,
        UpdateCharacterRequest,
        QuestResponse,
        CreateQuestRequest,
        UpdateQuestRequest,
        CatalogEntryRequest,
        DeleteCatalogResponse,
        ImageUploadForm,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration, login, and the current user"),
        (name = "characters", description = "Player characters and their images"),
        (name = "quests", description = "Quests and their images"),
        (name = "options", description = "Classes, races, and quest levels"),
    )
)]
pub struct ApiDoc;

/// Registers the HTTP bearer scheme used by authenticated endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
