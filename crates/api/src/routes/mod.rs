pub mod auth;
pub mod catalog;
pub mod character;
pub mod health;
pub mod quest;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          service + database health
///
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /characters                                      list (optional auth), create
/// /characters/public                               public + active only
/// /characters/mine                                 caller's own, any status
/// /characters/{id}                                 get (optional auth), update, delete
/// /characters/{id}/images                          replace images (multipart)
///
/// /quests                                          same shape as /characters
///
/// /options/{kind}                                  list catalog entries
/// /options/{kind}/{id}                             get catalog entry
/// /admin/options/{kind}                            create (admin only)
/// /admin/options/{kind}/{id}                       rename, cascading delete (admin only)
///
/// /pictures/{file}                                 stored images (static, see router.rs)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/characters", character::router())
        .nest("/quests", quest::router())
        .nest("/options", catalog::router())
        .nest("/admin/options", catalog::admin_router())
}
