//! Route definitions for catalog lookups and their admin management.
//!
//! Two routers are provided:
//! - `router()` for public lookups mounted at `/options`
//! - `admin_router()` for admin-only changes mounted at `/admin/options`

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Public lookups mounted at `/options`.
///
/// ```text
/// GET /{kind}        -> list_entries
/// GET /{kind}/{id}   -> get_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(catalog::list_entries))
        .route("/{kind}/{id}", get(catalog::get_entry))
}

/// Admin routes mounted at `/admin/options`.
///
/// ```text
/// POST   /{kind}        -> create_entry
/// PUT    /{kind}/{id}   -> update_entry
/// DELETE /{kind}/{id}   -> delete_entry (cascading archive)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", post(catalog::create_entry))
        .route(
            "/{kind}/{id}",
            put(catalog::update_entry).delete(catalog::delete_entry),
        )
}
