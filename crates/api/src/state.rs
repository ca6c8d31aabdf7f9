use std::sync::Arc;

use dungeon_core::storage::FileStore;
use dungeon_db::store::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the health check.
    pub pool: dungeon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Persistence used by the services.
    pub store: Arc<dyn Store>,
    /// Storage for uploaded images.
    pub files: Arc<dyn FileStore>,
}
