//! Startup provisioning of the initial admin account.

use dungeon_core::roles::UserRole;
use dungeon_core::validation::normalize_email;
use dungeon_db::models::user::CreateUser;
use dungeon_db::store::Store;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin unless its username or email is taken.
///
/// Returns `true` when a new account was created.
pub async fn ensure_admin(store: &dyn Store, admin: &BootstrapAdmin) -> AppResult<bool> {
    let email = normalize_email(&admin.email);

    if store.find_user_by_username(&admin.username).await?.is_some()
        || store.find_user_by_email(&email).await?.is_some()
    {
        tracing::debug!(username = %admin.username, "Bootstrap admin already present");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = store
        .create_user(&CreateUser {
            username: admin.username.clone(),
            email,
            password_hash,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
