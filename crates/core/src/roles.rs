//! Well-known role names.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20250101000002_create_users.sql`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role carried on a user row and inside access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl TryFrom<String> for UserRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            ROLE_USER => Ok(Self::User),
            ROLE_ADMIN => Ok(Self::Admin),
            other => Err(CoreError::Internal(format!("Unknown role '{other}'"))),
        }
    }
}
