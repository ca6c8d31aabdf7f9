//! Content limits shared by the character, quest, catalog, and auth flows.

use crate::error::CoreError;

/// Maximum description length, counted in Unicode scalar values.
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Maximum number of images accepted in a single upload batch.
pub const MAX_IMAGES_PER_UPLOAD: usize = 10;

/// Maximum catalog entry name length, counted in Unicode scalar values.
pub const MAX_CATALOG_NAME_CHARS: usize = 128;

/// Maximum stored email length.
pub const MAX_EMAIL_CHARS: usize = 128;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(CoreError::BadRequest(format!(
            "description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate an upload batch size. Empty batches are rejected too: an upload
/// always replaces the previous set, so an empty one would only wipe it.
pub fn validate_image_count(count: usize) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::BadRequest(
            "at least one image is required".into(),
        ));
    }
    if count > MAX_IMAGES_PER_UPLOAD {
        return Err(CoreError::BadRequest(format!(
            "images must be at most {MAX_IMAGES_PER_UPLOAD}"
        )));
    }
    Ok(())
}

/// Catalog names must be non-blank and at most [`MAX_CATALOG_NAME_CHARS`]
/// once trimmed. Returns the trimmed name.
pub fn validate_catalog_name(name: &str) -> Result<&str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::BadRequest("name required".into()));
    }
    if trimmed.chars().count() > MAX_CATALOG_NAME_CHARS {
        return Err(CoreError::BadRequest(format!(
            "name must be at most {MAX_CATALOG_NAME_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Normalise an email for storage and lookup (trimmed, lower-cased).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registration credentials check. Expects an already-normalised email.
pub fn validate_registration(email: &str, password: &str) -> Result<(), CoreError> {
    if email.is_empty()
        || email.chars().count() > MAX_EMAIL_CHARS
        || password.chars().count() < MIN_PASSWORD_LENGTH
    {
        return Err(CoreError::BadRequest("invalid email or password".into()));
    }
    Ok(())
}
