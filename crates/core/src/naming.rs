//! Stored image filename convention.
//!
//! Uploaded images land in a single flat directory, so the stored name must
//! be unique across uploads and must never carry path components from the
//! client-supplied filename.

/// Fallback basename when the client filename is empty after sanitizing.
pub const DEFAULT_IMAGE_BASENAME: &str = "image";

/// Build the on-disk filename for one image of an upload batch.
///
/// Convention: `{nanos}-{index}-{basename}`
///
/// - `nanos` = upload timestamp in nanoseconds since the Unix epoch
/// - `index` = position of the file inside the batch, so two files with the
///   same client name in one batch never collide
/// - `basename` = see [`sanitize_basename`]
///
/// # Examples
///
/// ```
/// use dungeon_core::naming::stored_image_name;
///
/// assert_eq!(stored_image_name(42, 0, "hero.png"), "42-0-hero.png");
/// assert_eq!(stored_image_name(42, 3, "../../etc/passwd"), "42-3-passwd");
/// assert_eq!(stored_image_name(7, 1, ""), "7-1-image");
/// ```
pub fn stored_image_name(nanos: u128, index: usize, original: &str) -> String {
    format!("{nanos}-{index}-{}", sanitize_basename(original))
}

/// Reduce a client filename to a safe basename.
///
/// Keeps the last path segment (either separator), replaces whitespace with
/// `_`, drops anything outside `[A-Za-z0-9._-]`, and strips leading dots so
/// the result can never be `..` or a hidden file.
pub fn sanitize_basename(original: &str) -> String {
    let last = original.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = last
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        DEFAULT_IMAGE_BASENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_basename("portrait.jpg"), "portrait.jpg");
    }

    #[test]
    fn strips_unix_and_windows_directories() {
        assert_eq!(sanitize_basename("/tmp/up/a.png"), "a.png");
        assert_eq!(sanitize_basename("C:\\Users\\me\\b.png"), "b.png");
    }

    #[test]
    fn replaces_whitespace_and_drops_odd_characters() {
        assert_eq!(sanitize_basename("my hero (1).png"), "my_hero_1.png");
    }

    #[test]
    fn never_yields_dot_names() {
        assert_eq!(sanitize_basename(".."), DEFAULT_IMAGE_BASENAME);
        assert_eq!(sanitize_basename(".hidden"), "hidden");
        assert_eq!(sanitize_basename("dir/"), DEFAULT_IMAGE_BASENAME);
    }

    #[test]
    fn batch_index_disambiguates_same_client_name() {
        let a = stored_image_name(1_000, 0, "a.jpg");
        let b = stored_image_name(1_000, 1, "a.jpg");
        assert_ne!(a, b);
    }
}
