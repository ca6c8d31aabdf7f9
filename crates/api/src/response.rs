//! Shared response envelope for API handlers.
//!
//! Every successful response is `{ "error": false, "message", "data", "length" }`.
//! Error responses reuse the same shape (see [`crate::error::AppError`]).

use serde::Serialize;
use utoipa::ToSchema;

/// Default message on successful responses.
pub const MESSAGE_SUCCESS: &str = "success";

/// Standard response envelope.
///
/// `length` is the item count for list payloads and `0` otherwise.
///
/// ```ignore
/// Ok(Json(ApiResponse::list(items)))
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub error: bool,
    pub message: String,
    pub data: Option<T>,
    pub length: usize,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a single payload.
    pub fn new(data: T) -> Self {
        Self {
            error: false,
            message: MESSAGE_SUCCESS.to_string(),
            data: Some(data),
            length: 0,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Wrap a list payload; `length` is the item count.
    pub fn list(items: Vec<T>) -> Self {
        let length = items.len();
        Self {
            error: false,
            message: MESSAGE_SUCCESS.to_string(),
            data: Some(items),
            length,
        }
    }
}

impl ApiResponse<()> {
    /// A payload-less success, e.g. after a delete.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
            length: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_payload_has_zero_length() {
        let value = serde_json::to_value(ApiResponse::new("hero")).unwrap();
        assert_eq!(
            value,
            json!({"error": false, "message": "success", "data": "hero", "length": 0})
        );
    }

    #[test]
    fn list_payload_counts_items() {
        let value = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(value["length"], 3);
        assert_eq!(value["data"], json!([1, 2, 3]));
    }

    #[test]
    fn empty_payload_serializes_null_data() {
        let value = serde_json::to_value(ApiResponse::empty("deleted")).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["message"], "deleted");
    }
}
