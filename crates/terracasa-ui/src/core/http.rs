//! Transport-independent response handling for the REST backend.
//!
//! # Design
//! - Bodies are unwrapped from the `{ data, error, pagination }` envelope before decoding.
//! - Paginated responses keep their metadata; everything else yields the payload.
//! - Error bodies collapse into a single display message plus optional field errors.

use serde::de::DeserializeOwned;
use serde_json::Value;
use terracasa_api_models::{ErrorBody, FieldErrorEntry, Pagination};
use thiserror::Error;

/// Message shown when the backend gives no usable error text.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";
/// Message shown when no response was received.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Errors surfaced by API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network {
        /// Transport detail for logs.
        detail: String,
    },
    /// The session was rejected; credentials must be cleared.
    #[error("{message}")]
    Unauthorized {
        /// Backend message.
        message: String,
    },
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend {
        /// HTTP status.
        status: u16,
        /// Backend message.
        message: String,
        /// Field-level validation failures.
        field_errors: Vec<FieldErrorEntry>,
    },
    /// The response body did not match the expected shape.
    #[error("unexpected response body")]
    Decode {
        /// Decoder detail.
        detail: String,
    },
    /// The request body could not be encoded.
    #[error("request encoding failed")]
    Encode {
        /// Encoder detail.
        detail: String,
    },
}

impl ApiError {
    /// HTTP status when the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Backend { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } | Self::Encode { .. } => None,
        }
    }

    /// Field errors reported by the backend validator.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldErrorEntry] {
        match self {
            Self::Backend { field_errors, .. } => field_errors,
            _ => &[],
        }
    }

    /// Whether the caller must drop stored credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Transport failure with no response.
    #[must_use]
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }
}

/// Envelope contents after unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwrapped {
    /// Paginated payload with its metadata.
    Paged {
        /// Payload (usually an array).
        data: Value,
        /// Raw pagination object.
        pagination: Value,
    },
    /// Plain payload, or the raw body when it carried no `data`.
    Data(Value),
}

/// Unwrap the response envelope.
#[must_use]
pub fn unwrap_envelope(body: Value) -> Unwrapped {
    let Value::Object(mut map) = body else {
        return Unwrapped::Data(body);
    };
    if map.get("pagination").is_some_and(|value| !value.is_null()) {
        let pagination = map.remove("pagination").unwrap_or(Value::Null);
        let data = map.remove("data").unwrap_or(Value::Null);
        return Unwrapped::Paged { data, pagination };
    }
    if map.get("data").is_some_and(|value| !value.is_null()) {
        return Unwrapped::Data(map.remove("data").unwrap_or(Value::Null));
    }
    Unwrapped::Data(Value::Object(map))
}

/// One page of decoded results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Whether another page can be requested.
    pub has_next_page: bool,
    /// Total matches when reported.
    pub total_items: Option<u64>,
}

impl<T> Page<T> {
    /// Final page holding `items`.
    #[must_use]
    pub const fn last(items: Vec<T>, page: u32) -> Self {
        Self {
            items,
            page,
            has_next_page: false,
            total_items: None,
        }
    }
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode {
        detail: err.to_string(),
    })
}

/// Decode the unwrapped payload of a non-paginated response.
///
/// # Errors
/// Returns [`ApiError::Decode`] when the payload does not match `T`.
pub fn decode_data<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    match unwrap_envelope(body) {
        Unwrapped::Paged { data, .. } | Unwrapped::Data(data) => decode_value(data),
    }
}

/// Decode a list response into a [`Page`].
///
/// Unpaginated lists become a single final page numbered `page`.
///
/// # Errors
/// Returns [`ApiError::Decode`] when items or pagination do not match.
pub fn decode_page<T: DeserializeOwned>(
    body: Value,
    page: u32,
    page_size: u32,
) -> Result<Page<T>, ApiError> {
    match unwrap_envelope(body) {
        Unwrapped::Paged { data, pagination } => {
            let items = if data.is_null() {
                Vec::new()
            } else {
                decode_value(data)?
            };
            let meta: Pagination = decode_value(pagination)?;
            let served = if meta.page == 0 { page } else { meta.page };
            let more_by_pages = meta.total_pages.is_some_and(|total| served < total);
            let more_by_items = meta
                .total_items
                .is_some_and(|total| u64::from(served) * u64::from(page_size.max(1)) < total);
            Ok(Page {
                items,
                page: served,
                has_next_page: meta.has_next_page || more_by_pages || more_by_items,
                total_items: meta.total_items,
            })
        }
        Unwrapped::Data(Value::Null) => Ok(Page::last(Vec::new(), page)),
        Unwrapped::Data(data) => Ok(Page::last(decode_value(data)?, page)),
    }
}

/// Normalize a non-success response.
#[must_use]
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<Value>(body)
        .map(|value| ErrorBody::from_json(&value))
        .unwrap_or_default();
    let message = parsed
        .display_message()
        .unwrap_or(GENERIC_ERROR_MESSAGE)
        .to_string();
    if status == 401 {
        ApiError::Unauthorized { message }
    } else {
        ApiError::Backend {
            status,
            message,
            field_errors: parsed.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    #[test]
    fn envelope_with_pagination_is_kept_whole() {
        let unwrapped = unwrap_envelope(json!({
            "data": [1, 2],
            "pagination": { "page": 1, "hasNextPage": true }
        }));
        assert_eq!(
            unwrapped,
            Unwrapped::Paged {
                data: json!([1, 2]),
                pagination: json!({ "page": 1, "hasNextPage": true }),
            }
        );
    }

    #[test]
    fn envelope_data_or_raw_body() {
        assert_eq!(
            unwrap_envelope(json!({ "data": { "id": 1 } })),
            Unwrapped::Data(json!({ "id": 1 }))
        );
        assert_eq!(
            unwrap_envelope(json!({ "id": 1, "data": null })),
            Unwrapped::Data(json!({ "id": 1, "data": null }))
        );
        assert_eq!(unwrap_envelope(json!([1])), Unwrapped::Data(json!([1])));
    }

    #[test]
    fn page_decoding_reads_metadata() -> Result<(), ApiError> {
        let page: Page<Item> = decode_page(
            json!({
                "data": [{ "id": 1 }, { "id": 2 }],
                "pagination": { "page": 2, "itemsPerPage": 2, "totalItems": 5 }
            }),
            2,
            2,
        )?;
        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(page.page, 2);
        assert!(page.has_next_page);

        let last: Page<Item> = decode_page(
            json!({ "data": [], "pagination": { "page": 3, "totalPages": 3 } }),
            3,
            2,
        )?;
        assert!(!last.has_next_page);
        Ok(())
    }

    #[test]
    fn plain_lists_are_single_pages() -> Result<(), ApiError> {
        let page: Page<Item> = decode_page(json!({ "data": [{ "id": 7 }] }), 1, 10)?;
        assert_eq!(page, Page::last(vec![Item { id: 7 }], 1));
        let raw: Page<Item> = decode_page(json!([{ "id": 8 }]), 1, 10)?;
        assert_eq!(raw.items.len(), 1);
        Ok(())
    }

    #[test]
    fn mismatched_payload_is_a_decode_error() {
        let result: Result<Page<Item>, _> = decode_page(json!({ "data": "nope" }), 1, 10);
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[test]
    fn error_message_precedence() {
        let err = error_from_response(400, r#"{"error":"Invalid price","message":"ignored"}"#);
        assert_eq!(err.to_string(), "Invalid price");
        assert_eq!(err.status(), Some(400));
        let err = error_from_response(500, r#"{"message":"Server exploded"}"#);
        assert_eq!(err.to_string(), "Server exploded");
        let err = error_from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn unauthorized_and_field_errors() {
        let err = error_from_response(401, r#"{"error":"Token expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Token expired");
        let err = error_from_response(
            422,
            r#"{"error":"Validation failed","errors":[{"field":"email","message":"taken"}]}"#,
        );
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(ApiError::network("dns").to_string(), NETWORK_ERROR_MESSAGE);
    }
}
