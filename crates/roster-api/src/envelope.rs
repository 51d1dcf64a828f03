//! The uniform JSON response envelope.
//!
//! Every successful response body has the shape
//!
//! ```json
//! {
//!     "statusCode": 200,
//!     "last_updated": "2024-05-01 12:00:00",
//!     "content": { ... }
//! }
//! ```
//!
//! The envelope is generic over its content, so each endpoint declares
//! the payload type it returns. Bodies are pretty-printed with four-space
//! indentation and sent with no-cache and permissive CORS headers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::ApiError;

/// `strftime` format of the `last_updated` field (always UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value of the `Access-Control-Allow-Methods` header on success responses.
pub const ALLOWED_METHODS: &str = "GET,OPTIONS,POST,PUT,UPDATE,DELETE";

/// Indentation used for response bodies.
const INDENT: &[u8] = b"    ";

/// Success response wrapper carrying a status code, a timestamp, and the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// Mirrors the HTTP status of the response.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// When the response was produced, formatted with [`TIMESTAMP_FORMAT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// The endpoint-specific payload.
    pub content: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap `content`, stamping it with the current UTC time.
    pub fn new(status: StatusCode, content: T) -> Self {
        Self::at(status, content, Utc::now())
    }

    /// Wrap `content`, stamping it with the given time.
    pub fn at(status: StatusCode, content: T, now: DateTime<Utc>) -> Self {
        Self {
            status_code: status.as_u16(),
            last_updated: Some(now.format(TIMESTAMP_FORMAT).to_string()),
            content,
        }
    }

    /// Serialize with four-space indentation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the content cannot
    /// be serialized.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Build the full HTTP response: status, headers, and envelope body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Serialization`] if the body cannot be encoded.
    pub fn into_response_with(self, status: StatusCode) -> Result<Response, ApiError> {
        let body = self.to_pretty_json()?;
        let headers = [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
        ];
        Ok((status, headers, body).into_response())
    }
}

/// Wrap `content` in an envelope and turn it into a response with `status`.
///
/// # Errors
///
/// Returns [`ApiError::Serialization`] if the body cannot be encoded.
pub fn respond<T: Serialize>(status: StatusCode, content: T) -> Result<Response, ApiError> {
    Envelope::new(status, content).into_response_with(status)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).single().unwrap()
    }

    #[test]
    fn timestamp_format() {
        let envelope = Envelope::at(StatusCode::OK, 1_u8, fixed_time());
        assert_eq!(envelope.last_updated.as_deref(), Some("2024-05-01 09:03:07"));
    }

    #[test]
    fn field_names() {
        let envelope = Envelope::at(StatusCode::CREATED, "x", fixed_time());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["last_updated"], "2024-05-01 09:03:07");
        assert_eq!(json["content"], "x");
    }

    #[test]
    fn missing_timestamp_is_omitted() {
        let envelope = Envelope {
            status_code: 200,
            last_updated: None,
            content: 5,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("last_updated").is_none());
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let envelope = Envelope {
            status_code: 200,
            last_updated: None,
            content: 5,
        };
        let text = String::from_utf8(envelope.to_pretty_json().unwrap()).unwrap();
        assert_eq!(text, "{\n    \"statusCode\": 200,\n    \"content\": 5\n}");
    }

    #[test]
    fn response_headers() {
        let response = respond(StatusCode::OK, "ok").unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
    }
}
