//! Error types for Geoapify API calls.
//!
//! Non-2xx responses from the API surface as [`ApiError`], which carries the
//! HTTP status code, a best-effort message extracted from the response body,
//! and the raw body bytes for debugging. Everything else (transport
//! failures, serialization problems, cancellation) is a distinct [`Error`]
//! variant so callers can pattern-match on what actually went wrong.

use std::fmt;

use http::StatusCode;

/// An error response returned by the Geoapify API.
///
/// Produced for every response with a status code outside `[200, 300)`.
/// The message is extracted from the response body on a best-effort basis:
/// a JSON `message` field is preferred, then a JSON `error` field, and
/// finally the raw body decoded as text.
///
/// # Examples
///
/// ```no_run
/// use geoapify::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("YOUR_API_KEY")?;
///
/// match client.geocoding().search("nowhere").send().await {
///     Ok(response) => println!("{} results", response.results.len()),
///     Err(Error::Api(api_error)) => {
///         eprintln!("API rejected the call: {} {}", api_error.status, api_error.message);
///     }
///     Err(other) => eprintln!("call failed: {other}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: StatusCode,
    /// Best-effort message extracted from the response body.
    pub message: String,
    /// The raw response body.
    pub raw_body: Vec<u8>,
}

impl ApiError {
    /// Builds an `ApiError` from a response status and body.
    pub(crate) fn from_response(status: StatusCode, body: Vec<u8>) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            message: Option<String>,
            #[serde(default)]
            error: Option<String>,
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| {
                parsed
                    .message
                    .filter(|m| !m.is_empty())
                    .or_else(|| parsed.error.filter(|m| !m.is_empty()))
            })
            .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());

        Self {
            status,
            message,
            raw_body: body,
        }
    }

    /// Returns `true` if the status code is worth retrying.
    ///
    /// Only HTTP 429 (rate limit) and 5xx (server error) responses are
    /// considered transient; any other status is a permanent failure.
    pub fn is_retryable(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS || self.status.is_server_error()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "API error {}", self.status.as_u16())
        } else {
            write!(f, "API error {}: {}", self.status.as_u16(), self.message)
        }
    }
}

impl std::error::Error for ApiError {}

/// The main error type for Geoapify API calls.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API returned a non-2xx response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Executing the HTTP request failed (connection, DNS, TLS, ...).
    #[error("executing request: {0}")]
    Request(#[source] reqwest::Error),

    /// Reading the response body failed.
    #[error("reading response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Serializing the request body to JSON failed.
    #[error("encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserializing a successful response body failed.
    #[error("decoding response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// An invalid base URL was supplied.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The client was misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The call was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("call cancelled")]
    Cancelled,
}

impl Error {
    /// Returns the underlying [`ApiError`] if the API rejected the call.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api_error) => Some(api_error),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        self.as_api_error().map(|api_error| api_error.status)
    }
}

/// A specialized `Result` type for Geoapify API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_is_preferred() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Invalid apiKey","error":"Unauthorized"}"#.to_vec(),
        );
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.message, "Invalid apiKey");
    }

    #[test]
    fn error_field_is_fallback() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"error":"Bad Request","statusCode":400}"#.to_vec(),
        );
        assert_eq!(err.message, "Bad Request");
    }

    #[test]
    fn raw_body_is_last_resort() {
        let err = ApiError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"upstream exploded".to_vec(),
        );
        assert_eq!(err.message, "upstream exploded");
        assert_eq!(err.raw_body, b"upstream exploded");
    }

    #[test]
    fn empty_string_fields_fall_through() {
        let err =
            ApiError::from_response(StatusCode::FORBIDDEN, br#"{"message":"","error":""}"#.to_vec());
        assert_eq!(err.message, r#"{"message":"","error":""}"#);
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Invalid apiKey"}"#.to_vec(),
        );
        assert_eq!(err.to_string(), "API error 401: Invalid apiKey");

        let bare = ApiError::from_response(StatusCode::NOT_FOUND, Vec::new());
        assert_eq!(bare.to_string(), "API error 404");
    }

    #[test]
    fn retryable_statuses() {
        let cases = [
            (400, false),
            (401, false),
            (404, false),
            (429, true),
            (500, true),
            (502, true),
            (503, true),
        ];
        for (code, want) in cases {
            let err = ApiError::from_response(
                StatusCode::from_u16(code).unwrap(),
                Vec::new(),
            );
            assert_eq!(err.is_retryable(), want, "status {code}");
        }
    }

    #[test]
    fn as_api_error_matches_only_api_variant() {
        let api: Error = ApiError::from_response(StatusCode::BAD_GATEWAY, Vec::new()).into();
        assert!(api.as_api_error().is_some());
        assert_eq!(api.status().map(|s| s.as_u16()), Some(502));

        let cancelled = Error::Cancelled;
        assert!(cancelled.as_api_error().is_none());
        assert!(cancelled.status().is_none());
    }
}
