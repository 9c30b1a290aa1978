//! API error types for the JIRA client.

use std::fmt;

use thiserror::Error;

use super::transport::RawResponse;
use crate::config::ConfigError;

/// How far a request got through the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// A full HTTP response was received (any status code).
    Completed,
    /// The request failed before a response arrived (DNS, connect, TLS, ...).
    Error,
    /// The request did not finish within the configured timeout.
    TimedOut,
    /// A response started but its body could not be read.
    Aborted,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseStatus::Completed => "completed",
            ResponseStatus::Error => "error",
            ResponseStatus::TimedOut => "timed out",
            ResponseStatus::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// A failed exchange with the JIRA server.
///
/// Carries everything needed to diagnose the failure: how far the transport
/// got, the HTTP status (if any), the status text and the raw response body.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Transport outcome of the request.
    pub response_status: ResponseStatus,
    /// HTTP status code, absent when no response was received.
    pub status_code: Option<u16>,
    /// HTTP reason phrase, e.g. "Bad Request".
    pub status_text: String,
    /// Raw response body.
    pub body: String,
    /// Transport error message when the request did not complete.
    pub error_message: Option<String>,
}

impl ApiError {
    /// Build an error from a raw transport response.
    pub fn from_response(response: &RawResponse) -> Self {
        Self {
            response_status: response.response_status,
            status_code: response.status_code,
            status_text: response.status_text.clone(),
            body: response.body.clone(),
            error_message: response.error_message.clone(),
        }
    }

    /// Check whether the server answered with the given status code.
    pub fn has_status(&self, code: u16) -> bool {
        self.status_code == Some(code)
    }

    fn describe(&self) -> String {
        match (self.response_status, self.status_code) {
            (ResponseStatus::Completed, Some(code)) => {
                let mut msg = format!("JIRA request failed: HTTP {} {}", code, self.status_text);
                if let Some(detail) = self.server_message() {
                    msg.push_str(": ");
                    msg.push_str(&detail);
                }
                msg
            }
            (status, _) => format!(
                "JIRA request {}: {}",
                status,
                self.error_message.as_deref().unwrap_or("no response received")
            ),
        }
    }

    /// Extract the messages JIRA puts in `errorMessages` / `errors`.
    pub fn server_message(&self) -> Option<String> {
        let json = serde_json::from_str::<serde_json::Value>(&self.body).ok()?;

        let mut parts: Vec<String> = json
            .get("errorMessages")
            .and_then(|m| m.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            parts.extend(errors.iter().map(|(k, v)| match v.as_str() {
                Some(s) => format!("{}: {}", k, s),
                None => format!("{}: {}", k, v),
            }));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl std::error::Error for ApiError {}

/// Errors returned by [`JiraClient`](super::JiraClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server or the transport reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The caller passed arguments the operation cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation exists in the API surface but is deliberately not supported.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// The response body could not be decoded into the expected shape.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The connection configuration is invalid.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(code: u16, text: &str, body: &str) -> ApiError {
        ApiError {
            response_status: ResponseStatus::Completed,
            status_code: Some(code),
            status_text: text.to_string(),
            body: body.to_string(),
            error_message: None,
        }
    }

    #[test]
    fn test_display_plain_status() {
        let err = completed(500, "Internal Server Error", "");
        assert_eq!(
            err.to_string(),
            "JIRA request failed: HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn test_display_includes_error_messages() {
        let err = completed(
            400,
            "Bad Request",
            r#"{"errorMessages":["Field 'foo' does not exist"],"errors":{}}"#,
        );
        assert_eq!(
            err.to_string(),
            "JIRA request failed: HTTP 400 Bad Request: Field 'foo' does not exist"
        );
    }

    #[test]
    fn test_server_message_merges_field_errors() {
        let err = completed(
            400,
            "Bad Request",
            r#"{"errorMessages":[],"errors":{"summary":"You must specify a summary"}}"#,
        );
        assert_eq!(
            err.server_message().as_deref(),
            Some("summary: You must specify a summary")
        );
    }

    #[test]
    fn test_server_message_ignores_non_json() {
        let err = completed(502, "Bad Gateway", "<html>proxy error</html>");
        assert!(err.server_message().is_none());
    }

    #[test]
    fn test_display_transport_failure() {
        let err = ApiError {
            response_status: ResponseStatus::TimedOut,
            status_code: None,
            status_text: String::new(),
            body: String::new(),
            error_message: Some("operation timed out".to_string()),
        };
        assert_eq!(err.to_string(), "JIRA request timed out: operation timed out");
        assert!(!err.has_status(200));
    }

    #[test]
    fn test_client_error_display() {
        let err = ClientError::InvalidArgument("nothing to update".to_string());
        assert_eq!(err.to_string(), "Invalid argument: nothing to update");

        let err = ClientError::NotImplemented("get_issue_link_types");
        assert_eq!(err.to_string(), "Not implemented: get_issue_link_types");
    }

    #[test]
    fn test_api_error_is_transparent() {
        let err: ClientError = completed(404, "Not Found", "").into();
        assert_eq!(err.to_string(), "JIRA request failed: HTTP 404 Not Found");
    }
}
