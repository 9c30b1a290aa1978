//! Crate-level error type.
//!
//! Aggregates configuration and client errors for callers that load a
//! configuration and talk to JIRA in one flow, and maps them to messages
//! suitable for end users.

use thiserror::Error;

use crate::api::{ClientError, ResponseStatus};
use crate::config::ConfigError;

/// Any error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Client errors.
    #[error("{0}")]
    Client(#[from] ClientError),
}

/// Result type using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a user-friendly message for display.
    ///
    /// This returns a message without technical detail such as response bodies.
    pub fn user_message(&self) -> String {
        match self {
            Error::Config(e) => config_message(e),
            Error::Client(e) => match e {
                ClientError::Config(e) => config_message(e),
                ClientError::Api(api) => match (api.response_status, api.status_code) {
                    (ResponseStatus::TimedOut, _) => {
                        "JIRA did not answer in time. Please try again later.".to_string()
                    }
                    (ResponseStatus::Completed, Some(401)) => {
                        "Authentication failed. Please check your username and password."
                            .to_string()
                    }
                    (ResponseStatus::Completed, Some(403)) => {
                        "Access denied. You don't have permission to access this resource."
                            .to_string()
                    }
                    (ResponseStatus::Completed, Some(400)) => match api.server_message() {
                        Some(msg) => format!("JIRA rejected the request: {}", msg),
                        None => "JIRA rejected the request.".to_string(),
                    },
                    (ResponseStatus::Completed, Some(code)) if code >= 500 => {
                        "JIRA server error. Please try again later.".to_string()
                    }
                    (ResponseStatus::Completed, Some(code)) => {
                        format!("JIRA answered with unexpected status {}.", code)
                    }
                    _ => "Connection failed. Please check the JIRA URL and your network."
                        .to_string(),
                },
                ClientError::InvalidArgument(msg) => format!("Invalid request: {}", msg),
                ClientError::NotImplemented(op) => {
                    format!("'{}' is not supported by this client.", op)
                }
                ClientError::InvalidResponse(_) => {
                    "Unexpected response from JIRA. Please try again.".to_string()
                }
                ClientError::Serialize(_) => "Could not build the request.".to_string(),
                ClientError::Http(_) => "Could not initialize the HTTP client.".to_string(),
            },
        }
    }
}

fn config_message(e: &ConfigError) -> String {
    match e {
        ConfigError::NoConfigDir => {
            "Could not find configuration directory. Please check your system settings."
                .to_string()
        }
        ConfigError::ReadError(_) => {
            "Could not read configuration file. Please check the file exists and is readable."
                .to_string()
        }
        ConfigError::ParseError(_) => {
            "Configuration file is invalid. Please check the file format.".to_string()
        }
        ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn api_error(code: u16, body: &str) -> Error {
        Error::Client(ClientError::Api(ApiError {
            response_status: ResponseStatus::Completed,
            status_code: Some(code),
            status_text: String::new(),
            body: body.to_string(),
            error_message: None,
        }))
    }

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(
            api_error(401, "").user_message(),
            "Authentication failed. Please check your username and password."
        );
    }

    #[test]
    fn test_bad_request_message_uses_server_text() {
        let err = api_error(400, r#"{"errorMessages":["JQL is invalid"]}"#);
        assert_eq!(err.user_message(), "JIRA rejected the request: JQL is invalid");
    }

    #[test]
    fn test_server_error_message() {
        assert_eq!(
            api_error(503, "").user_message(),
            "JIRA server error. Please try again later."
        );
    }

    #[test]
    fn test_transport_failure_message() {
        let err = Error::Client(ClientError::Api(ApiError {
            response_status: ResponseStatus::Error,
            status_code: None,
            status_text: String::new(),
            body: String::new(),
            error_message: Some("connection refused".to_string()),
        }));
        assert_eq!(
            err.user_message(),
            "Connection failed. Please check the JIRA URL and your network."
        );
    }

    #[test]
    fn test_config_messages() {
        let err = Error::Config(ConfigError::ValidationError("bad url".to_string()));
        assert_eq!(err.user_message(), "Configuration error: bad url");

        let err = Error::Client(ClientError::Config(ConfigError::NoConfigDir));
        assert!(err.user_message().contains("configuration directory"));
    }

    #[test]
    fn test_not_implemented_message() {
        let err = Error::Client(ClientError::NotImplemented("get_issue_link_types"));
        assert_eq!(
            err.user_message(),
            "'get_issue_link_types' is not supported by this client."
        );
    }

    #[test]
    fn test_display_passes_through() {
        let err = Error::Config(ConfigError::ValidationError("bad url".to_string()));
        assert_eq!(err.to_string(), "Invalid configuration: bad url");
    }
}
