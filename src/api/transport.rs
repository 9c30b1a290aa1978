//! HTTP transport layer.
//!
//! The [`Transport`] trait is the seam between request building and the wire.
//! [`HttpTransport`] is the reqwest-backed implementation used in production;
//! tests substitute their own implementation to observe and script exchanges.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use super::auth::Auth;
use super::error::{ResponseStatus, Result};
use super::request::Request;

/// The outcome of sending a [`Request`], whether or not it completed.
///
/// Transports never fail outright: a request that did not complete is
/// reported through [`RawResponse::response_status`] so the client can turn
/// it into an [`ApiError`](super::ApiError) with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Transport outcome.
    pub response_status: ResponseStatus,
    /// HTTP status code, if a response arrived.
    pub status_code: Option<u16>,
    /// HTTP reason phrase.
    pub status_text: String,
    /// Raw response body.
    pub body: String,
    /// Transport error message, if the request did not complete.
    pub error_message: Option<String>,
}

impl RawResponse {
    /// A completed exchange with the given status and body.
    pub fn completed(status_code: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            response_status: ResponseStatus::Completed,
            status_code: Some(status_code),
            status_text,
            body: body.into(),
            error_message: None,
        }
    }

    /// A request that never produced a response.
    pub fn failed(response_status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            response_status,
            status_code: None,
            status_text: String::new(),
            body: String::new(),
            error_message: Some(message.into()),
        }
    }

    /// Whether a response was received in full.
    pub fn is_completed(&self) -> bool {
        self.response_status == ResponseStatus::Completed
    }
}

/// Sends request descriptors to the JIRA server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and report what happened.
    async fn execute(&self, request: Request) -> RawResponse;
}

/// reqwest-backed transport bound to one JIRA instance.
///
/// The base URL and credentials are fixed at construction and attached to
/// every request.
#[derive(Debug)]
pub struct HttpTransport {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance, without trailing slash.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl HttpTransport {
    /// Build a transport. Performs no network I/O.
    ///
    /// Without a timeout, reqwest's default (none) applies.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, auth: Auth, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            auth,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> RawResponse {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, &url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json");

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let status = if e.is_timeout() {
                    ResponseStatus::TimedOut
                } else {
                    ResponseStatus::Error
                };
                warn!("Request to {} did not complete: {}", url, e);
                return RawResponse::failed(status, e.to_string());
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        match response.text().await {
            Ok(body) => RawResponse::completed(status.as_u16(), body),
            Err(e) => {
                warn!("Failed to read response body from {}: {}", url, e);
                RawResponse {
                    response_status: if e.is_timeout() {
                        ResponseStatus::TimedOut
                    } else {
                        ResponseStatus::Aborted
                    },
                    status_code: Some(status.as_u16()),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                    body: String::new(),
                    error_message: Some(e.to_string()),
                }
            }
        }
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn transport_for(url: &str) -> HttpTransport {
        HttpTransport::new(url, Auth::new("jdoe", "secret"), None).unwrap()
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://jira.example.com/"),
            "https://jira.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://jira.example.com///"),
            "https://jira.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://example.com/jira/"),
            "https://example.com/jira"
        );
    }

    #[test]
    fn test_completed_response_status_text() {
        let response = RawResponse::completed(404, "");
        assert!(response.is_completed());
        assert_eq!(response.status_text, "Not Found");
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/search")
            .match_header("authorization", Auth::new("jdoe", "secret").header_value())
            .match_header("accept", "application/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("jql".into(), "project = PROJ".into()),
                Matcher::UrlEncoded("startAt".into(), "0".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"total":0}"#)
            .create_async()
            .await;

        let transport = transport_for(&server.url());
        let request = Request::get("/rest/api/2/search")
            .param("jql", "project = PROJ")
            .param("startAt", 0);
        let response = transport.execute(request).await;

        mock.assert_async().await;
        assert_eq!(response.status_code, Some(200));
        assert_eq!(response.body, r#"{"total":0}"#);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue/PROJ-1/comment")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"body": "Looks good"})))
            .with_status(201)
            .with_body(r#"{"id":"10000"}"#)
            .create_async()
            .await;

        let transport = transport_for(&format!("{}/", server.url()));
        let request = Request::post("/rest/api/2/issue/PROJ-1/comment")
            .json(&json!({"body": "Looks good"}))
            .unwrap();
        let response = transport.execute(request).await;

        mock.assert_async().await;
        assert_eq!(response.status_code, Some(201));
        assert_eq!(response.status_text, "Created");
    }

    #[tokio::test]
    async fn test_error_status_is_still_completed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/rest/api/2/version/1")
            .with_status(400)
            .with_body(r#"{"errorMessages":["bad"]}"#)
            .create_async()
            .await;

        let transport = transport_for(&server.url());
        let response = transport.execute(Request::delete("/rest/api/2/version/1")).await;

        assert!(response.is_completed());
        assert_eq!(response.status_code, Some(400));
        assert_eq!(response.body, r#"{"errorMessages":["bad"]}"#);
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported() {
        let transport = transport_for("http://127.0.0.1:1");
        let response = transport
            .execute(Request::get(crate::api::paths::session()))
            .await;

        assert_eq!(response.response_status, ResponseStatus::Error);
        assert!(response.status_code.is_none());
        assert!(response.error_message.is_some());
    }
}
