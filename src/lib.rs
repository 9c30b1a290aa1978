//! jira-rest-client - a typed client for the JIRA REST API.
//!
//! The crate maps a fixed set of JIRA resources (issues, projects, comments,
//! transitions, versions, links, attachments) onto async methods of
//! [`JiraClient`], authenticates every request with HTTP Basic credentials
//! and decodes the JSON responses into the records in [`api::types`].
//!
//! ```no_run
//! use jira_rest_client::{ConnectionConfig, JiraClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::new("https://jira.example.com", "jdoe", "api-token");
//! let client = JiraClient::new(&config)?;
//!
//! if let Some(issue) = client.get_issue("PROJ-1", &["summary", "status"]).await? {
//!     println!("{}", issue);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;

pub use api::{ApiError, ClientError, JiraClient};
pub use config::ConnectionConfig;
pub use error::Error;
