//! JIRA API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST API.

mod auth;
mod client;
pub mod error;
pub mod paths;
mod payload;
mod request;
pub mod transport;
pub mod types;

pub use auth::Auth;
pub use client::JiraClient;
pub use error::{ApiError, ClientError, ResponseStatus, Result};
pub use payload::{
    FieldOperation, IssueUpdate, IssueUpdateBuilder, LinkRequest, NewIssue, NewVersion,
};
pub use request::Request;
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::Issue;
