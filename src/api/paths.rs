//! Relative paths of the JIRA REST resources used by the client.
//!
//! Identifiers are percent-encoded so a key can never escape its path segment.

use urlencoding::encode;

/// Root of the REST API v2 resources.
pub const API_ROOT: &str = "/rest/api/2";

/// The session resource lives outside the v2 API.
pub const SESSION: &str = "/rest/auth/1/session";

/// `issue/{key}`
pub fn issue(key: &str) -> String {
    format!("{}/issue/{}", API_ROOT, encode(key))
}

/// `issue` (creation endpoint)
pub fn issues() -> String {
    format!("{}/issue", API_ROOT)
}

/// `issue/createmeta`
pub fn create_meta() -> String {
    format!("{}/issue/createmeta", API_ROOT)
}

/// `issue/{key}/transitions`
pub fn transitions(key: &str) -> String {
    format!("{}/transitions", issue(key))
}

/// `issue/{key}/comment`
pub fn comments(key: &str) -> String {
    format!("{}/comment", issue(key))
}

/// `search`
pub fn search() -> String {
    format!("{}/search", API_ROOT)
}

/// `project`
pub fn projects() -> String {
    format!("{}/project", API_ROOT)
}

/// `priority`
pub fn priorities() -> String {
    format!("{}/priority", API_ROOT)
}

/// `status`
pub fn statuses() -> String {
    format!("{}/status", API_ROOT)
}

/// `attachment/{id}`
pub fn attachment(id: &str) -> String {
    format!("{}/attachment/{}", API_ROOT, encode(id))
}

/// `version`
pub fn versions() -> String {
    format!("{}/version", API_ROOT)
}

/// `version/{id}`
pub fn version(id: &str) -> String {
    format!("{}/version/{}", API_ROOT, encode(id))
}

/// `issueLink`
pub fn issue_links() -> String {
    format!("{}/issueLink", API_ROOT)
}

/// `issueLinkType`
pub fn issue_link_types() -> String {
    format!("{}/issueLinkType", API_ROOT)
}

/// The session-check endpoint.
pub fn session() -> String {
    SESSION.to_string()
}
