//! JIRA API response types.
//!
//! These types model the subset of the JIRA REST API v2 responses the client
//! works with. Every field is optional-by-default: a field missing from the
//! JSON is left empty instead of failing the decode.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Treat an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Search result from a JQL query.
///
/// Returned by `GET /rest/api/2/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
    /// Total number of matching issues.
    pub total: u32,
    /// The list of issues.
    #[serde(deserialize_with = "nullable")]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.next_start() < self.total
    }

    /// Get the starting index for the next page.
    pub fn next_start(&self) -> u32 {
        self.start_at
            .saturating_add(u32::try_from(self.issues.len()).unwrap_or(u32::MAX))
    }
}

/// A JIRA issue.
///
/// Returned by `GET /rest/api/2/issue/{issueKey}` or as part of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// REST URL of the issue.
    #[serde(rename = "self")]
    pub self_url: String,
    /// The issue fields.
    pub fields: IssueFields,
}

impl Issue {
    /// Get the issue summary, or an empty string if not returned.
    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or_default()
    }

    /// Get the issue status name, if returned.
    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Get the issue type name, if returned.
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    /// Get the issue priority name, if set.
    pub fn priority(&self) -> Option<&str> {
        self.fields.priority.as_ref().map(|p| p.name.as_str())
    }

    /// Get the assignee display name, if assigned.
    pub fn assignee(&self) -> Option<&str> {
        self.fields.assignee.as_ref().map(|a| a.display_name.as_str())
    }

    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.assignee().unwrap_or("Unassigned")
    }

    /// Get the project key, if available.
    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// Get a custom field value by its id (e.g. "customfield_10016").
    pub fn custom_field(&self, id: &str) -> Option<&Value> {
        self.fields.custom.get(id).filter(|v| !v.is_null())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.summary())
    }
}

/// Issue fields.
///
/// Fields not modelled here (custom fields in particular) are kept in
/// [`IssueFields::custom`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueFields {
    /// The issue summary/title.
    pub summary: Option<String>,
    /// The issue description in wiki markup.
    pub description: Option<String>,
    /// The issue status.
    pub status: Option<Status>,
    /// The issue type (Bug, Story, Task, etc.).
    #[serde(rename = "issuetype")]
    pub issuetype: Option<IssueType>,
    /// The issue priority.
    pub priority: Option<Priority>,
    /// The resolution, once resolved.
    pub resolution: Option<Resolution>,
    /// The issue assignee.
    pub assignee: Option<User>,
    /// The issue reporter.
    pub reporter: Option<User>,
    /// The project this issue belongs to.
    pub project: Option<Project>,
    /// Labels attached to the issue.
    #[serde(deserialize_with = "nullable")]
    pub labels: Vec<String>,
    /// Components the issue is associated with.
    #[serde(deserialize_with = "nullable")]
    pub components: Vec<Component>,
    /// Versions in which the issue is fixed.
    #[serde(deserialize_with = "nullable")]
    pub fix_versions: Vec<Version>,
    /// Versions affected by the issue.
    #[serde(deserialize_with = "nullable")]
    pub versions: Vec<Version>,
    /// When the issue was created.
    pub created: Option<String>,
    /// When the issue was last updated.
    pub updated: Option<String>,
    /// When the issue is due.
    #[serde(rename = "duedate")]
    pub duedate: Option<String>,
    /// Time-tracking estimates.
    #[serde(rename = "timetracking")]
    pub timetracking: Option<TimeTracking>,
    /// Attachments on the issue.
    #[serde(rename = "attachment", deserialize_with = "nullable")]
    pub attachments: Vec<Attachment>,
    /// Comments on the issue.
    #[serde(rename = "comment")]
    pub comments: Option<Comments>,
    /// Links to other issues.
    #[serde(rename = "issuelinks", deserialize_with = "nullable")]
    pub issue_links: Vec<IssueLink>,
    /// Every other field returned by the server.
    #[serde(flatten)]
    pub custom: BTreeMap<String, Value>,
}

impl IssueFields {
    /// Whether no field at all was populated.
    ///
    /// JIRA answers a lookup of an unknown issue with a body that has no
    /// fields, so an empty field set means "not found".
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.issuetype.is_none()
            && self.priority.is_none()
            && self.resolution.is_none()
            && self.assignee.is_none()
            && self.reporter.is_none()
            && self.project.is_none()
            && self.labels.is_empty()
            && self.components.is_empty()
            && self.fix_versions.is_empty()
            && self.versions.is_empty()
            && self.created.is_none()
            && self.updated.is_none()
            && self.duedate.is_none()
            && self.timetracking.is_none()
            && self.attachments.is_empty()
            && self.comments.is_none()
            && self.issue_links.is_empty()
            && self.custom.values().all(Value::is_null)
    }
}

/// Issue status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    /// The status ID.
    pub id: String,
    /// The status name (e.g., "Open", "In Progress", "Closed").
    pub name: String,
    /// The status description.
    pub description: Option<String>,
    /// URL to the status icon.
    pub icon_url: Option<String>,
    /// The status category.
    pub status_category: Option<StatusCategory>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category (groups statuses into to-do, in-progress, done).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusCategory {
    /// The category ID.
    pub id: Option<u32>,
    /// The category key.
    pub key: String,
    /// The category name.
    pub name: String,
    /// The category color.
    pub color_name: Option<String>,
}

/// Issue type (Bug, Story, Task, Epic, etc.).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueType {
    /// The issue type ID.
    pub id: String,
    /// The issue type name.
    pub name: String,
    /// Whether this is a subtask type.
    pub subtask: bool,
    /// The issue type description.
    pub description: Option<String>,
    /// URL to the issue type icon.
    pub icon_url: Option<String>,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue priority.
///
/// Returned as a list by `GET /rest/api/2/priority`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Priority {
    /// The priority ID.
    pub id: String,
    /// The priority name (e.g., "Blocker", "Major", "Minor").
    pub name: String,
    /// The priority description.
    pub description: Option<String>,
    /// URL to the priority icon.
    pub icon_url: Option<String>,
    /// Hex color used to display the priority.
    pub status_color: Option<String>,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// A JIRA user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// The username (server installations).
    pub name: String,
    /// The user key (server installations).
    pub key: Option<String>,
    /// The account ID (cloud installations).
    pub account_id: Option<String>,
    /// The user's display name.
    pub display_name: String,
    /// The user's email address (may be hidden).
    pub email_address: Option<String>,
    /// Whether the user is active.
    pub active: bool,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// A JIRA project.
///
/// Returned as a list by `GET /rest/api/2/project`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    /// The project ID.
    pub id: String,
    /// The project key (e.g., "PROJ").
    pub key: String,
    /// The project name.
    pub name: String,
    /// The project type key (e.g. "software").
    pub project_type_key: Option<String>,
    /// The project lead.
    pub lead: Option<User>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}

/// A project component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    /// The component ID.
    pub id: String,
    /// The component name.
    pub name: String,
    /// The component description.
    pub description: Option<String>,
}

/// A project version (fix version / affects version).
///
/// Returned by `GET /rest/api/2/version/{id}` and `POST /rest/api/2/version`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub archived: bool,
    pub released: bool,
    /// Release date as `YYYY-MM-DD`.
    pub release_date: Option<String>,
    pub project_id: Option<u64>,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// Time-tracking estimates of an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeTracking {
    /// Original estimate in JIRA duration notation, e.g. "1d 2h".
    pub original_estimate: Option<String>,
    /// Remaining estimate in JIRA duration notation.
    pub remaining_estimate: Option<String>,
    /// Time spent in JIRA duration notation.
    pub time_spent: Option<String>,
    pub original_estimate_seconds: Option<u64>,
    pub remaining_estimate_seconds: Option<u64>,
    pub time_spent_seconds: Option<u64>,
}

/// An issue attachment.
///
/// Returned by `GET /rest/api/2/attachment/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    /// The attachment ID.
    pub id: String,
    /// The file name.
    pub filename: String,
    /// The uploader.
    pub author: Option<User>,
    /// When the attachment was uploaded.
    pub created: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    /// MIME type of the content.
    pub mime_type: Option<String>,
    /// URL to download the content.
    pub content: Option<String>,
    /// URL to a thumbnail, for images.
    pub thumbnail: Option<String>,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// A comment on a JIRA issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    /// The comment ID.
    pub id: String,
    /// The comment body in wiki markup.
    pub body: String,
    /// The user who authored the comment.
    pub author: Option<User>,
    /// The user who last edited the comment.
    pub update_author: Option<User>,
    /// When the comment was created.
    pub created: Option<String>,
    /// When the comment was last updated.
    pub updated: Option<String>,
    /// REST URL of the comment.
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// A page of comments.
///
/// Returned by `GET /rest/api/2/issue/{issueKey}/comment` and embedded in
/// issue fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comments {
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
    /// Total number of comments.
    pub total: u32,
    /// The list of comments.
    #[serde(deserialize_with = "nullable")]
    pub comments: Vec<Comment>,
}

impl Comments {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.start_at
            .saturating_add(u32::try_from(self.comments.len()).unwrap_or(u32::MAX))
            < self.total
    }
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    /// The transition ID, used to perform it.
    pub id: String,
    /// The transition name (e.g., "Start Progress").
    pub name: String,
    /// The status the issue ends up in.
    pub to: Option<Status>,
    /// Field metadata for the transition screen, when expanded.
    pub fields: BTreeMap<String, FieldMeta>,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.to {
            Some(to) => write!(f, "{} -> {}", self.name, to.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Transitions available on an issue.
///
/// Returned by `GET /rest/api/2/issue/{issueKey}/transitions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transitions {
    pub expand: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub transitions: Vec<Transition>,
}

impl Transitions {
    /// Find a transition by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// A link type, e.g. "Blocks" with "is blocked by" / "blocks".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueLinkType {
    pub id: String,
    pub name: String,
    /// Description from the inward issue's point of view.
    pub inward: String,
    /// Description from the outward issue's point of view.
    pub outward: String,
}

/// A link between two issues, as embedded in issue fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueLink {
    pub id: String,
    #[serde(rename = "type")]
    pub link_type: Option<IssueLinkType>,
    /// Set when the issue holding this link is the outward side.
    pub inward_issue: Option<LinkedIssue>,
    /// Set when the issue holding this link is the inward side.
    pub outward_issue: Option<LinkedIssue>,
}

/// The other end of an issue link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// Reference to a newly created issue.
///
/// Returned by `POST /rest/api/2/issue`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Issue-creation metadata.
///
/// Returned by `GET /rest/api/2/issue/createmeta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateMeta {
    pub expand: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<CreateMetaProject>,
}

/// Creation metadata of one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateMetaProject {
    pub id: String,
    pub key: String,
    pub name: String,
    /// Issue types that can be created in the project.
    #[serde(deserialize_with = "nullable")]
    pub issuetypes: Vec<CreateMetaIssueType>,
}

impl CreateMetaProject {
    /// Find an issue type by name, ignoring case.
    pub fn issue_type(&self, name: &str) -> Option<&CreateMetaIssueType> {
        self.issuetypes
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Creation metadata of one issue type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateMetaIssueType {
    pub id: String,
    pub name: String,
    pub subtask: bool,
    pub description: Option<String>,
    /// Field metadata keyed by field id, present with `expand=projects.issuetypes.fields`.
    pub fields: BTreeMap<String, FieldMeta>,
}

impl CreateMetaIssueType {
    /// Ids of the fields that must be supplied on creation.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, meta)| meta.required)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// Metadata describing one editable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldMeta {
    pub required: bool,
    pub name: String,
    /// Type description, e.g. `{"type":"string","system":"summary"}`.
    pub schema: Option<Value>,
    pub has_default_value: bool,
    /// Operations allowed in an `update` section, e.g. "set", "add".
    #[serde(deserialize_with = "nullable")]
    pub operations: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub allowed_values: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_has_more() {
        let result = SearchResult {
            start_at: 0,
            max_results: 1,
            total: 2,
            issues: vec![Issue::default()],
        };
        assert!(result.has_more());
        assert_eq!(result.next_start(), 1);

        let result = SearchResult {
            start_at: 1,
            max_results: 1,
            total: 2,
            issues: vec![Issue::default()],
        };
        assert!(!result.has_more());
    }

    #[test]
    fn test_pagination_saturates_on_huge_start_at() {
        let result: SearchResult = serde_json::from_str(
            r#"{"startAt": 4294967295, "maxResults": 1, "total": 4294967295, "issues": [{}]}"#,
        )
        .unwrap();
        assert_eq!(result.next_start(), u32::MAX);
        assert!(!result.has_more());

        let comments: Comments = serde_json::from_str(
            r#"{"startAt": 4294967295, "total": 4294967295, "comments": [{"id": "1"}]}"#,
        )
        .unwrap();
        assert!(!comments.has_more());
    }

    #[test]
    fn test_parse_minimal_issue() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://jira.example.com/rest/api/2/issue/10001",
            "fields": {
                "summary": "Test issue",
                "status": {"id": "1", "name": "Open"},
                "issuetype": {"id": "1", "name": "Bug"}
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "PROJ-123");
        assert_eq!(issue.summary(), "Test issue");
        assert_eq!(issue.status(), Some("Open"));
        assert_eq!(issue.issue_type(), Some("Bug"));
        assert!(issue.priority().is_none());
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert!(!issue.fields.is_empty());
    }

    #[test]
    fn test_parse_full_issue() {
        let json = r#"{
            "id": "10002",
            "key": "PROJ-7",
            "fields": {
                "summary": "Crash on save",
                "description": "Steps:\n# open\n# save",
                "priority": {"id": "2", "name": "Critical"},
                "assignee": {"name": "jdoe", "displayName": "Jane Doe", "active": true},
                "project": {"id": "100", "key": "PROJ", "name": "Project"},
                "labels": ["crash"],
                "fixVersions": [{"id": "5", "name": "1.0", "released": false}],
                "timetracking": {"originalEstimate": "1h", "remainingEstimateSeconds": 1800},
                "comment": {"startAt": 0, "maxResults": 1, "total": 1, "comments": [
                    {"id": "1", "body": "seen it", "author": {"name": "bob", "displayName": "Bob"}}
                ]},
                "issuelinks": [{
                    "id": "9",
                    "type": {"id": "1", "name": "Blocks", "inward": "is blocked by", "outward": "blocks"},
                    "outwardIssue": {"id": "10003", "key": "PROJ-8"}
                }],
                "customfield_10016": 3.0
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.priority(), Some("Critical"));
        assert_eq!(issue.assignee(), Some("Jane Doe"));
        assert_eq!(issue.project_key(), Some("PROJ"));
        assert_eq!(issue.fields.fix_versions[0].name, "1.0");
        assert_eq!(
            issue.fields.timetracking.as_ref().unwrap().remaining_estimate_seconds,
            Some(1800)
        );
        assert_eq!(issue.fields.comments.as_ref().unwrap().comments[0].body, "seen it");
        assert_eq!(
            issue.fields.issue_links[0].outward_issue.as_ref().unwrap().key,
            "PROJ-8"
        );
        assert_eq!(issue.custom_field("customfield_10016"), Some(&serde_json::json!(3.0)));
        assert_eq!(issue.to_string(), "PROJ-7: Crash on save");
    }

    #[test]
    fn test_parse_issue_with_null_fields() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "fields": {
                "summary": "Test issue",
                "description": null,
                "priority": null,
                "assignee": null,
                "labels": null,
                "components": [],
                "customfield_10020": null
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.priority().is_none());
        assert!(issue.fields.labels.is_empty());
        assert!(issue.custom_field("customfield_10020").is_none());
    }

    #[test]
    fn test_empty_fields_detection() {
        let issue: Issue = serde_json::from_str(r#"{"key": "PROJ-1", "fields": {}}"#).unwrap();
        assert!(issue.fields.is_empty());

        let issue: Issue =
            serde_json::from_str(r#"{"fields": {"customfield_1": null, "labels": []}}"#).unwrap();
        assert!(issue.fields.is_empty());

        let issue: Issue =
            serde_json::from_str(r#"{"fields": {"customfield_1": "x"}}"#).unwrap();
        assert!(!issue.fields.is_empty());
    }

    #[test]
    fn test_error_body_decodes_as_empty_issue() {
        let json = r#"{"errorMessages":["Issue Does Not Exist"],"errors":{}}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.key.is_empty());
        assert!(issue.fields.is_empty());
    }

    #[test]
    fn test_parse_transitions() {
        let json = r#"{
            "expand": "transitions",
            "transitions": [
                {"id": "11", "name": "Start Progress", "to": {"id": "3", "name": "In Progress"}},
                {"id": "21", "name": "Resolve Issue"}
            ]
        }"#;

        let transitions: Transitions = serde_json::from_str(json).unwrap();
        assert_eq!(transitions.transitions.len(), 2);
        assert_eq!(
            transitions.find_by_name("start progress").map(|t| t.id.as_str()),
            Some("11")
        );
        assert_eq!(
            transitions.transitions[0].to_string(),
            "Start Progress -> In Progress"
        );
        assert_eq!(transitions.transitions[1].to_string(), "Resolve Issue");
    }

    #[test]
    fn test_parse_create_meta() {
        let json = r#"{
            "projects": [{
                "id": "100",
                "key": "PROJ",
                "name": "Project",
                "issuetypes": [{
                    "id": "1",
                    "name": "Bug",
                    "fields": {
                        "summary": {"required": true, "name": "Summary", "operations": ["set"]},
                        "labels": {"required": false, "name": "Labels"}
                    }
                }]
            }]
        }"#;

        let meta: CreateMeta = serde_json::from_str(json).unwrap();
        let project = &meta.projects[0];
        let bug = project.issue_type("bug").unwrap();
        assert_eq!(bug.required_fields(), vec!["summary"]);
        assert_eq!(bug.fields["summary"].operations, vec!["set"]);
    }

    #[test]
    fn test_parse_comments_response() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 1,
            "total": 3,
            "comments": [
                {"id": "10001", "body": "First", "created": "2024-01-15T10:00:00.000+0000"}
            ]
        }"#;

        let response: Comments = serde_json::from_str(json).unwrap();
        assert_eq!(response.comments[0].body, "First");
        assert!(response.comments[0].author.is_none());
        assert!(response.has_more());
    }

    #[test]
    fn test_parse_priority_and_project_lists() {
        let priorities: Vec<Priority> =
            serde_json::from_str(r##"[{"id": "1", "name": "Blocker", "statusColor": "#ff0000"}]"##)
                .unwrap();
        assert_eq!(priorities[0].status_color.as_deref(), Some("#ff0000"));
        assert_eq!(priorities[0].to_string(), "Blocker");

        let projects: Vec<Project> =
            serde_json::from_str(r#"[{"id": "100", "key": "PROJ", "name": "Project"}]"#).unwrap();
        assert_eq!(projects[0].to_string(), "Project (PROJ)");
    }

    #[test]
    fn test_status_display() {
        let status = Status {
            name: "In Progress".to_string(),
            ..Default::default()
        };
        assert_eq!(status.to_string(), "In Progress");
    }
}
