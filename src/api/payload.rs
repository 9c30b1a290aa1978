//! Request bodies sent to JIRA.
//!
//! Partial updates have a dynamic shape: a `fields` section replacing whole
//! values and an `update` section holding per-field operation lists. Both are
//! optional, but an update with neither is rejected before any request is
//! built.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::error::{ClientError, Result};

/// One operation inside an `update` section entry.
///
/// Serializes as `{"set": value}`, `{"add": value}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOperation {
    Set(Value),
    Add(Value),
    Remove(Value),
    Edit(Value),
}

/// A partial issue update, body of `PUT /rest/api/2/issue/{key}`.
///
/// Absent sections are left out of the JSON entirely (never sent as `null`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<Map<String, Value>>,
}

impl IssueUpdate {
    /// Start building an update.
    pub fn builder() -> IssueUpdateBuilder {
        IssueUpdateBuilder::default()
    }

    /// Build an update from separately supplied sections.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidArgument` if both sections are absent or
    /// a present section is not a JSON object.
    pub fn from_sections(fields: Option<Value>, update: Option<Value>) -> Result<Self> {
        let fields = fields.map(|v| into_object(v, "fields")).transpose()?;
        let update = update.map(|v| into_object(v, "update")).transpose()?;
        Self::new(fields, update)
    }

    /// Build an update from one combined object holding `fields` and/or `update`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidArgument` if the value is not an object,
    /// carries keys other than `fields` and `update`, or carries neither.
    pub fn from_json(value: Value) -> Result<Self> {
        let mut object = into_object(value, "update payload")?;
        let fields = object.remove("fields");
        let update = object.remove("update");

        if let Some(unknown) = object.keys().next() {
            return Err(ClientError::InvalidArgument(format!(
                "unexpected key '{}' in update payload",
                unknown
            )));
        }

        Self::from_sections(fields, update)
    }

    /// Time-tracking edit with only the estimates actually supplied.
    ///
    /// Minutes are rendered in JIRA duration notation, e.g. `"30m"`.
    pub fn timetracking(original_minutes: Option<u32>, remaining_minutes: Option<u32>) -> Self {
        let mut edit = Map::new();
        if let Some(minutes) = original_minutes {
            edit.insert("originalEstimate".to_string(), json!(format!("{}m", minutes)));
        }
        if let Some(minutes) = remaining_minutes {
            edit.insert("remainingEstimate".to_string(), json!(format!("{}m", minutes)));
        }

        let mut update = Map::new();
        update.insert(
            "timetracking".to_string(),
            json!([FieldOperation::Edit(Value::Object(edit))]),
        );

        Self {
            fields: None,
            update: Some(update),
        }
    }

    /// Set each named field to `null`.
    pub fn reset_fields<S: AsRef<str>>(names: &[S]) -> Self {
        let fields = names
            .iter()
            .map(|name| (name.as_ref().to_string(), Value::Null))
            .collect();

        Self {
            fields: Some(fields),
            update: None,
        }
    }

    /// The full-replacement section.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.fields.as_ref()
    }

    /// The operation-list section.
    pub fn update(&self) -> Option<&Map<String, Value>> {
        self.update.as_ref()
    }

    fn new(fields: Option<Map<String, Value>>, update: Option<Map<String, Value>>) -> Result<Self> {
        if fields.is_none() && update.is_none() {
            return Err(ClientError::InvalidArgument(
                "an issue update needs a `fields` or an `update` section".to_string(),
            ));
        }
        Ok(Self { fields, update })
    }

    /// Copy both sections into an existing JSON object.
    pub(crate) fn merge_into(&self, target: &mut Map<String, Value>) {
        if let Some(fields) = &self.fields {
            target.insert("fields".to_string(), Value::Object(fields.clone()));
        }
        if let Some(update) = &self.update {
            target.insert("update".to_string(), Value::Object(update.clone()));
        }
    }
}

fn into_object(value: Value, section: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::InvalidArgument(format!(
            "`{}` must be a JSON object, got {}",
            section, other
        ))),
    }
}

/// Builder for [`IssueUpdate`].
#[derive(Debug, Default)]
pub struct IssueUpdateBuilder {
    fields: Map<String, Value>,
    update: Map<String, Value>,
}

impl IssueUpdateBuilder {
    /// Replace a field's whole value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Append an operation to a field's operation list.
    pub fn operation(mut self, name: impl Into<String>, operation: FieldOperation) -> Self {
        let operation = json!(operation);
        match self.update.entry(name.into()).or_insert_with(|| json!([])) {
            Value::Array(ops) => ops.push(operation),
            slot => *slot = json!([operation]),
        }
        self
    }

    /// Finish the update.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidArgument` if neither a field nor an
    /// operation was added.
    pub fn build(self) -> Result<IssueUpdate> {
        let fields = (!self.fields.is_empty()).then_some(self.fields);
        let update = (!self.update.is_empty()).then_some(self.update);
        IssueUpdate::new(fields, update)
    }
}

/// Request to link two issues, body of `POST /rest/api/2/issueLink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// Link type name, e.g. "Blocks".
    pub link_type: String,
    /// Key of the inward issue.
    pub inward_key: String,
    /// Key of the outward issue.
    pub outward_key: String,
    /// Comment added to the inward issue along with the link.
    pub comment: Option<String>,
}

impl LinkRequest {
    pub fn new(
        link_type: impl Into<String>,
        inward_key: impl Into<String>,
        outward_key: impl Into<String>,
    ) -> Self {
        Self {
            link_type: link_type.into(),
            inward_key: inward_key.into(),
            outward_key: outward_key.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl Serialize for LinkRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.comment.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", &json!({ "name": self.link_type }))?;
        map.serialize_entry("inwardIssue", &json!({ "key": self.inward_key }))?;
        map.serialize_entry("outwardIssue", &json!({ "key": self.outward_key }))?;
        if let Some(comment) = &self.comment {
            map.serialize_entry("comment", &json!({ "body": comment }))?;
        }
        map.end()
    }
}

/// Issue creation payload, body of `POST /rest/api/2/issue`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub project_key: String,
    /// Issue type name, e.g. "Bug".
    pub issue_type: String,
    pub summary: String,
    pub description: Option<String>,
    /// Priority name.
    pub priority: Option<String>,
    /// Assignee username.
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    /// Component names.
    pub components: Vec<String>,
    /// Any other fields, keyed by field id.
    pub extra_fields: Map<String, Value>,
}

impl NewIssue {
    pub fn new(
        project_key: impl Into<String>,
        issue_type: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            issue_type: issue_type.into(),
            summary: summary.into(),
            description: None,
            priority: None,
            assignee: None,
            labels: Vec::new(),
            components: Vec::new(),
            extra_fields: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Set an arbitrary field, e.g. a custom field.
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_fields.insert(id.into(), value.into());
        self
    }

    fn fields_object(&self) -> Map<String, Value> {
        let mut fields = self.extra_fields.clone();
        fields.insert("project".to_string(), json!({ "key": self.project_key }));
        fields.insert("issuetype".to_string(), json!({ "name": self.issue_type }));
        fields.insert("summary".to_string(), json!(self.summary));

        if let Some(description) = &self.description {
            fields.insert("description".to_string(), json!(description));
        }
        if let Some(priority) = &self.priority {
            fields.insert("priority".to_string(), json!({ "name": priority }));
        }
        if let Some(assignee) = &self.assignee {
            fields.insert("assignee".to_string(), json!({ "name": assignee }));
        }
        if !self.labels.is_empty() {
            fields.insert("labels".to_string(), json!(self.labels));
        }
        if !self.components.is_empty() {
            let components: Vec<Value> = self
                .components
                .iter()
                .map(|name| json!({ "name": name }))
                .collect();
            fields.insert("components".to_string(), Value::Array(components));
        }
        fields
    }
}

impl Serialize for NewIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("fields", &self.fields_object())?;
        map.end()
    }
}

/// Version creation payload, body of `POST /rest/api/2/version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion {
    pub name: String,
    /// Key of the owning project.
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub released: bool,
    pub archived: bool,
    /// Release date as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl NewVersion {
    pub fn new(project_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: project_key.into(),
            description: None,
            released: false,
            archived: false,
            release_date: None,
        }
    }
}
