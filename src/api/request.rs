//! Request descriptors handed to a [`Transport`](super::Transport).

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::Result;

/// A single HTTP request against the JIRA API.
///
/// Built fresh for every operation and consumed by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, e.g. `/rest/api/2/issue/PROJ-1`.
    pub path: String,
    /// Query parameters in insertion order. Duplicate keys are allowed.
    pub params: Vec<(String, String)>,
    /// JSON request body.
    pub body: Option<Value>,
}

impl Request {
    /// Create a request with no parameters and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append the `fields` restriction when any fields were requested.
    pub fn fields(self, fields: &[&str]) -> Self {
        if fields.is_empty() {
            self
        } else {
            self.param("fields", fields.join(","))
        }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Serialize` if the body cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Get the first value of a parameter.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_keep_order_and_duplicates() {
        let request = Request::get("/rest/api/2/search")
            .param("jql", "project=PROJ")
            .param("expand", "names")
            .param("expand", "schema");

        assert_eq!(
            request.params,
            vec![
                ("jql".to_string(), "project=PROJ".to_string()),
                ("expand".to_string(), "names".to_string()),
                ("expand".to_string(), "schema".to_string()),
            ]
        );
        assert_eq!(request.param_value("expand"), Some("names"));
    }

    #[test]
    fn test_fields_joined_with_commas() {
        let request = Request::get("/x").fields(&["summary", "status"]);
        assert_eq!(request.param_value("fields"), Some("summary,status"));
    }

    #[test]
    fn test_empty_fields_add_nothing() {
        let request = Request::get("/x").fields(&[]);
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_json_body() {
        let request = Request::post("/x").json(&json!({"body": "hi"})).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({"body": "hi"})));
    }
}
