//! Authentication handling for the JIRA API.
//!
//! JIRA accepts HTTP Basic authentication with a username and either the
//! account password or an API token.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Basic authentication credentials for JIRA.
#[derive(Clone)]
pub struct Auth {
    /// The username the credentials belong to.
    username: String,
    /// The complete "Basic ..." authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from a username and password (or API token).
    ///
    /// The secret is encoded immediately and never stored on its own.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            auth_header: build_auth_header(username, password),
        }
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("username", &self.username)
            .field("auth_header", &"Basic <redacted>")
            .finish()
    }
}

/// Encode "username:password" in Base64 and prepend "Basic ".
fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_auth_header() {
        let header = build_auth_header("jdoe", "api_token_here");
        assert!(header.starts_with("Basic "));

        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, "jdoe:api_token_here");
    }

    #[test]
    fn test_auth_new() {
        let auth = Auth::new("jdoe", "secret_token");
        assert_eq!(auth.username(), "jdoe");
        assert_eq!(auth.header_value(), "Basic amRvZTpzZWNyZXRfdG9rZW4=");
    }

    #[test]
    fn test_password_with_colon() {
        let auth = Auth::new("jdoe", "a:b");
        let encoded = auth.header_value().strip_prefix("Basic ").unwrap();
        let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, "jdoe:a:b");
    }

    #[test]
    fn test_auth_does_not_expose_secret() {
        let auth = Auth::new("jdoe", "secret_token");
        let debug_output = format!("{:?}", auth);

        assert!(!debug_output.contains("secret_token"));
        assert!(!debug_output.contains(&auth.header_value()[6..]));
    }
}
