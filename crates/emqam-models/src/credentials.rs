//! Login credentials.

use crate::payload::{FormRecord, ParseError};

/// Raw login input. Created per request and never persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields were supplied.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl FormRecord for Credentials {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        match key {
            "username" => self.username = value.to_string(),
            "password" => self.password = value.to_string(),
            _ => {}
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
