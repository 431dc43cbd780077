//! Application-level credentials.
//!
//! The broker (or any trusted caller) authenticates itself with a static
//! application key and secret sent in the `app_key` / `app_secret` headers.
//! The expected values come from:
//!
//! - `SECURITY_KEY`: application key (no default)
//! - `SECURITY_SECRET`: application secret (no default)
//!
//! When either value is empty the application tier rejects every request.

use crate::env::{process_env, string_or};

#[derive(Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    pub app_key: String,
    pub app_secret: String,
}

impl SecurityConfig {
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            app_key: string_or(&lookup, "SECURITY_KEY", ""),
            app_secret: string_or(&lookup, "SECURITY_SECRET", ""),
        }
    }

    /// Both values are set. An unconfigured pair never matches anything.
    pub fn is_configured(&self) -> bool {
        !self.app_key.is_empty() && !self.app_secret.is_empty()
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}
