//! Identity presented with a request.
//!
//! The transport hands over four metadata fields, named exactly
//! [`APP_KEY`], [`APP_SECRET`], [`ACCESS_TOKEN`] and [`USER_ID`]. An empty
//! value is treated as absent.

use emqam_models::UserId;

use crate::error::AuthError;

pub const APP_KEY: &str = "app_key";
pub const APP_SECRET: &str = "app_secret";
pub const ACCESS_TOKEN: &str = "access_token";
pub const USER_ID: &str = "user_id";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestIdentity {
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

impl RequestIdentity {
    /// Build from any metadata source keyed by field name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let field = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            app_key: field(APP_KEY),
            app_secret: field(APP_SECRET),
            access_token: field(ACCESS_TOKEN),
            user_id: field(USER_ID),
        }
    }

    pub fn with_app(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self.app_secret = Some(secret.into());
        self
    }

    pub fn with_session(mut self, user_id: impl Into<String>, token: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.access_token = Some(token.into());
        self
    }

    /// Syntactic session check: both fields present, `user_id` well formed.
    /// No store is consulted.
    pub fn session_token(&self) -> Result<SessionToken, AuthError> {
        let raw_id = self
            .user_id
            .as_deref()
            .ok_or(AuthError::MalformedIdentity("missing user_id"))?;
        let access_token = self
            .access_token
            .clone()
            .ok_or(AuthError::MalformedIdentity("missing access_token"))?;
        let user_id = raw_id
            .parse()
            .map_err(|_| AuthError::MalformedIdentity("invalid user_id"))?;

        Ok(SessionToken {
            user_id,
            access_token,
        })
    }
}

impl std::fmt::Debug for RequestIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestIdentity")
            .field("app_key", &self.app_key)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// `(user_id, access_token)` pair proving a login. Only meaningful once the
/// session store has confirmed it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken {
    pub user_id: UserId,
    pub access_token: String,
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ID: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn test_from_lookup_drops_empty_values() {
        let fields = HashMap::from([(APP_KEY, "key"), (APP_SECRET, ""), (USER_ID, ID)]);
        let identity = RequestIdentity::from_lookup(|k| fields.get(k).map(|v| v.to_string()));

        assert_eq!(identity.app_key.as_deref(), Some("key"));
        assert_eq!(identity.app_secret, None);
        assert_eq!(identity.access_token, None);
        assert_eq!(identity.user_id.as_deref(), Some(ID));
    }

    #[test]
    fn test_session_token() {
        let token = RequestIdentity::default()
            .with_session(ID, "tok")
            .session_token()
            .unwrap();
        assert_eq!(token.user_id.to_string(), ID);
        assert_eq!(token.access_token, "tok");
    }

    #[test]
    fn test_session_token_rejects_missing_or_invalid_fields() {
        let cases = [
            RequestIdentity::default(),
            RequestIdentity {
                user_id: Some(ID.to_string()),
                ..Default::default()
            },
            RequestIdentity {
                access_token: Some("tok".to_string()),
                ..Default::default()
            },
            RequestIdentity::default().with_session("alice", "tok"),
        ];

        for identity in cases {
            assert!(matches!(
                identity.session_token(),
                Err(AuthError::MalformedIdentity(_))
            ));
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let identity = RequestIdentity::default()
            .with_app("key", "hunter2")
            .with_session(ID, "tok-123");
        let rendered = format!("{identity:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("tok-123"));
    }
}
