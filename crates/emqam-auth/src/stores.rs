//! External collaborators consulted by the pipeline and the handlers.
//!
//! All store traits are synchronous: an implementation performs a blocking
//! round-trip to whatever backs it. Async callers go through
//! [`call_blocking`], which moves the call onto tokio's blocking pool and
//! bounds it with a timeout so a stuck store surfaces as an error instead of
//! a hung request.

use emqam_models::{AclRequest, Credentials, TopicDirection, UserId, UserRecord};
use std::time::Duration;

use crate::identity::SessionToken;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("conflicting entry: {0}")]
    Conflict(String),
}

/// Session store: is `(user_id, access_token)` an active session?
pub trait SessionValidator: Send + Sync {
    fn find_session(&self, token: &SessionToken) -> Result<bool, StoreError>;
}

/// User directory: role flags for a user.
pub trait RoleEvaluator: Send + Sync {
    fn find_user(&self, user_id: &UserId) -> Result<Option<UserRecord>, StoreError>;
}

/// User directory: password check for login.
pub trait CredentialVerifier: Send + Sync {
    /// The matching user, or `None` when the username is unknown or the
    /// password is wrong.
    fn verify(&self, credentials: &Credentials) -> Result<Option<UserRecord>, StoreError>;
}

/// Session store: open a session after a successful login and close it on
/// logout.
pub trait SessionIssuer: Send + Sync {
    /// Returns the new access token.
    fn open_session(&self, user_id: &UserId) -> Result<String, StoreError>;

    /// Returns whether the session existed.
    fn close_session(&self, token: &SessionToken) -> Result<bool, StoreError>;
}

/// Persistence for ACL grants.
pub trait AclStore: Send + Sync {
    /// Store a grant, replacing any grant for the same user and topic.
    fn grant(&self, request: &AclRequest) -> Result<(), StoreError>;

    /// Whether some grant lets `user` act on `topic` in `direction`.
    fn is_permitted(
        &self,
        user: &str,
        topic: &str,
        direction: TopicDirection,
    ) -> Result<bool, StoreError>;

    fn grants_for(&self, user: &str) -> Result<Vec<AclRequest>, StoreError>;
}

/// Run a blocking store call on the blocking pool, giving up after `timeout`.
///
/// A timed-out call keeps running on its thread; only the caller stops
/// waiting for it.
pub async fn call_blocking<T, F>(timeout: Duration, call: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(call)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(StoreError::Unavailable(format!(
            "store task failed: {join_error}"
        ))),
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_blocking_returns_value() {
        let result = call_blocking(Duration::from_secs(1), || Ok::<_, StoreError>(7)).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_call_blocking_passes_store_errors_through() {
        let result = call_blocking(Duration::from_secs(1), || {
            Err::<(), _>(StoreError::Unavailable("down".to_string()))
        })
        .await;
        assert_eq!(result, Err(StoreError::Unavailable("down".to_string())));
    }

    #[tokio::test]
    async fn test_call_blocking_times_out() {
        let timeout = Duration::from_millis(20);
        let result = call_blocking(timeout, || {
            std::thread::sleep(Duration::from_millis(300));
            Ok::<_, StoreError>(())
        })
        .await;
        assert_eq!(result, Err(StoreError::Timeout(timeout)));
    }

    #[tokio::test]
    async fn test_call_blocking_reports_panicking_store() {
        let result: Result<(), StoreError> =
            call_blocking(Duration::from_secs(1), || panic!("store bug")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
