//! Authorization failures.
//!
//! Every variant is resolved by the tier that raised it into an
//! [`AuthorizationOutcome`]. Callers only ever see the status code; the
//! variant (and its source) is kept for logs.

use emqam_models::UserId;
use std::fmt;

use crate::stores::StoreError;
use crate::tier::{AuthorizationOutcome, RoleRequirement};

/// Which lookup an external store failure interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Session,
    Role,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => f.write_str("session"),
            Self::Role => f.write_str("role"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// `user_id` or `access_token` missing, or `user_id` not an identifier.
    #[error("malformed identity: {0}")]
    MalformedIdentity(&'static str),

    #[error("application key or secret does not match")]
    UnknownApplication,

    #[error("no active session for user {0}")]
    NoActiveSession(UserId),

    #[error("user {user_id} does not satisfy the {required} role requirement")]
    InsufficientRole {
        user_id: UserId,
        required: RoleRequirement,
    },

    /// The session store or user directory errored or timed out.
    #[error("external store failed during {stage} lookup: {source}")]
    ExternalStoreFailure {
        stage: Stage,
        #[source]
        source: StoreError,
    },
}

impl AuthError {
    /// Terminal outcome for this failure.
    ///
    /// A store failure answers with the status of the check it interrupted,
    /// so an outage looks the same as a genuine rejection from outside.
    pub fn outcome(&self) -> AuthorizationOutcome {
        match self {
            Self::MalformedIdentity(_) => AuthorizationOutcome::BadRequest,
            Self::UnknownApplication | Self::NoActiveSession(_) => AuthorizationOutcome::Unauthorized,
            Self::InsufficientRole { .. } => AuthorizationOutcome::Forbidden,
            Self::ExternalStoreFailure { stage, .. } => match stage {
                Stage::Session => AuthorizationOutcome::Unauthorized,
                Stage::Role => AuthorizationOutcome::Forbidden,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedIdentity(_) => "malformed_identity",
            Self::UnknownApplication => "unknown_application",
            Self::NoActiveSession(_) => "no_active_session",
            Self::InsufficientRole { .. } => "insufficient_role",
            Self::ExternalStoreFailure { .. } => "external_store_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn user() -> UserId {
        "507f1f77bcf86cd799439011".parse().unwrap()
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(
            AuthError::MalformedIdentity("user_id").outcome(),
            AuthorizationOutcome::BadRequest
        );
        assert_eq!(
            AuthError::UnknownApplication.outcome(),
            AuthorizationOutcome::Unauthorized
        );
        assert_eq!(
            AuthError::NoActiveSession(user()).outcome(),
            AuthorizationOutcome::Unauthorized
        );
        assert_eq!(
            AuthError::InsufficientRole {
                user_id: user(),
                required: RoleRequirement::Admin
            }
            .outcome(),
            AuthorizationOutcome::Forbidden
        );
    }

    #[test]
    fn test_store_failure_mirrors_interrupted_stage() {
        let session = AuthError::ExternalStoreFailure {
            stage: Stage::Session,
            source: StoreError::Timeout(Duration::from_millis(5)),
        };
        let role = AuthError::ExternalStoreFailure {
            stage: Stage::Role,
            source: StoreError::Unavailable("down".to_string()),
        };

        assert_eq!(session.outcome(), AuthorizationOutcome::Unauthorized);
        assert_eq!(role.outcome(), AuthorizationOutcome::Forbidden);
        assert_eq!(session.kind(), "external_store_failure");
        assert_ne!(session.kind(), AuthError::NoActiveSession(user()).kind());
    }
}
