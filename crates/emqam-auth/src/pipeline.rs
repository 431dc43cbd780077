//! The authorization pipeline.
//!
//! [`AuthorizationPipeline::authorize`] runs exactly one tier for a request
//! and reduces it to an [`AuthorizationOutcome`]. The first failing check is
//! terminal; nothing after it runs.
//!
//! Session-gated tiers share one path: parse the session token, confirm it
//! with the session store, then (Member/Admin only) resolve the user's role
//! flags from the directory and test them against the tier's
//! [`RoleRequirement`]. Nothing is cached between requests.

use emqam_config::SecurityConfig;
use emqam_models::{UserId, UserRecord};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::error::{AuthError, Stage};
use crate::identity::{RequestIdentity, SessionToken};
use crate::stores::{RoleEvaluator, SessionValidator, call_blocking};
use crate::tier::{AuthorizationOutcome, RoleRequirement, Tier};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct AuthorizationPipeline {
    security: SecurityConfig,
    sessions: Arc<dyn SessionValidator>,
    directory: Arc<dyn RoleEvaluator>,
    store_timeout: Duration,
}

impl AuthorizationPipeline {
    pub fn new(
        security: SecurityConfig,
        sessions: Arc<dyn SessionValidator>,
        directory: Arc<dyn RoleEvaluator>,
    ) -> Self {
        Self {
            security,
            sessions,
            directory,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    /// Run `tier` and reduce the result to an outcome, logging the cause of
    /// any rejection.
    #[instrument(skip_all, fields(tier = %tier))]
    pub async fn authorize(&self, tier: Tier, identity: &RequestIdentity) -> AuthorizationOutcome {
        match self.evaluate(tier, identity).await {
            Ok(()) => {
                debug!("request authorized");
                AuthorizationOutcome::Allowed
            }
            Err(err) => {
                let outcome = err.outcome();
                match &err {
                    AuthError::ExternalStoreFailure { .. } => {
                        error!(error = %err, status = outcome.status_code(), "authorization store failure")
                    }
                    _ => warn!(
                        reason = err.kind(),
                        error = %err,
                        status = outcome.status_code(),
                        "request rejected"
                    ),
                }
                outcome
            }
        }
    }

    /// Run `tier`, keeping the precise failure.
    pub async fn evaluate(&self, tier: Tier, identity: &RequestIdentity) -> Result<(), AuthError> {
        if !tier.requires_session() {
            return self.check_application(identity);
        }

        let token = self.check_session(identity).await?;
        if let Some(requirement) = tier.role_requirement() {
            self.check_role(&token.user_id, requirement).await?;
        }
        Ok(())
    }

    /// Application tier: presented key and secret equal the configured ones.
    pub fn check_application(&self, identity: &RequestIdentity) -> Result<(), AuthError> {
        if !self.security.is_configured() {
            return Err(AuthError::UnknownApplication);
        }

        let (Some(key), Some(secret)) = (&identity.app_key, &identity.app_secret) else {
            return Err(AuthError::UnknownApplication);
        };

        // Evaluate both comparisons before combining them.
        let key_matches = digest_eq(key, &self.security.app_key);
        let secret_matches = digest_eq(secret, &self.security.app_secret);
        if key_matches & secret_matches {
            Ok(())
        } else {
            Err(AuthError::UnknownApplication)
        }
    }

    /// Session tier: well-formed token that the session store confirms.
    pub async fn check_session(
        &self,
        identity: &RequestIdentity,
    ) -> Result<SessionToken, AuthError> {
        let token = identity.session_token()?;

        let sessions = Arc::clone(&self.sessions);
        let lookup = token.clone();
        let active = call_blocking(self.store_timeout, move || sessions.find_session(&lookup))
            .await
            .map_err(|source| AuthError::ExternalStoreFailure {
                stage: Stage::Session,
                source,
            })?;

        if active {
            Ok(token)
        } else {
            Err(AuthError::NoActiveSession(token.user_id))
        }
    }

    /// Role check for a user whose session is already confirmed. A user the
    /// directory does not know has no roles.
    pub async fn check_role(
        &self,
        user_id: &UserId,
        requirement: RoleRequirement,
    ) -> Result<UserRecord, AuthError> {
        let directory = Arc::clone(&self.directory);
        let lookup = *user_id;
        let user = call_blocking(self.store_timeout, move || directory.find_user(&lookup))
            .await
            .map_err(|source| AuthError::ExternalStoreFailure {
                stage: Stage::Role,
                source,
            })?;

        match user {
            Some(user) if requirement.is_satisfied_by(&user.roles) => Ok(user),
            _ => Err(AuthError::InsufficientRole {
                user_id: *user_id,
                required: requirement,
            }),
        }
    }
}

impl std::fmt::Debug for AuthorizationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationPipeline")
            .field("security", &self.security)
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

/// Compare fixed-length digests so the time taken does not depend on how
/// much of the presented value matches.
fn digest_eq(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}
