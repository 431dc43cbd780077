//! Trust tiers and the outcomes they produce.

use emqam_models::RoleFlags;
use std::fmt;

/// One authorization guard, in increasing order of required trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Caller presents the configured application key and secret.
    Application,
    /// Caller presents an active session.
    Session,
    /// Active session whose user is a member or an admin.
    Member,
    /// Active session whose user is an admin.
    Admin,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Session => "session",
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    /// Whether this tier is gated on a session at all.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Application)
    }

    /// Role predicate evaluated after the session is confirmed.
    pub fn role_requirement(&self) -> Option<RoleRequirement> {
        match self {
            Self::Application | Self::Session => None,
            Self::Member => Some(RoleRequirement::Member),
            Self::Admin => Some(RoleRequirement::Admin),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate over a user's [`RoleFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleRequirement {
    /// Member or admin.
    Member,
    /// Admin only.
    Admin,
}

impl RoleRequirement {
    pub fn is_satisfied_by(&self, roles: &RoleFlags) -> bool {
        match self {
            Self::Member => roles.member || roles.admin,
            Self::Admin => roles.admin,
        }
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => f.write_str("member"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Result of running one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationOutcome {
    Allowed,
    BadRequest,
    Unauthorized,
    Forbidden,
}

impl AuthorizationOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// HTTP status the outcome stands for. `Allowed` forwards, so it maps
    /// to 200 only for reporting.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Allowed => 200,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
        }
    }
}
