//! User directory records.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Role flags held by a user. Admins are not implicitly members; tiers
/// decide what each flag grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleFlags {
    pub member: bool,
    pub admin: bool,
}

impl RoleFlags {
    pub const NONE: RoleFlags = RoleFlags {
        member: false,
        admin: false,
    };
    pub const MEMBER: RoleFlags = RoleFlags {
        member: true,
        admin: false,
    };
    pub const ADMIN: RoleFlags = RoleFlags {
        member: false,
        admin: true,
    };
}

/// A user as owned by the user directory. Read-only to the authorization core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub roles: RoleFlags,
}
