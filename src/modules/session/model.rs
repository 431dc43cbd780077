use emqam_models::{RoleFlags, UserId};
use serde::Serialize;

/// The caller of `GET /session`. `username` is absent when the directory
/// no longer knows the user; the session itself is still valid.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub roles: RoleFlags,
}
