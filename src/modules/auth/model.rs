use emqam_models::UserId;
use serde::Serialize;

/// Returned by a successful login. The client presents `user_id` and
/// `access_token` as headers on session-gated routes.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: UserId,
    pub username: String,
    pub access_token: String,
}
