use std::sync::Arc;

use axum::extract::State;
use emqam_auth::call_blocking;
use emqam_core::{ApiResponse, AppError};
use tracing::{info, instrument};

use crate::middleware::identity::SessionUser;
use crate::state::AppState;

use super::model::SessionInfo;

#[instrument(skip_all, fields(user_id = %user.user_id()))]
pub async fn current_session(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<ApiResponse<SessionInfo>, AppError> {
    let directory = Arc::clone(&state.directory);
    let user_id = user.user_id();
    let record = call_blocking(state.store_timeout(), move || directory.find_user(&user_id))
        .await
        .map_err(AppError::store)?;

    Ok(ApiResponse::ok(SessionInfo {
        user_id,
        username: record.as_ref().map(|r| r.username.clone()),
        roles: record.map(|r| r.roles).unwrap_or_default(),
    }))
}

/// Logout: close the caller's session. Later requests with the same token
/// fail the session tier.
#[instrument(skip_all, fields(user_id = %user.user_id()))]
pub async fn end_session(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<ApiResponse, AppError> {
    let issuer = Arc::clone(&state.sessions);
    let token = user.0;
    call_blocking(state.store_timeout(), move || issuer.close_session(&token))
        .await
        .map_err(AppError::store)?;

    info!("user logged out");
    Ok(ApiResponse::status(200).with_details("Logged out."))
}
