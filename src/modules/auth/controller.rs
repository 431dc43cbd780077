use axum::extract::State;
use emqam_core::{ApiResponse, AppError};
use emqam_models::Credentials;
use tracing::instrument;

use crate::state::AppState;
use crate::validator::FormPayload;

use super::model::LoginResponse;
use super::service::AuthService;

/// Exchange `username=..&password=..` for a session.
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    FormPayload(credentials): FormPayload<Credentials>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let session = AuthService::login(&state, credentials).await?;
    Ok(ApiResponse::ok(session))
}
