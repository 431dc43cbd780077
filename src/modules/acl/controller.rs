use axum::extract::State;
use emqam_core::{ApiResponse, AppError};
use emqam_models::AclRequest;
use tracing::instrument;

use crate::middleware::identity::SessionUser;
use crate::state::AppState;
use crate::validator::ValidatedForm;

use super::service::AclService;

#[instrument(skip_all, fields(user_id = %user.user_id()))]
pub async fn list_grants(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<ApiResponse<Vec<AclRequest>>, AppError> {
    let grants = AclService::grants_for_user(&state, user.user_id()).await?;
    Ok(ApiResponse::ok(grants))
}

/// Body: `username=<user>&access=<publish|subscribe|pubsub>&topic=<filter>`.
#[instrument(skip_all)]
pub async fn create_grant(
    State(state): State<AppState>,
    ValidatedForm(request): ValidatedForm<AclRequest>,
) -> Result<ApiResponse<AclRequest>, AppError> {
    let grant = AclService::create_grant(&state, request).await?;
    Ok(ApiResponse::created(grant))
}
