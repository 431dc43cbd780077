use axum::extract::State;
use emqam_core::{ApiResponse, AppError};
use emqam_models::{AclRequest, Credentials};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::{FormPayload, ValidatedForm};

use super::service::MqttService;

/// Broker auth callback: 200 when the credentials verify, 401 otherwise.
#[instrument(skip_all)]
pub async fn authenticate_client(
    State(state): State<AppState>,
    FormPayload(credentials): FormPayload<Credentials>,
) -> Result<ApiResponse, AppError> {
    if MqttService::authenticate(&state, credentials).await? {
        Ok(ApiResponse::status(200))
    } else {
        Err(AppError::unauthorized("Invalid username or password"))
    }
}

/// Broker ACL callback: 200 when a grant covers the request, 403 otherwise.
#[instrument(skip_all)]
pub async fn check_acl(
    State(state): State<AppState>,
    ValidatedForm(request): ValidatedForm<AclRequest>,
) -> Result<ApiResponse, AppError> {
    if MqttService::check_acl(&state, request).await? {
        Ok(ApiResponse::status(200))
    } else {
        Err(AppError::forbidden("Topic access denied"))
    }
}
