use std::sync::Arc;

use emqam_auth::call_blocking;
use emqam_core::AppError;
use emqam_models::{AclRequest, Credentials};
use tracing::{debug, instrument};

use crate::metrics::{track_broker_acl, track_broker_auth};
use crate::state::AppState;

pub struct MqttService;

impl MqttService {
    /// Whether the broker should accept a client connecting with
    /// `credentials`. Incomplete credentials are denied without a lookup.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn authenticate(state: &AppState, credentials: Credentials) -> Result<bool, AppError> {
        if !credentials.is_complete() {
            track_broker_auth(false);
            return Ok(false);
        }

        let verifier = Arc::clone(&state.credentials);
        let user = call_blocking(state.store_timeout(), move || verifier.verify(&credentials))
            .await
            .map_err(AppError::store)?;

        let allowed = user.is_some();
        track_broker_auth(allowed);
        debug!(allowed, "broker authentication");
        Ok(allowed)
    }

    /// Whether some stored grant covers the requested topic and direction.
    /// Expects a validated request.
    #[instrument(skip_all, fields(user = %request.user_id, topic = %request.topic))]
    pub async fn check_acl(state: &AppState, request: AclRequest) -> Result<bool, AppError> {
        let Some(direction) = request.access else {
            return Ok(false);
        };

        let acl = Arc::clone(&state.acl);
        let allowed = call_blocking(state.store_timeout(), move || {
            acl.is_permitted(&request.user_id, &request.topic, direction)
        })
        .await
        .map_err(AppError::store)?;

        track_broker_acl(direction, allowed);
        debug!(%direction, allowed, "broker acl check");
        Ok(allowed)
    }
}
