use std::sync::Arc;

use anyhow::anyhow;
use emqam_auth::call_blocking;
use emqam_core::AppError;
use emqam_models::{AclRequest, UserId};
use tracing::{info, instrument};

use crate::metrics::track_grant_created;
use crate::state::AppState;

pub struct AclService;

impl AclService {
    /// Grants held by the user behind `user_id`. Grants are keyed by
    /// username, so the user is resolved through the directory first.
    #[instrument(skip(state))]
    pub async fn grants_for_user(
        state: &AppState,
        user_id: UserId,
    ) -> Result<Vec<AclRequest>, AppError> {
        let directory = Arc::clone(&state.directory);
        let user = call_blocking(state.store_timeout(), move || directory.find_user(&user_id))
            .await
            .map_err(AppError::store)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let acl = Arc::clone(&state.acl);
        call_blocking(state.store_timeout(), move || acl.grants_for(&user.username))
            .await
            .map_err(AppError::store)
    }

    /// Store a validated grant, replacing any grant for the same user and
    /// topic.
    #[instrument(skip_all, fields(user = %request.user_id, topic = %request.topic))]
    pub async fn create_grant(state: &AppState, request: AclRequest) -> Result<AclRequest, AppError> {
        let acl = Arc::clone(&state.acl);
        let grant = request.clone();
        call_blocking(state.store_timeout(), move || acl.grant(&grant))
            .await
            .map_err(AppError::store)?;

        if let Some(direction) = request.access {
            track_grant_created(direction);
            info!(%direction, "grant stored");
        }
        Ok(request)
    }
}
