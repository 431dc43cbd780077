use std::sync::Arc;

use anyhow::anyhow;
use emqam_auth::call_blocking;
use emqam_core::AppError;
use emqam_models::Credentials;
use tracing::{info, instrument};

use crate::metrics::track_login;
use crate::state::AppState;

use super::model::LoginResponse;

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(state: &AppState, credentials: Credentials) -> Result<LoginResponse, AppError> {
        if !credentials.is_complete() {
            return Err(AppError::bad_request(anyhow!(
                "username and password are required"
            )));
        }

        let verifier = Arc::clone(&state.credentials);
        let user = call_blocking(state.store_timeout(), move || verifier.verify(&credentials))
            .await
            .map_err(AppError::store)?;

        let Some(user) = user else {
            track_login(false);
            return Err(AppError::unauthorized("Invalid username or password"));
        };

        let issuer = Arc::clone(&state.sessions);
        let user_id = user.id;
        let access_token = call_blocking(state.store_timeout(), move || {
            issuer.open_session(&user_id)
        })
        .await
        .map_err(AppError::store)?;

        track_login(true);
        info!(user_id = %user.id, "user logged in");

        Ok(LoginResponse {
            user_id: user.id,
            username: user.username,
            access_token,
        })
    }
}
