use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{authenticate_client, check_acl};

pub fn init_mqtt_router() -> Router<AppState> {
    Router::new()
        .route("/auth", post(authenticate_client))
        .route("/acl", post(check_acl))
}
