use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::tiers::{require_admin, require_member};
use crate::state::AppState;

use super::controller::{create_grant, list_grants};

/// Reading and writing grants sit behind different tiers, so each method
/// carries its own guard.
pub fn init_acl_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_grants)
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_member,
            ))
            .merge(
                post(create_grant)
                    .route_layer(middleware::from_fn_with_state(state, require_admin)),
            ),
    )
}
