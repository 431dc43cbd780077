use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{current_session, end_session};

pub fn init_session_router() -> Router<AppState> {
    Router::new().route("/", get(current_session).delete(end_session))
}
