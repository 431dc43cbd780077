//! Tier guards for Axum routes.
//!
//! Each guard runs one [`Tier`] of the authorization pipeline against the
//! request headers. An allowed request is forwarded untouched; any other
//! outcome ends the request with the outcome's status in the response
//! envelope and the wrapped handler never runs.
//!
//! # Usage with axum::middleware::from_fn_with_state
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::tiers::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/acl", post(create_grant))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use emqam_auth::{AuthorizationOutcome, Tier};
use emqam_core::ApiResponse;

use crate::metrics::track_authorization;
use crate::middleware::identity::identity_from_headers;
use crate::state::AppState;

/// Application key and secret must match the configured pair.
pub async fn require_application(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(Tier::Application, &state, req, next).await
}

/// Caller must hold an active session.
pub async fn require_session(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(Tier::Session, &state, req, next).await
}

/// Active session whose user is a member or an admin.
pub async fn require_member(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(Tier::Member, &state, req, next).await
}

/// Active session whose user is an admin.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(Tier::Admin, &state, req, next).await
}

async fn guard(tier: Tier, state: &AppState, req: Request, next: Next) -> Response {
    let identity = identity_from_headers(req.headers());
    let outcome = state.pipeline.authorize(tier, &identity).await;
    track_authorization(tier, outcome);

    if outcome.is_allowed() {
        return next.run(req).await;
    }

    ApiResponse::<()>::status(outcome.status_code())
        .with_details(rejection_details(tier, outcome))
        .into_response()
}

/// Client-facing explanation. Never says which lookup failed or why.
fn rejection_details(tier: Tier, outcome: AuthorizationOutcome) -> &'static str {
    match (tier, outcome) {
        (Tier::Application, _) => "Application credentials missing or invalid.",
        (_, AuthorizationOutcome::BadRequest) => "Malformed session credentials.",
        (_, AuthorizationOutcome::Unauthorized) => "No active session.",
        (_, AuthorizationOutcome::Forbidden) => "Insufficient role.",
        (_, AuthorizationOutcome::Allowed) => "",
    }
}
