use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::tiers::{require_application, require_session};
use crate::modules::acl::router::init_acl_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::mqtt::router::init_mqtt_router;
use crate::modules::session::router::init_session_router;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::{Router, middleware};
use emqam_auth::identity::{ACCESS_TOKEN, APP_KEY, APP_SECRET, USER_ID};
use tower_http::cors::CorsLayer;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_application,
                    )),
                )
                .nest(
                    "/mqtt",
                    init_mqtt_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_application,
                    )),
                )
                .nest(
                    "/session",
                    init_session_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_session,
                    )),
                )
                .nest("/acl", init_acl_router(state.clone())),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    HeaderName::from_static(APP_KEY),
                    HeaderName::from_static(APP_SECRET),
                    HeaderName::from_static(ACCESS_TOKEN),
                    HeaderName::from_static(USER_ID),
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
