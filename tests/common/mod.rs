#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use emqam::router::init_router;
use emqam::state::AppState;
use emqam_auth::{MemoryStore, SessionIssuer};
use emqam_config::{CorsConfig, SecurityConfig};
use emqam_models::{RoleFlags, UserId};
use http_body_util::BodyExt;
use uuid::Uuid;

pub const APP_KEY: &str = "test-app-key";
pub const APP_SECRET: &str = "test-app-secret";
pub const PASSWORD: &str = "s3cret";

pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub access_token: String,
}

pub fn test_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_hash_cost(4))
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::in_memory(
        SecurityConfig::new(APP_KEY, APP_SECRET),
        store,
        Duration::from_secs(2),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    )
}

pub fn setup_test_app() -> (Router, Arc<MemoryStore>) {
    let store = test_store();
    (init_router(test_state(store.clone())), store)
}

pub fn unique_username() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

/// Register a user with [`PASSWORD`] and open a session for them.
pub fn create_logged_in_user(store: &MemoryStore, roles: RoleFlags) -> TestUser {
    let username = unique_username();
    let user = store.add_user(&username, PASSWORD, roles).unwrap();
    let access_token = store.open_session(&user.id).unwrap();

    TestUser {
        id: user.id,
        username,
        access_token,
    }
}

/// Request carrying the configured application key and secret.
pub fn app_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("app_key", APP_KEY)
        .header("app_secret", APP_SECRET)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Request carrying `user`'s session headers.
pub fn session_request(method: &str, uri: &str, user: &TestUser, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("user_id", user.id.to_string())
        .header("access_token", &user.access_token)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
