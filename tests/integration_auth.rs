mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    PASSWORD, app_request, body_json, create_logged_in_user, session_request, setup_test_app,
    unique_username,
};
use emqam_models::RoleFlags;
use tower::ServiceExt;

#[tokio::test]
async fn test_login_success() {
    let (app, store) = setup_test_app();
    let username = unique_username();
    let user = store.add_user(&username, PASSWORD, RoleFlags::MEMBER).unwrap();

    let response = app
        .oneshot(app_request(
            "POST",
            "/api/v1/auth/login",
            &format!("username={username}&password={PASSWORD}"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"]["user_id"], user.id.to_string());
    assert_eq!(body["data"]["username"], username);
    assert!(body["data"]["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_then_use_session() {
    let (app, store) = setup_test_app();
    let username = unique_username();
    store.add_user(&username, PASSWORD, RoleFlags::ADMIN).unwrap();

    let response = app
        .clone()
        .oneshot(app_request(
            "POST",
            "/api/v1/auth/login",
            &format!("username={username}&password={PASSWORD}"),
        ))
        .await
        .unwrap();
    let login = body_json(response).await;
    let user_id = login["data"]["user_id"].as_str().unwrap();
    let access_token = login["data"]["access_token"].as_str().unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/session")
        .header("user_id", user_id)
        .header("access_token", access_token)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["user_id"], user_id);
    assert_eq!(body["data"]["username"], username);
    assert_eq!(body["data"]["roles"]["admin"], true);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let (app, store) = setup_test_app();
    let username = unique_username();
    store.add_user(&username, PASSWORD, RoleFlags::MEMBER).unwrap();

    for body in [
        format!("username={username}&password=wrong"),
        format!("username=nobody&password={PASSWORD}"),
    ] {
        let response = app
            .clone()
            .oneshot(app_request("POST", "/api/v1/auth/login", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_login_requires_application_credentials() {
    let (app, store) = setup_test_app();
    let username = unique_username();
    store.add_user(&username, PASSWORD, RoleFlags::MEMBER).unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header("app_key", "wrong")
        .header("app_secret", "wrong")
        .body(Body::from(format!("username={username}&password={PASSWORD}")))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], 401);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_login_malformed_payload() {
    let (app, _store) = setup_test_app();

    for body in ["username=alice&password", "username=alice&&password=x", "a=b=c"] {
        let response = app
            .clone()
            .oneshot(app_request("POST", "/api/v1/auth/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
    }
}

#[tokio::test]
async fn test_login_incomplete_credentials() {
    let (app, _store) = setup_test_app();

    for body in ["", "username=alice", "password=s3cret"] {
        let response = app
            .clone()
            .oneshot(app_request("POST", "/api/v1/auth/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
    }
}

#[tokio::test]
async fn test_logout_closes_session() {
    let (app, store) = setup_test_app();
    let user = create_logged_in_user(&store, RoleFlags::MEMBER);

    let response = app
        .clone()
        .oneshot(session_request("DELETE", "/api/v1/session", &user, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["details"], "Logged out.");

    let response = app
        .clone()
        .oneshot(session_request("GET", "/api/v1/session", &user, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(session_request("DELETE", "/api/v1/session", &user, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
