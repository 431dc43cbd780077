use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};
use emqam_auth::{RequestIdentity, SessionToken};
use emqam_core::AppError;
use emqam_models::UserId;

/// Identity fields carried in the request headers. Values that are not
/// visible ASCII count as missing.
pub fn identity_from_headers(headers: &HeaderMap) -> RequestIdentity {
    RequestIdentity::from_lookup(|name| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    })
}

/// The caller of a session-gated route.
///
/// Only meaningful behind a Session, Member or Admin guard, which has
/// already confirmed the session with the store.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionToken);

impl SessionUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity_from_headers(&parts.headers)
            .session_token()
            .map(SessionUser)
            .map_err(AppError::bad_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_identity_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("app_key", HeaderValue::from_static("key"));
        headers.insert("app_secret", HeaderValue::from_static("secret"));
        headers.insert("user_id", HeaderValue::from_static("507f1f77bcf86cd799439011"));
        headers.insert("access_token", HeaderValue::from_static(""));

        let identity = identity_from_headers(&headers);
        assert_eq!(identity.app_key.as_deref(), Some("key"));
        assert_eq!(identity.app_secret.as_deref(), Some("secret"));
        assert_eq!(identity.user_id.as_deref(), Some("507f1f77bcf86cd799439011"));
        assert_eq!(identity.access_token, None);
    }
}
