//! Cookie-session login gate.
//!
//! Login issues an opaque UUID token kept in server memory and handed
//! to the client in an HttpOnly cookie. No password hashing or token
//! expiry here — a single-operator tool behind known credentials.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api_error::ApiError;
use crate::response_types::LoginResponse;
use crate::AppState;

const SESSION_COOKIE: &str = "trove_session";

/// Login credentials from configuration.
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if req.username != state.credentials.username || req.password != state.credentials.password {
        tracing::warn!(username = %req.username, "failed login attempt");
        return Err(ApiError::Unauthorized);
    }

    let token = uuid::Uuid::new_v4().to_string();
    state.sessions.write().await.insert(token.clone());

    let cookie = format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax");
    let mut response = Json(LoginResponse { ok: true }).into_response();
    response.headers_mut().insert(
        SET_COOKIE,
        cookie.parse().map_err(|e| ApiError::Internal(anyhow::anyhow!("cookie header: {e}")))?,
    );
    Ok(response)
}

pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.write().await.remove(&token);
    }

    let mut response = Json(LoginResponse { ok: true }).into_response();
    // Expired cookie clears the client side.
    if let Ok(value) =
        format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0").parse()
    {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

/// Middleware guarding all artifact routes.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = session_token(request.headers()) else {
        return Err(ApiError::Unauthorized);
    };
    if !state.sessions.read().await.contains(&token) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_session_token() {
        let headers = headers_with_cookie("trove_session=abc123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn extracts_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; trove_session=abc123; lang=de");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(session_token(&HeaderMap::new()), None);
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token(&headers), None);
    }
}
