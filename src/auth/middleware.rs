//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::jwt::{verify_token, AuthError, JwtConfig};

/// Authentication state shared with the middleware layers
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires valid token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let Some(identity) = claims.identity() else {
                return auth_error_response(AuthError::InvalidToken);
            };

            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Optional authentication middleware - allows unauthenticated requests.
///
/// A valid token attaches a `CustomerIdentity` extension; anything else
/// (missing header, bad token, expired token) passes through anonymously.
pub async fn optional_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = extract_token(auth_header) {
            if let Ok(claims) = verify_token(token, &auth_state.jwt_config) {
                if !claims.is_expired() {
                    if let Some(identity) = claims.identity() {
                        request.extensions_mut().insert(identity);
                    }
                }
            }
        }
    }

    next.run(request).await
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let status = match error {
        AuthError::MissingToken | AuthError::InvalidToken | AuthError::ExpiredToken => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::InvalidCredentials | AuthError::AccountDisabled => StatusCode::UNAUTHORIZED,
    };

    let body = Json(json!({
        "success": false,
        "error": error.to_string()
    }));

    (status, body).into_response()
}
