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

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    MalformedSubject,
}

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            role: claims.role.parse().ok()?,
            email: claims.email,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT bearer authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            return auth_error_response(AuthError::InvalidToken);
        }
    };

    let Some(user) = AuthenticatedUser::from_claims(claims) else {
        return auth_error_response(AuthError::MalformedSubject);
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::MalformedSubject => "Token does not identify a user",
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infrastructure::crypto::jwt::create_token;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use tower::Service;

    fn jwt() -> JwtConfig {
        JwtConfig::new("test-secret", 1)
    }

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        format!("{}:{}", user.user_id, user.role.as_str())
    }

    async fn call(auth: Option<String>) -> Response {
        let state = AuthState { jwt_config: jwt() };
        let mut svc = Router::new()
            .route("/me", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
            .into_service();

        let mut req = Request::builder().uri("/me");
        if let Some(value) = auth {
            req = req.header(header::AUTHORIZATION, value);
        }
        svc.call(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        assert_eq!(call(None).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_401() {
        let resp = call(Some("Bearer not-a-jwt".into())).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let resp = call(Some("Basic abc".into())).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let mut user = User::new_customer("carol@example.com", "Carol");
        user.id = 7;
        let token = create_token(&user, &jwt()).unwrap();

        let resp = call(Some(format!("Bearer {}", token))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"7:CUSTOMER");
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_401() {
        let mut user = User::new_customer("dan@example.com", "Dan");
        user.id = 3;
        let token = create_token(&user, &JwtConfig::new("other", 1)).unwrap();
        let resp = call(Some(format!("Bearer {}", token))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
