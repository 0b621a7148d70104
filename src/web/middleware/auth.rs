//! Cookie session authentication middleware.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::{TokenClaims, TokenService};
use crate::web::error::ApiError;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Outcome of inspecting a request for a session token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenState {
    /// No `token` cookie was sent.
    Missing,
    /// A cookie was sent but failed verification.
    Invalid,
    /// The token verified.
    Valid(TokenClaims),
}

impl TokenState {
    /// Inspect the `token` cookie of a request.
    pub fn from_parts(parts: &Parts, tokens: &TokenService) -> Self {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(TOKEN_COOKIE) else {
            return TokenState::Missing;
        };

        match tokens.verify(cookie.value()) {
            Ok(claims) => TokenState::Valid(claims),
            Err(e) => {
                tracing::debug!("Session token rejected: {}", e);
                TokenState::Invalid
            }
        }
    }
}

/// Extractor for authenticated users.
///
/// Handlers taking this extractor are only invoked for requests carrying a
/// valid session cookie. Everything else is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub claims: TokenClaims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Token service comes from extensions (set by middleware)
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .ok_or_else(|| ApiError::internal("Token service not configured"))?;

        match TokenState::from_parts(parts, tokens) {
            TokenState::Valid(claims) => Ok(AuthUser {
                user_id: claims.sub,
                claims,
            }),
            TokenState::Missing => Err(ApiError::unauthorized("Authentication required")),
            TokenState::Invalid => Err(ApiError::unauthorized("Invalid or expired token")),
        }
    }
}

/// Optional authentication extractor.
///
/// Similar to AuthUser but never rejects.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(tokens) = parts.extensions.get::<Arc<TokenService>>() else {
            return Ok(OptionalAuthUser(None));
        };

        match TokenState::from_parts(parts, tokens) {
            TokenState::Valid(claims) => Ok(OptionalAuthUser(Some(AuthUser {
                user_id: claims.sub,
                claims,
            }))),
            TokenState::Missing | TokenState::Invalid => Ok(OptionalAuthUser(None)),
        }
    }
}

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: String, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    let max_age = i64::try_from(max_age_secs).unwrap_or(i64::MAX);

    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Cookie used to remove the session cookie.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, "")).path("/").build()
}

/// Middleware function to inject the token service into request extensions.
pub async fn inject_token_service(
    tokens: Arc<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}
