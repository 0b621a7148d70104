//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use validator::Validate;

use super::{found, AppState, ADMIN_LAYOUT};
use crate::db::UserRepository;
use crate::web::dto::{ApiResponse, CredentialsForm, FormOrJson, UserInfo};
use crate::web::error::ApiError;
use crate::web::middleware::{removal_cookie, session_cookie, AuthUser, OptionalAuthUser};

/// GET /admin - Login form.
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> Result<Html<String>, ApiError> {
    let context = state
        .page_context("Admin")
        .with("logged_in", user.is_some());
    state.render(ADMIN_LAYOUT, "admin/login", &context)
}

/// POST /admin - Log in and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    FormOrJson(form): FormOrJson<CredentialsForm>,
) -> Result<(CookieJar, Response), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = crate::auth::authenticate(&repo, &form.username, &form.password)
        .await
        .map_err(|e| match e {
            crate::BlogError::Auth(_) => ApiError::unauthorized("Invalid username or password"),
            other => other.into(),
        })?;

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        ApiError::internal("Failed to create session")
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    let cookie = session_cookie(token, state.tokens.expiry_secs(), state.cookie_secure);
    Ok((jar.add(cookie), found("/dashboard")))
}

/// POST /register - Create an admin account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    FormOrJson(form): FormOrJson<CredentialsForm>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    form.validate()
        .map_err(ApiError::bad_request_from_validation)?;

    let repo = UserRepository::new(state.db.pool());
    let user =
        crate::auth::register(&repo, &form.username, &form.password, &state.hash_cost).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(UserInfo::from(&user))),
    ))
}

/// GET /logout - Clear the session cookie.
///
/// Tokens are not revoked server-side; a copied token stays valid until it
/// expires.
pub async fn logout(user: AuthUser, jar: CookieJar) -> (CookieJar, Response) {
    tracing::info!(user_id = user.user_id, "User logged out");
    (jar.remove(removal_cookie()), found("/admin"))
}
