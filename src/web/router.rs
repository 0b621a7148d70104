//! Router configuration for the blogpress web layer.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    about, add_post, add_post_page, dashboard, delete_post, edit_post, edit_post_page,
    health_check, home, login, login_page, logout, register, search, show_post, AppState,
};
use super::middleware::{inject_token_service, security_headers};

/// Create the main router.
///
/// When the state names a static directory, it is served for unmatched
/// paths behind the same layers as the routes.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Public blog pages
    let blog_routes = Router::new()
        .route("/", get(home))
        .route("/post/:id", get(show_post))
        .route("/search", post(search))
        .route("/about", get(about));

    // Login and registration (no authentication required)
    let auth_routes = Router::new()
        .route("/admin", get(login_page).post(login))
        .route("/register", post(register));

    // Admin panel (handlers require AuthUser)
    let admin_routes = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add-post", get(add_post_page).post(add_post))
        .route(
            "/edit-post/:id",
            get(edit_post_page).put(edit_post).post(edit_post),
        )
        .route("/delete-post/:id", post(delete_post).delete(delete_post))
        .route("/logout", get(logout));

    let tokens = app_state.tokens.clone();

    let mut router = Router::new()
        .merge(blog_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        .merge(create_health_router());

    let static_router: Option<Router<Arc<AppState>>> = app_state
        .static_path
        .as_deref()
        .and_then(|path| create_static_router(path));
    if let Some(static_router) = static_router {
        router = router.merge(static_router);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens.clone();
                    inject_token_service(tokens, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Create a router serving static assets from `path`.
///
/// Returns `None` if the directory does not exist.
pub fn create_static_router<S>(path: impl AsRef<Path>) -> Option<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    let path = path.as_ref();
    if !path.is_dir() {
        tracing::warn!("Static path {:?} not found, static files disabled", path);
        return None;
    }

    tracing::info!("Serving static files from {:?}", path);
    Some(Router::new().fallback_service(ServeDir::new(path)))
}
