//! Admin panel handlers.
//!
//! Every handler here takes [`AuthUser`], so requests without a valid session
//! cookie are rejected before the handler runs.

use axum::{
    extract::{Path, State},
    response::{Html, Response},
};
use std::sync::Arc;

use super::{found, post_value, posts_value, AppState, ADMIN_LAYOUT};
use crate::blog::{NewPost, PostRepository, PostUpdate};
use crate::web::dto::{PostForm, ValidatedForm};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /dashboard - List all posts with edit and delete controls.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Html<String>, ApiError> {
    let posts = PostRepository::new(state.db.pool()).list().await?;

    let context = state
        .page_context("Dashboard")
        .with("logged_in", true)
        .with("posts", posts_value(&posts));
    state.render(ADMIN_LAYOUT, "admin/dashboard", &context)
}

/// GET /add-post - Empty post form.
pub async fn add_post_page(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Html<String>, ApiError> {
    let context = state.page_context("Add Post").with("logged_in", true);
    state.render(ADMIN_LAYOUT, "admin/add-post", &context)
}

/// POST /add-post - Create a post.
pub async fn add_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedForm(form): ValidatedForm<PostForm>,
) -> Result<Response, ApiError> {
    let post = PostRepository::new(state.db.pool())
        .create(&NewPost::new(form.title, form.body))
        .await?;

    tracing::info!(post_id = post.id, user_id = user.user_id, "Post created");

    Ok(found("/dashboard"))
}

/// GET /edit-post/:id - Post form pre-filled with the current content.
pub async fn edit_post_page(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let post = PostRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let context = state
        .page_context("Edit Post")
        .with("logged_in", true)
        .with("post", post_value(&post));
    state.render(ADMIN_LAYOUT, "admin/edit-post", &context)
}

/// PUT /edit-post/:id - Replace the title and body of a post.
///
/// Also mounted as POST for HTML forms.
pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    ValidatedForm(form): ValidatedForm<PostForm>,
) -> Result<Response, ApiError> {
    PostRepository::new(state.db.pool())
        .update(id, &PostUpdate::new(form.title, form.body))
        .await?;

    tracing::info!(post_id = id, user_id = user.user_id, "Post updated");

    Ok(found(&format!("/edit-post/{id}")))
}

/// DELETE /delete-post/:id - Delete a post.
///
/// Also mounted as POST for HTML forms.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    PostRepository::new(state.db.pool()).delete(id).await?;

    tracing::info!(post_id = id, user_id = user.user_id, "Post deleted");

    Ok(found("/dashboard"))
}
