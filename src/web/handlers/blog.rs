//! Public blog page handlers.

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use std::sync::Arc;

use super::{post_value, posts_value, AppState, MAIN_LAYOUT};
use crate::blog::PostRepository;
use crate::web::dto::validation::sanitize_search_term;
use crate::web::dto::{FormOrJson, PageQuery, SearchForm};
use crate::web::error::ApiError;

/// Posts shown per home page.
pub const POSTS_PER_PAGE: i64 = 10;

/// GET / - Latest posts, newest first.
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let page = i64::from(query.page());
    let offset = (page - 1) * POSTS_PER_PAGE;

    let repo = PostRepository::new(state.db.pool());
    let posts = repo.list_paginated(offset, POSTS_PER_PAGE).await?;
    let total = repo.count().await?;

    let has_next = offset + (posts.len() as i64) < total;

    let mut context = state
        .page_context(&state.site.title)
        .with("posts", posts_value(&posts));
    if has_next {
        context.set("next_page", page + 1);
    }

    state.render(MAIN_LAYOUT, "index", &context)
}

/// GET /post/:id - A single post.
pub async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let post = PostRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let context = state
        .page_context(&post.title)
        .with("post", post_value(&post));
    state.render(MAIN_LAYOUT, "post", &context)
}

/// POST /search - Posts whose title or body contains the search term.
///
/// The term is reduced to ASCII letters, digits and spaces first.
pub async fn search(
    State(state): State<Arc<AppState>>,
    FormOrJson(form): FormOrJson<SearchForm>,
) -> Result<Html<String>, ApiError> {
    let term = sanitize_search_term(&form.search_term);
    let posts = PostRepository::new(state.db.pool()).search(&term).await?;

    tracing::debug!(term = %term, results = posts.len(), "Search");

    let context = state
        .page_context("Search")
        .with("search_term", term)
        .with("posts", posts_value(&posts));
    state.render(MAIN_LAYOUT, "search", &context)
}

/// GET /about - Static about page.
pub async fn about(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let context = state.page_context("About");
    state.render(MAIN_LAYOUT, "about", &context)
}

/// GET /health - Liveness check.
pub async fn health_check() -> &'static str {
    "OK"
}
