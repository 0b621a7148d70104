//! Web Admin Post Tests
//!
//! Integration tests for creating, editing and deleting posts from the
//! admin panel.

mod common;

use axum::http::StatusCode;
use blogpress::blog::{NewPost, PostRepository};
use common::{admin_session, backdate_post, create_test_server};
use serde_json::{json, Value};

#[tokio::test]
async fn test_add_post_page() {
    let (server, _state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    let response = server.get("/add-post").add_cookie(cookie).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"action="/add-post""#));
    assert!(html.contains("/logout"));
}

#[tokio::test]
async fn test_add_post_then_listed() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    let response = server
        .post("/add-post")
        .add_cookie(cookie.clone())
        .form(&[("title", "First post"), ("body", "Hello there")])
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/dashboard");

    // Write is visible as soon as the redirect is returned
    let posts = PostRepository::new(state.db.pool()).list().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "First post");
    assert_eq!(posts[0].body, "Hello there");

    let dashboard = server.get("/dashboard").add_cookie(cookie).await;
    dashboard.assert_status_ok();
    assert!(dashboard.text().contains("First post"));
}

#[tokio::test]
async fn test_add_post_json_body() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    server
        .post("/add-post")
        .add_cookie(cookie)
        .json(&json!({ "title": "From JSON", "body": "Body" }))
        .await
        .assert_status(StatusCode::FOUND);

    let posts = PostRepository::new(state.db.pool()).list().await.unwrap();
    assert_eq!(posts[0].title, "From JSON");
}

#[tokio::test]
async fn test_add_post_blank_title() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    let response = server
        .post("/add-post")
        .add_cookie(cookie)
        .form(&[("title", "   "), ("body", "Body")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["title"].is_array());

    let count = PostRepository::new(state.db.pool()).count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_add_post_missing_field() {
    let (server, _state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    server
        .post("/add-post")
        .add_cookie(cookie)
        .form(&[("title", "Only a title")])
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_edit_post_page_prefilled() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    let post = PostRepository::new(state.db.pool())
        .create(&NewPost::new("Tom & Jerry", "<b>cartoon</b>"))
        .await
        .unwrap();

    let response = server
        .get(&format!("/edit-post/{}", post.id))
        .add_cookie(cookie)
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"value="Tom &amp; Jerry""#));
    assert!(html.contains("&lt;b&gt;cartoon&lt;/b&gt;"));
    assert!(!html.contains("<b>cartoon</b>"));
}

#[tokio::test]
async fn test_edit_post_page_missing() {
    let (server, _state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    let response = server.get("/edit-post/999").add_cookie(cookie).await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_edit_post_put() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;
    let repo = PostRepository::new(state.db.pool());

    let created = repo.create(&NewPost::new("Old", "Old body")).await.unwrap();
    backdate_post(&state, created.id).await;
    let post = repo.get_by_id(created.id).await.unwrap().unwrap();

    let response = server
        .put(&format!("/edit-post/{}", post.id))
        .add_cookie(cookie)
        .form(&[("title", "New"), ("body", "New body")])
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        format!("/edit-post/{}", post.id).as_str()
    );

    let updated = repo.get_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.body, "New body");
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at > post.updated_at);
}

#[tokio::test]
async fn test_edit_post_form_post_fallback() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;
    let repo = PostRepository::new(state.db.pool());

    let post = repo.create(&NewPost::new("Old", "Old body")).await.unwrap();
    backdate_post(&state, post.id).await;

    server
        .post(&format!("/edit-post/{}", post.id))
        .add_cookie(cookie)
        .form(&[("title", "Via form"), ("body", "Body")])
        .await
        .assert_status(StatusCode::FOUND);

    let updated = repo.get_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Via form");
    assert!(updated.is_edited());
}

#[tokio::test]
async fn test_edit_post_missing() {
    let (server, _state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    server
        .put("/edit-post/999")
        .add_cookie(cookie)
        .form(&[("title", "New"), ("body", "New body")])
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_post() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;
    let repo = PostRepository::new(state.db.pool());

    let keep = repo.create(&NewPost::new("Keep", "k")).await.unwrap();
    let gone = repo.create(&NewPost::new("Gone", "g")).await.unwrap();

    let response = server
        .delete(&format!("/delete-post/{}", gone.id))
        .add_cookie(cookie)
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/dashboard");

    let posts = repo.list().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, keep.id);
}

#[tokio::test]
async fn test_delete_post_form_post_fallback() {
    let (server, state) = create_test_server().await;
    let cookie = admin_session(&server).await;
    let repo = PostRepository::new(state.db.pool());

    let post = repo.create(&NewPost::new("Gone", "g")).await.unwrap();

    server
        .post(&format!("/delete-post/{}", post.id))
        .add_cookie(cookie)
        .await
        .assert_status(StatusCode::FOUND);

    assert!(repo.get_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_post_missing() {
    let (server, _state) = create_test_server().await;
    let cookie = admin_session(&server).await;

    server
        .delete("/delete-post/999")
        .add_cookie(cookie)
        .await
        .assert_status_not_found();
}
