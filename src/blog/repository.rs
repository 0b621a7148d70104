//! Post repository for blogpress.
//!
//! This module provides CRUD operations for posts in the database.
//! Listings are ordered newest first (`created_at DESC, id DESC`).

use chrono::Utc;
use sqlx::SqlitePool;

use super::post::{NewPost, Post, PostUpdate};
use crate::{BlogError, Result};

const POST_COLUMNS: &str = "id, title, body, created_at, updated_at";

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// `created_at` and `updated_at` are both set to the current time.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO posts (title, body, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_post.title)
        .bind(&new_post.body)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Replace the title and body of a post and bump `updated_at`.
    ///
    /// Fails with `BlogError::NotFound` if the post does not exist.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Post> {
        let result = sqlx::query("UPDATE posts SET title = ?, body = ?, updated_at = ? WHERE id = ?")
            .bind(&update.title)
            .bind(&update.body)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::NotFound("post".to_string()));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("post".to_string()))
    }

    /// Delete a post by ID.
    ///
    /// Fails with `BlogError::NotFound` if the post does not exist.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::NotFound("post".to_string()));
        }
        Ok(())
    }

    /// List all posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// List posts with pagination, newest first.
    pub async fn list_paginated(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Find posts whose title or body contains `term`, newest first.
    ///
    /// Matching is case-insensitive for ASCII. LIKE wildcards in `term` are
    /// matched literally.
    pub async fn search(&self, term: &str) -> Result<Vec<Post>> {
        let pattern = format!("%{}%", escape_like(term));
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE title LIKE ? ESCAPE '\\' OR body LIKE ? ESCAPE '\\'
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
