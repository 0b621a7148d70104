//! Post model for blogpress.

use chrono::{DateTime, Utc};

/// Maximum number of characters shown in a listing excerpt.
pub const EXCERPT_LENGTH: usize = 200;

/// Post entity.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body/content.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp (equal to `created_at` until the first edit).
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check if the post has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }

    /// Leading part of the body, cut on a character boundary.
    pub fn excerpt(&self) -> String {
        if self.body.chars().count() <= EXCERPT_LENGTH {
            return self.body.clone();
        }
        let mut excerpt: String = self.body.chars().take(EXCERPT_LENGTH).collect();
        excerpt.push_str("...");
        excerpt
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body/content.
    pub body: String,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Replacement title and body for an existing post.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New body.
    pub body: String,
}

impl PostUpdate {
    /// Create an update with both fields.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
