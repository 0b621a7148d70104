//! User repository for blogpress.
//!
//! This module provides the credential store operations.

use chrono::Utc;
use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{BlogError, Result};

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Fails with `BlogError::Conflict` when the username is taken.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password, created_at) VALUES (?, ?, ?)")
            .bind(&new_user.username)
            .bind(&new_user.password)
            .bind(Utc::now())
            .execute(self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db_err) if db_err.is_unique_violation() => {
                    BlogError::Conflict("username already exists".to_string())
                }
                _ => BlogError::Database(e.to_string()),
            })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("admin", "hash")).await.unwrap();

        assert!(user.id > 0);
        assert_eq!(user.username, "admin");
        assert_eq!(user.password, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let first = repo.create(&NewUser::new("admin", "hash1")).await.unwrap();
        let result = repo.create(&NewUser::new("admin", "hash2")).await;

        assert!(matches!(result, Err(BlogError::Conflict(_))));

        // The first user is untouched
        let stored = repo.get_by_username("admin").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.password, "hash1");
    }

    #[tokio::test]
    async fn test_get_by_username_missing() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("admin", "hash")).await.unwrap();
        let found = repo.get_by_id(user.id).await.unwrap().unwrap();

        assert_eq!(found.username, "admin");
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }
}
