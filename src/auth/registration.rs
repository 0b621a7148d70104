//! User registration and login for blogpress.

use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, HashCost};
use crate::db::{NewUser, User, UserRepository};
use crate::{BlogError, Result};

/// Register a new user.
///
/// Hashes the password and stores the user. Fails with
/// `BlogError::Conflict` if the username is taken.
pub async fn register(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
    cost: &HashCost,
) -> Result<User> {
    if username.is_empty() || password.is_empty() {
        return Err(BlogError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let password_hash =
        hash_password(password, cost).map_err(|e| BlogError::Internal(e.to_string()))?;

    let user = repo.create(&NewUser::new(username, password_hash)).await?;

    info!(
        username = %user.username,
        user_id = user.id,
        "New user registered"
    );

    Ok(user)
}

/// Check a username and password pair.
///
/// Unknown users and wrong passwords fail with the same `BlogError::Auth`.
pub async fn authenticate(repo: &UserRepository<'_>, username: &str, password: &str) -> Result<User> {
    let invalid = || BlogError::Auth("invalid credentials".to_string());

    let Some(user) = repo.get_by_username(username).await? else {
        warn!(username = %username, "Login attempt for unknown user");
        return Err(invalid());
    };

    if !verify_password(password, &user.password) {
        warn!(username = %username, "Login attempt with wrong password");
        return Err(invalid());
    }

    Ok(user)
}
