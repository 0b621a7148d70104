//! blogpress - a server-rendered blog with a password-protected admin panel.
//!
//! Posts are stored in SQLite through sqlx, rendered with a small
//! Handlebars-style template engine and served with axum. Admins log in with
//! an Argon2-hashed password and hold a JWT session cookie.

pub mod auth;
pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod template;
pub mod web;

pub use auth::{hash_password, verify_password, HashCost, TokenService};
pub use blog::{NewPost, Post, PostRepository, PostUpdate};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{BlogError, Result};
pub use web::{create_router, AppState, WebServer};
