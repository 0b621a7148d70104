//! Middleware for the blogpress web layer.

pub mod auth;
pub mod security;

pub use auth::{
    inject_token_service, removal_cookie, session_cookie, AuthUser, OptionalAuthUser,
    TokenState, TOKEN_COOKIE,
};
pub use security::security_headers;
