//! Web module for blogpress.
//!
//! Server-rendered public pages, the cookie-authenticated admin panel and
//! the registration endpoint, served with axum.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
