//! Authentication module for blogpress.
//!
//! Password hashing, session tokens, registration and login.

mod password;
mod registration;
mod token;

pub use password::{hash_password, verify_password, HashCost, PasswordError};
pub use registration::{authenticate, register};
pub use token::{TokenClaims, TokenError, TokenService};
