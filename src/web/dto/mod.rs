//! Data Transfer Objects for the blogpress web layer.

pub mod request;
pub mod response;
pub mod validation;

pub use request::*;
pub use response::*;
pub use validation::{FormOrJson, ValidatedForm};
