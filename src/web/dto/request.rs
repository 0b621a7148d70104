//! Request DTOs for the blogpress web layer.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};

/// Login and registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsForm {
    #[validate(
        length(min = 1, message = "Username is required"),
        custom(function = "no_control_chars")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Add-post and edit-post request.
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 200, message = "Title is too long")
    )]
    pub title: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub body: String,
}

/// Search request from the header search box.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
}

/// Pagination query for the home page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<u32>,
}

impl PageQuery {
    /// The requested page, clamped to at least 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
