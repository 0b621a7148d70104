//! Blog module for blogpress.
//!
//! Post model and persistence.

mod post;
mod repository;

pub use post::{NewPost, Post, PostUpdate, EXCERPT_LENGTH};
pub use repository::PostRepository;
