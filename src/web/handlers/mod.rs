//! Route handlers for the blogpress web layer.

pub mod admin;
pub mod auth;
pub mod blog;

pub use admin::*;
pub use auth::*;
pub use blog::*;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::auth::{HashCost, TokenService};
use crate::blog::Post;
use crate::config::{Config, SiteConfig};
use crate::template::{TemplateContext, TemplateEngine, TemplateLoader, Value};
use crate::web::error::ApiError;
use crate::Database;

/// Layout for public pages.
pub const MAIN_LAYOUT: &str = "layouts/main";

/// Layout for the admin panel.
pub const ADMIN_LAYOUT: &str = "layouts/admin";

/// Application state shared across handlers.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// Session token issuer and verifier.
    pub tokens: Arc<TokenService>,
    /// Parsed page templates.
    pub templates: Arc<TemplateEngine>,
    /// Site title and description.
    pub site: SiteConfig,
    /// Argon2 cost for new password hashes.
    pub hash_cost: HashCost,
    /// Whether the session cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// Directory served for requests no route matches.
    pub static_path: Option<PathBuf>,
}

impl AppState {
    /// Create a new application state with default site settings.
    pub fn new(db: Database, tokens: TokenService, templates: TemplateEngine) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            templates: Arc::new(templates),
            site: SiteConfig::default(),
            hash_cost: HashCost::default(),
            cookie_secure: false,
            static_path: None,
        }
    }

    /// Build the state from configuration, loading templates from disk.
    pub fn from_config(config: &Config, db: Database) -> crate::Result<Self> {
        let templates = TemplateLoader::new(&config.templates.path).load_engine()?;
        let tokens = TokenService::new(&config.web.jwt_secret, config.web.token_expiry_secs);

        Ok(Self::new(db, tokens, templates)
            .with_site(config.site.clone())
            .with_hash_cost(config.security.hash_cost())
            .with_cookie_secure(config.web.cookie_secure)
            .with_static_path(
                config
                    .web
                    .serve_static
                    .then(|| PathBuf::from(&config.web.static_path)),
            ))
    }

    /// Set the site settings.
    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    /// Set the password hash cost.
    pub fn with_hash_cost(mut self, hash_cost: HashCost) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    /// Set whether the session cookie is marked `Secure`.
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Set the static asset directory, or disable static serving with `None`.
    pub fn with_static_path(mut self, path: Option<PathBuf>) -> Self {
        self.static_path = path;
        self
    }

    /// Template context carrying the page title and the site settings.
    pub fn page_context(&self, title: &str) -> TemplateContext {
        TemplateContext::new()
            .with("title", title)
            .with("description", self.site.description.as_str())
            .with("site_title", self.site.title.as_str())
            .with("site_description", self.site.description.as_str())
    }

    /// Render a page inside a layout.
    pub fn render(
        &self,
        layout: &str,
        page: &str,
        context: &TemplateContext,
    ) -> Result<Html<String>, ApiError> {
        let html = self.templates.render_with_layout(layout, page, context)?;
        Ok(Html(html))
    }
}

/// A `302 Found` redirect.
///
/// `axum::response::Redirect::to` answers 303, browsers treat both the same
/// after a form POST.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Template view of a post.
pub fn post_value(post: &Post) -> Value {
    Value::object([
        ("id", Value::Number(post.id)),
        ("title", Value::string(&post.title)),
        ("body", Value::string(&post.body)),
        ("excerpt", Value::string(post.excerpt())),
        ("created", Value::string(format_date(&post.created_at))),
        ("updated", Value::string(format_date(&post.updated_at))),
        ("edited", Value::Bool(post.is_edited())),
    ])
}

/// Template view of a list of posts.
pub fn posts_value(posts: &[Post]) -> Value {
    Value::List(posts.iter().map(post_value).collect())
}
