//! Configuration module for blogpress.

use serde::Deserialize;
use std::path::Path;

use crate::auth::HashCost;
use crate::{BlogError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/blog.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Site information shown in page headers.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Title of the blog.
    #[serde(default = "default_site_title")]
    pub title: String,
    /// Short description of the blog.
    #[serde(default = "default_site_description")]
    pub description: String,
}

fn default_site_title() -> String {
    "Blog".to_string()
}

fn default_site_description() -> String {
    "Simple blog built with Rust".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            description: default_site_description(),
        }
    }
}

/// Templates configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Directory whose `<name>.html` files override the built-in templates.
    #[serde(default = "default_templates_path")]
    pub path: String,
}

fn default_templates_path() -> String {
    "templates".to_string()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: default_templates_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty logs to stdout only.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/blogpress.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Web configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// JWT secret key (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token expiry in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
    /// Mark the session cookie `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Whether to serve static files.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_token_expiry() -> u64 {
    86400 // 1 day
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "public".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_secs: default_token_expiry(),
            cookie_secure: false,
            serve_static: default_serve_static(),
            static_path: default_static_path(),
        }
    }
}

/// Password hashing cost.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iterations.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lanes.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

fn default_hash_memory() -> u32 {
    19456 // 19 MiB
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl SecurityConfig {
    /// Hash cost described by this section.
    pub fn hash_cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Site information.
    #[serde(default)]
    pub site: SiteConfig,
    /// Templates configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Password hashing configuration.
    #[serde(default)]
    pub security: SecurityConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BlogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BlogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BLOG_JWT_SECRET`: token signing secret
    /// - `BLOG_DATABASE_PATH`: SQLite database path
    /// - `BLOG_PORT`: listening port
    pub fn apply_env_overrides(&mut self) {
        if let Some(secret) = non_empty_var("BLOG_JWT_SECRET") {
            self.web.jwt_secret = secret;
        }
        if let Some(path) = non_empty_var("BLOG_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(port) = non_empty_var("BLOG_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid BLOG_PORT value: {}", port),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the JWT secret is not set
    /// - the password hashing cost is rejected by argon2
    pub fn validate(&self) -> Result<()> {
        if self.web.jwt_secret.is_empty() {
            return Err(BlogError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via BLOG_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        self.security
            .hash_cost()
            .params()
            .map_err(|e| BlogError::Config(format!("invalid hash cost: {e}")))?;
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "data/blog.db");
        assert_eq!(config.site.title, "Blog");
        assert_eq!(config.templates.path, "templates");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/blogpress.log");
        assert!(config.web.jwt_secret.is_empty());
        assert_eq!(config.web.token_expiry_secs, 86400);
        assert!(!config.web.cookie_secure);
        assert!(config.web.serve_static);
        assert_eq!(config.web.static_path, "public");
        assert_eq!(config.security.hash_memory_kib, 19456);
        assert_eq!(config.security.hash_iterations, 2);
        assert_eq!(config.security.hash_parallelism, 1);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "custom/blog.sqlite"

[site]
title = "My Blog"
description = "Notes"

[templates]
path = "custom/templates"

[logging]
level = "debug"
file = "custom/logs/app.log"

[web]
jwt_secret = "test-secret-key"
token_expiry_secs = 600
cookie_secure = true
serve_static = false
static_path = "assets"

[security]
hash_memory_kib = 4096
hash_iterations = 1
hash_parallelism = 2
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "custom/blog.sqlite");
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.site.description, "Notes");
        assert_eq!(config.templates.path, "custom/templates");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.web.jwt_secret, "test-secret-key");
        assert_eq!(config.web.token_expiry_secs, 600);
        assert!(config.web.cookie_secure);
        assert!(!config.web.serve_static);
        assert_eq!(config.web.static_path, "assets");
        assert_eq!(config.security.hash_memory_kib, 4096);
        assert_eq!(config.security.hash_iterations, 1);
        assert_eq!(config.security.hash_parallelism, 2);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/blog.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        if let Err(BlogError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(BlogError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    // Environment variables are process-wide, so every override is checked in one test.
    #[test]
    fn test_apply_env_overrides() {
        std::env::set_var("BLOG_JWT_SECRET", "env-secret-key");
        std::env::set_var("BLOG_DATABASE_PATH", "");
        std::env::set_var("BLOG_PORT", "not-a-port");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.web.jwt_secret, "env-secret-key");
        assert_eq!(config.database.path, "data/blog.db");
        assert_eq!(config.server.port, 5000);

        std::env::set_var("BLOG_DATABASE_PATH", "/tmp/override.db");
        std::env::set_var("BLOG_PORT", "7070");
        config.apply_env_overrides();

        assert_eq!(config.database.path, "/tmp/override.db");
        assert_eq!(config.server.port, 7070);

        std::env::remove_var("BLOG_JWT_SECRET");
        std::env::remove_var("BLOG_DATABASE_PATH");
        std::env::remove_var("BLOG_PORT");
    }

    #[test]
    fn test_validate_no_secret() {
        let config = Config::default();
        let result = config.validate();
        if let Err(BlogError::Config(msg)) = result {
            assert!(msg.contains("jwt_secret"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_bad_hash_cost() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        config.security.hash_iterations = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();

        assert!(config.validate().is_ok());
    }
}
