//! Template loader module.
//!
//! Built-in templates are compiled into the binary. A template directory may
//! override any of them with a `<name>.html` file of the same name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Result, TemplateEngine, TemplateError};

/// Built-in templates as `(name, source)` pairs.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("layouts/main", include_str!("../../templates/layouts/main.html")),
    ("layouts/admin", include_str!("../../templates/layouts/admin.html")),
    ("index", include_str!("../../templates/index.html")),
    ("post", include_str!("../../templates/post.html")),
    ("search", include_str!("../../templates/search.html")),
    ("about", include_str!("../../templates/about.html")),
    ("admin/login", include_str!("../../templates/admin/login.html")),
    ("admin/dashboard", include_str!("../../templates/admin/dashboard.html")),
    ("admin/add-post", include_str!("../../templates/admin/add-post.html")),
    ("admin/edit-post", include_str!("../../templates/admin/edit-post.html")),
];

/// Template loader with directory overrides.
#[derive(Debug, Default)]
pub struct TemplateLoader {
    /// Override directory, if any.
    base_path: Option<PathBuf>,
}

impl TemplateLoader {
    /// Create a loader that checks `base_path` before the built-ins.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: Some(base_path.as_ref().to_path_buf()),
        }
    }

    /// Create a loader that only serves the built-in templates.
    pub fn builtin() -> Self {
        Self::default()
    }

    fn override_path(&self, name: &str) -> Option<PathBuf> {
        self.base_path
            .as_ref()
            .map(|base| base.join(format!("{name}.html")))
            .filter(|path| path.is_file())
    }

    /// Load the source of a template.
    ///
    /// An override file wins over the built-in of the same name.
    pub fn load(&self, name: &str) -> Result<String> {
        if let Some(path) = self.override_path(name) {
            debug!(template = %name, path = %path.display(), "Using template override");
            return fs::read_to_string(&path).map_err(|e| {
                TemplateError::Render(format!("Failed to read template '{name}': {e}"))
            });
        }

        BUILTIN_TEMPLATES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, source)| (*source).to_string())
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Parse every built-in template (or its override) into an engine.
    pub fn load_engine(&self) -> Result<TemplateEngine> {
        let mut engine = TemplateEngine::new();
        let mut overridden = 0;

        for (name, _) in BUILTIN_TEMPLATES {
            if self.override_path(name).is_some() {
                overridden += 1;
            }
            let source = self.load(name)?;
            engine.load(*name, &source)?;
        }

        info!(
            templates = BUILTIN_TEMPLATES.len(),
            overridden, "Templates loaded"
        );

        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateContext;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_templates_parse() {
        let engine = TemplateLoader::builtin().load_engine().unwrap();

        for (name, _) in BUILTIN_TEMPLATES {
            assert!(
                engine.render(name, &TemplateContext::new()).is_ok(),
                "cannot render {name}"
            );
        }
    }

    #[test]
    fn test_load_builtin() {
        let loader = TemplateLoader::builtin();
        let source = loader.load("layouts/main").unwrap();
        assert!(source.contains("{{{body}}}"));
    }

    #[test]
    fn test_load_not_found() {
        let loader = TemplateLoader::builtin();
        let result = loader.load("nonexistent");
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("about.html"), "<p>Custom about</p>").unwrap();

        let loader = TemplateLoader::new(temp_dir.path());
        assert_eq!(loader.load("about").unwrap(), "<p>Custom about</p>");

        // Templates without an override fall back to the built-in
        assert!(loader.load("index").unwrap().contains("{{#each posts}}"));
    }

    #[test]
    fn test_override_in_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("admin")).unwrap();
        fs::write(
            temp_dir.path().join("admin/login.html"),
            "<form>{{site_title}}</form>",
        )
        .unwrap();

        let engine = TemplateLoader::new(temp_dir.path()).load_engine().unwrap();
        let context = TemplateContext::new().with("site_title", "My Blog");
        assert_eq!(
            engine.render("admin/login", &context).unwrap(),
            "<form>My Blog</form>"
        );
    }

    #[test]
    fn test_missing_override_directory() {
        let loader = TemplateLoader::new("/nonexistent/templates");
        assert!(loader.load_engine().is_ok());
    }

    #[test]
    fn test_broken_override_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("post.html"), "{{#if post}}").unwrap();

        let result = TemplateLoader::new(temp_dir.path()).load_engine();
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }
}
