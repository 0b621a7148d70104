//! Template engine module for blogpress.
//!
//! Provides a Handlebars-style template engine for server-rendered HTML.
//!
//! # Features
//!
//! - Escaped variable expansion: `{{variable}}`
//! - Raw variable expansion: `{{{variable}}}`
//! - Conditionals: `{{#if condition}}...{{else}}...{{/if}}`
//! - Inverse conditionals: `{{#unless condition}}...{{/unless}}`
//! - Loops: `{{#each items}}...{{/each}}`
//! - Escaping: `\{{` to output literal `{{`
//! - Layouts: a page is rendered into the `{{{body}}}` slot of a layout
//!
//! # Example
//!
//! ```
//! use blogpress::template::{TemplateEngine, TemplateContext, Value};
//!
//! let mut engine = TemplateEngine::new();
//! engine.load("greeting", "Hello, {{name}}!").unwrap();
//!
//! let mut context = TemplateContext::new();
//! context.set("name", Value::string("<World>"));
//!
//! let result = engine.render("greeting", &context).unwrap();
//! assert_eq!(result, "Hello, &lt;World&gt;!");
//! ```

mod loader;
mod parser;
mod renderer;

use std::collections::HashMap;

use thiserror::Error;

pub use loader::{TemplateLoader, BUILTIN_TEMPLATES};
pub use parser::{Node, Parser};
pub use renderer::Renderer;

/// Name of the layout slot a page is rendered into.
pub const BODY_SLOT: &str = "body";

/// Template-related errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template not found.
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Render error.
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Escape text for safe inclusion in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// A value that can be used in templates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// A numeric value.
    Number(i64),
    /// A boolean value.
    Bool(bool),
    /// A list of values.
    List(Vec<Value>),
    /// An object (key-value pairs).
    Object(HashMap<String, Value>),
    /// A null/empty value.
    Null,
}

impl Value {
    /// Convert the value to a string for display.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::List(_) => "[list]".to_string(),
            Value::Object(_) => "[object]".to_string(),
            Value::Null => String::new(),
        }
    }

    /// Check if the value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => *n != 0,
            Value::Bool(b) => *b,
            Value::List(l) => !l.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::Null => false,
        }
    }

    /// Get a nested value by dot-separated path.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = self;

        for part in path.split('.') {
            match current {
                Value::Object(map) => {
                    current = map.get(part)?;
                }
                Value::List(list) => {
                    let index: usize = part.parse().ok()?;
                    current = list.get(index)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    /// Create a Value from a string.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create an object Value from key/value pairs.
    pub fn object<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(items.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Context for template rendering.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, Value>,
}

impl TemplateContext {
    /// Create an empty template context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable in the context.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`TemplateContext::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a variable from the context.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value);
        }

        // Dot-notation path lookup
        let (root, rest) = name.split_once('.')?;
        self.variables.get(root)?.get_path(rest)
    }

    /// Create a child context inheriting all variables.
    pub fn child(&self) -> Self {
        self.clone()
    }
}

/// Template engine holding parsed templates.
#[derive(Debug, Default)]
pub struct TemplateEngine {
    templates: HashMap<String, Vec<Node>>,
}

impl TemplateEngine {
    /// Create a new template engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a template.
    pub fn load(&mut self, name: impl Into<String>, content: &str) -> Result<()> {
        let name = name.into();
        let nodes = Parser::new(content)
            .parse()
            .map_err(|e| TemplateError::Parse(format!("{name}: {e}")))?;
        self.templates.insert(name, nodes);
        Ok(())
    }

    /// Render a template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let nodes = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        Renderer::new(context).render(nodes)
    }

    /// Render a page and place the result in a layout's body slot.
    pub fn render_with_layout(
        &self,
        layout: &str,
        name: &str,
        context: &TemplateContext,
    ) -> Result<String> {
        let body = self.render(name, context)?;
        let mut layout_context = context.child();
        layout_context.set(BODY_SLOT, body);
        self.render(layout, &layout_context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_value_to_display_string() {
        assert_eq!(Value::string("hello").to_display_string(), "hello");
        assert_eq!(Value::Number(42).to_display_string(), "42");
        assert_eq!(Value::Bool(true).to_display_string(), "true");
        assert_eq!(Value::List(vec![]).to_display_string(), "[list]");
        assert_eq!(Value::Null.to_display_string(), "");
    }

    #[test]
    fn test_value_is_truthy() {
        assert!(Value::string("x").is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(!Value::Number(0).is_truthy());
        assert!(Value::List(vec![Value::Null]).is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(Some(3i64)), Value::Number(3));
        assert_eq!(Value::from(None::<String>), Value::Null);
    }

    #[test]
    fn test_context_dot_path() {
        let context = TemplateContext::new().with(
            "post",
            Value::object([("title", Value::string("Hello"))]),
        );

        assert_eq!(context.get("post.title"), Some(&Value::string("Hello")));
        assert!(context.get("post.missing").is_none());
        assert!(context.get("missing.title").is_none());
    }

    #[test]
    fn test_engine_render_missing_template() {
        let engine = TemplateEngine::new();
        let result = engine.render("missing", &TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_engine_load_parse_error_names_template() {
        let mut engine = TemplateEngine::new();
        let result = engine.load("broken", "{{#if x}}never closed");

        match result {
            Err(TemplateError::Parse(msg)) => assert!(msg.starts_with("broken:")),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_with_layout() {
        let mut engine = TemplateEngine::new();
        engine
            .load("layout", "<title>{{title}}</title><main>{{{body}}}</main>")
            .unwrap();
        engine.load("page", "<p>{{message}}</p>").unwrap();

        let context = TemplateContext::new()
            .with("title", "Home")
            .with("message", "a < b");

        let html = engine.render_with_layout("layout", "page", &context).unwrap();
        assert_eq!(
            html,
            "<title>Home</title><main><p>a &lt; b</p></main>"
        );
    }
}
