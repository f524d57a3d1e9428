//! Template engine for the client artifact using Handlebars.
//!
//! # Examples
//!
//! ```
//! use twc_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "import { {{name}} } from \"{{module}}\";").unwrap();
//!
//! let out = engine
//!     .render("greeting", &json!({ "name": "WebClient", "module": "@slack/web-api" }))
//!     .unwrap();
//! assert_eq!(out, "import { WebClient } from \"@slack/web-api\";");
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use twc_core::{Error, Result};

/// Name of the built-in client template.
pub const CLIENT_TEMPLATE: &str = "client";

/// Template engine for code generation.
///
/// Output is TypeScript, so HTML escaping is disabled; strict mode makes a
/// missing context field an error instead of an empty string.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationError`] if a built-in template does not
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string(CLIENT_TEMPLATE, include_str!("../templates/client.ts.hbs"))
            .map_err(|e| Error::GenerationError {
                artifact: CLIENT_TEMPLATE.to_string(),
                message: format!("failed to register template: {e}"),
            })?;

        Ok(Self { handlebars })
    }

    /// Renders `template_name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationError`] if the template is unknown, a field
    /// is missing or rendering fails.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::GenerationError {
                artifact: template_name.to_string(),
                message: format!("template rendering failed: {e}"),
            })
    }

    /// Registers an additional template, replacing one of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationError`] if the template does not compile.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::GenerationError {
                artifact: name.to_string(),
                message: format!("failed to register template: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_template_registered() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render(CLIENT_TEMPLATE, &json!({})).unwrap_err();
        assert!(err.to_string().contains("failed to generate client"));
    }

    #[test]
    fn test_no_html_escaping() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("t", "{{ty}}").unwrap();
        let out = engine
            .render("t", &json!({ "ty": "Promise<A & B>" }))
            .unwrap();
        assert_eq!(out, "Promise<A & B>");
    }

    #[test]
    fn test_strict_mode_fails_on_missing_variable() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("t", "{{missing}}").unwrap();
        assert!(engine.render("t", &json!({})).is_err());
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render("nope", &json!({})).is_err());
    }

    #[test]
    fn test_invalid_template_syntax() {
        let mut engine = TemplateEngine::new().unwrap();
        assert!(engine.register_template_string("bad", "{{#if}}").is_err());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine<'_>>();
    }
}
