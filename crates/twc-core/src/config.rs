//! Generator configuration.
//!
//! Every field has a default so the generator runs with no configuration at
//! all. A TOML file may override any subset of fields; CLI flags are applied
//! on top of that by the binary.
//!
//! # Examples
//!
//! ```
//! use twc_core::{GeneratorConfig, SuccessCheck};
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     strict = true
//!     success_check = "legacy-ok-false"
//! "#).unwrap();
//!
//! assert!(config.strict);
//! assert_eq!(config.success_check, SuccessCheck::LegacyOkFalse);
//! assert_eq!(config.types_file, "slackTypes.ts");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default location of the chat platform's OpenAPI document.
pub const DEFAULT_SPEC_URL: &str =
    "https://raw.githubusercontent.com/slackapi/slack-api-specs/master/web-api/slack_web_openapi_v2.json";

/// How the generated `SuccessOrErrorPredicate.isSuccess()` decides success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuccessCheck {
    /// `isSuccess()` is true when the response's `ok` field is `true`.
    #[default]
    OkTrue,
    /// Reproduces the inverted check of the first generator release:
    /// `isSuccess()` is true when `ok == false`.
    LegacyOkFalse,
}

impl SuccessCheck {
    /// TypeScript boolean expression over `response` for this check.
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_core::SuccessCheck;
    ///
    /// assert_eq!(SuccessCheck::OkTrue.expression("this.#response"), "this.#response.ok === true");
    /// ```
    #[must_use]
    pub fn expression(self, response: &str) -> String {
        match self {
            Self::OkTrue => format!("{response}.ok === true"),
            Self::LegacyOkFalse => format!("{response}.ok == false"),
        }
    }
}

/// Naming strategy settings for the specification compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Exact-match renames applied to every generated name component.
    pub substitutions: BTreeMap<String, String>,
    /// Structural prefixes stripped from generated name components.
    pub strip_prefixes: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let substitutions = [("$200", "Success"), ("Default", "Error")]
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        Self {
            substitutions,
            strip_prefixes: vec!["Defs".to_string(), "Objs".to_string()],
        }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// URL of the OpenAPI document.
    pub spec_url: String,
    /// Local OpenAPI document used instead of `spec_url` when set.
    pub spec_file: Option<PathBuf>,
    /// SDK declaration file with argument interfaces and the client surface.
    pub sdk_declarations: PathBuf,
    /// Class in `sdk_declarations` whose properties form the callable surface.
    pub sdk_client_class: String,
    /// Hand-maintained declarations merged into the generated types.
    pub supplemental: Option<PathBuf>,
    /// Directory both artifacts are written to.
    pub output_dir: PathBuf,
    /// File name of the type declarations artifact.
    pub types_file: String,
    /// File name of the client wrapper artifact.
    pub client_file: String,
    /// Module the underlying client class is imported from.
    pub client_module: String,
    /// Name of the underlying client class.
    pub client_type: String,
    /// Module the argument interfaces are imported from.
    pub arguments_module: String,
    /// Name of the generated wrapper class.
    pub wrapper_class: String,
    /// Success predicate semantics.
    pub success_check: SuccessCheck,
    /// Fail on unresolved joins and name collisions instead of warning.
    pub strict: bool,
    /// Naming strategy for the specification compiler.
    pub naming: NamingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spec_url: DEFAULT_SPEC_URL.to_string(),
            spec_file: None,
            sdk_declarations: PathBuf::from("./node_modules/@slack/web-api/dist/methods.d.ts"),
            sdk_client_class: "Methods".to_string(),
            supplemental: Some(PathBuf::from("./additionalSlackTypes.ts")),
            output_dir: PathBuf::from("dist"),
            types_file: "slackTypes.ts".to_string(),
            client_file: "typedSlackWebClient.ts".to_string(),
            client_module: "@slack/web-api".to_string(),
            client_type: "WebClient".to_string(),
            arguments_module: "@slack/web-api/dist/methods".to_string(),
            wrapper_class: "TypedWebClient".to_string(),
            success_check: SuccessCheck::default(),
            strict: false,
            naming: NamingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] on malformed TOML or invalid values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::ConfigError {
            message: format!("invalid configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ConfigError`] if it is not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Checks values that would produce unusable output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("types_file", &self.types_file),
            ("client_file", &self.client_file),
            ("client_module", &self.client_module),
            ("client_type", &self.client_type),
            ("arguments_module", &self.arguments_module),
            ("wrapper_class", &self.wrapper_class),
            ("sdk_client_class", &self.sdk_client_class),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::ConfigError {
                    message: format!("{field} must not be empty"),
                });
            }
        }

        if self.types_file == self.client_file {
            return Err(Error::ConfigError {
                message: "types_file and client_file must differ".to_string(),
            });
        }

        if self.spec_file.is_none() && self.spec_url.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "either spec_url or spec_file must be set".to_string(),
            });
        }

        Ok(())
    }

    /// Module specifier the client artifact uses to import the types artifact.
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_core::GeneratorConfig;
    ///
    /// assert_eq!(GeneratorConfig::default().types_module(), "./slackTypes");
    /// ```
    #[must_use]
    pub fn types_module(&self) -> String {
        let stem = self
            .types_file
            .strip_suffix(".d.ts")
            .or_else(|| self.types_file.strip_suffix(".ts"))
            .unwrap_or(&self.types_file);
        format!("./{stem}")
    }
}
