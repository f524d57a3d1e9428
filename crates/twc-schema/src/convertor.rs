//! Naming strategies for generated declarations.

use std::collections::BTreeMap;
use twc_core::NamingConfig;

/// Maps the compiler's default name path for a declaration to the final one.
///
/// The input is the full path of default names, outermost first, for example
/// `["Paths", "ChatPostMessage", "Responses", "$200"]` or
/// `["Definitions", "DefsOkTrue"]`. The returned path must have the same
/// length.
pub trait TypeNameConvertor {
    /// Converts a default name path.
    fn convert(&self, names: Vec<String>) -> Vec<String>;
}

/// Keeps the compiler's default names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConvertor;

impl TypeNameConvertor for DefaultConvertor {
    fn convert(&self, names: Vec<String>) -> Vec<String> {
        names
    }
}

/// Strips structural prefixes and applies exact-match renames to every
/// name component.
///
/// # Examples
///
/// ```
/// use twc_core::NamingConfig;
/// use twc_schema::{SubstitutingConvertor, TypeNameConvertor};
///
/// let convertor = SubstitutingConvertor::new(&NamingConfig::default());
/// let names = convertor.convert(vec!["Definitions".into(), "ObjsUser".into()]);
/// assert_eq!(names, ["Definitions", "User"]);
/// ```
#[derive(Debug, Clone)]
pub struct SubstitutingConvertor {
    substitutions: BTreeMap<String, String>,
    strip_prefixes: Vec<String>,
}

impl SubstitutingConvertor {
    /// Builds the strategy from naming configuration.
    #[must_use]
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            substitutions: config.substitutions.clone(),
            strip_prefixes: config.strip_prefixes.clone(),
        }
    }

    fn convert_one(&self, name: String) -> String {
        let stripped = self
            .strip_prefixes
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix.as_str()).filter(|rest| !rest.is_empty()))
            .map(str::to_string)
            .unwrap_or(name);

        self.substitutions
            .get(&stripped)
            .cloned()
            .unwrap_or(stripped)
    }
}

impl TypeNameConvertor for SubstitutingConvertor {
    fn convert(&self, names: Vec<String>) -> Vec<String> {
        names.into_iter().map(|name| self.convert_one(name)).collect()
    }
}
