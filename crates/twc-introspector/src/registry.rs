//! Operation name to method path registry.

use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use twc_core::{MethodPath, OperationName};

/// Discovered SDK methods keyed by their canonical operation name.
///
/// Built once per run. Iteration is ordered by [`OperationName`], which makes
/// everything downstream deterministic regardless of discovery order.
///
/// # Examples
///
/// ```
/// use twc_core::{MethodPath, OperationName};
/// use twc_introspector::MethodRegistry;
///
/// let registry = MethodRegistry::from_paths([
///     MethodPath::parse("chat.postMessage"),
///     MethodPath::parse("auth.test"),
/// ]);
///
/// let names: Vec<&str> = registry.iter().map(|(name, _)| name.as_str()).collect();
/// assert_eq!(names, ["AuthTest", "ChatPostMessage"]);
/// assert_eq!(
///     registry.get(&OperationName::new("AuthTest")),
///     Some(&MethodPath::parse("auth.test"))
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodRegistry {
    methods: BTreeMap<OperationName, MethodPath>,
}

impl MethodRegistry {
    /// Builds a registry from discovered paths.
    ///
    /// Two paths with the same operation name are ambiguous; the first one
    /// wins and the other is logged.
    pub fn from_paths(paths: impl IntoIterator<Item = MethodPath>) -> Self {
        let mut methods = BTreeMap::new();
        for path in paths {
            match methods.entry(OperationName::from_path(&path)) {
                Entry::Vacant(entry) => {
                    entry.insert(path);
                }
                Entry::Occupied(entry) => {
                    tracing::warn!(
                        "Method {} maps to operation {} already registered for {}; ignoring it",
                        path,
                        entry.key(),
                        entry.get()
                    );
                }
            }
        }
        Self { methods }
    }

    /// Method path registered for `operation`.
    #[must_use]
    pub fn get(&self, operation: &OperationName) -> Option<&MethodPath> {
        self.methods.get(operation)
    }

    /// Entries in operation name order.
    pub fn iter(&self) -> impl Iterator<Item = (&OperationName, &MethodPath)> {
        self.methods.iter()
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
