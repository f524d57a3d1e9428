//! Joins discovered SDK methods with response namespaces and argument types.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use twc_core::{ArgumentTypeName, Error, MethodPath, OperationName, Result};
use twc_dts::{DeclarationFile, Scope};
use twc_introspector::MethodRegistry;
use twc_schema::{PATHS_NAMESPACE, RESPONSES_NAMESPACE};

/// One wrapper method of the generated client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMethod {
    /// lowerCamelCase wrapper name, e.g. `chatPostMessage`
    pub name: String,
    /// Response namespace under `Paths`
    pub operation: OperationName,
    /// SDK method the wrapper delegates to
    pub path: MethodPath,
    /// Argument interface of the SDK method
    pub argument_type: ArgumentTypeName,
}

/// Fully resolved join for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinEntry {
    /// SDK method path
    pub path: MethodPath,
    /// Matching argument interface, if any
    pub argument_type: Option<ArgumentTypeName>,
}

/// Per-operation join of SDK methods and argument types, restricted to
/// operations that have a response namespace.
#[derive(Debug, Clone, Default)]
pub struct JoinTable {
    entries: BTreeMap<OperationName, JoinEntry>,
    unmatched_methods: Vec<MethodPath>,
}

impl JoinTable {
    /// Builds the table.
    ///
    /// Registry entries without a response namespace are kept aside as
    /// unmatched methods.
    #[must_use]
    pub fn build(
        operations: &BTreeSet<OperationName>,
        registry: &MethodRegistry,
        argument_types: &[ArgumentTypeName],
    ) -> Self {
        let mut table = Self::default();
        for (operation, path) in registry.iter() {
            if !operations.contains(operation) {
                table.unmatched_methods.push(path.clone());
                continue;
            }
            let argument_type = argument_types
                .iter()
                .find(|arg| arg.matches(operation))
                .cloned();
            table.entries.insert(
                operation.clone(),
                JoinEntry {
                    path: path.clone(),
                    argument_type,
                },
            );
        }
        table
    }

    /// Entry for `operation`.
    #[must_use]
    pub fn get(&self, operation: &OperationName) -> Option<&JoinEntry> {
        self.entries.get(operation)
    }

    /// Entries in operation name order.
    pub fn iter(&self) -> impl Iterator<Item = (&OperationName, &JoinEntry)> {
        self.entries.iter()
    }

    /// SDK methods without a response namespace.
    #[must_use]
    pub fn unmatched_methods(&self) -> &[MethodPath] {
        &self.unmatched_methods
    }
}

/// Result of [`synthesize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Synthesis {
    /// Wrapper methods in operation name order
    pub methods: Vec<ClientMethod>,
    /// SDK methods without a response namespace
    pub unmatched_methods: Vec<MethodPath>,
    /// Operations without an argument interface
    pub unmatched_arguments: Vec<OperationName>,
}

impl Synthesis {
    /// Argument interfaces used by the generated methods, sorted and unique.
    #[must_use]
    pub fn argument_imports(&self) -> Vec<&str> {
        self.methods
            .iter()
            .map(|method| method.argument_type.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Fails if anything stayed unmatched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedJoin`] listing every unmatched name.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.unmatched_methods.is_empty() && self.unmatched_arguments.is_empty() {
            return Ok(());
        }
        Err(Error::UnresolvedJoin {
            unmatched_methods: self
                .unmatched_methods
                .iter()
                .map(ToString::to_string)
                .collect(),
            unmatched_arguments: self
                .unmatched_arguments
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }
}

/// Operation namespaces under `Paths` that declare `Responses`.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if there is no `Paths` namespace.
pub fn response_operations(file: &DeclarationFile) -> Result<BTreeSet<OperationName>> {
    let paths = file
        .namespace(PATHS_NAMESPACE)
        .ok_or_else(|| Error::MissingNamespace {
            namespace: PATHS_NAMESPACE.to_string(),
            parent: "<root>".to_string(),
        })?;
    Ok(paths
        .namespaces()
        .filter(|op| op.namespace(RESPONSES_NAMESPACE).is_some())
        .map(|op| OperationName::new(&op.name))
        .collect())
}

/// Decides which wrapper methods to emit.
///
/// Every registered method without a response namespace is logged once, and
/// every matched operation without an argument interface is logged once and
/// dropped. A method missing both is only reported as an unmatched method.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use twc_codegen::synthesis::synthesize;
/// use twc_core::{ArgumentTypeName, MethodPath, OperationName};
/// use twc_introspector::MethodRegistry;
///
/// let operations = BTreeSet::from([OperationName::new("AuthTest")]);
/// let registry = MethodRegistry::from_paths([MethodPath::parse("auth.test")]);
/// let arguments = [ArgumentTypeName::new("AuthTestArguments")];
///
/// let synthesis = synthesize(&operations, &registry, &arguments);
/// assert_eq!(synthesis.methods[0].name, "authTest");
/// assert!(synthesis.ensure_complete().is_ok());
/// ```
#[must_use]
pub fn synthesize(
    operations: &BTreeSet<OperationName>,
    registry: &MethodRegistry,
    argument_types: &[ArgumentTypeName],
) -> Synthesis {
    let table = JoinTable::build(operations, registry, argument_types);
    let mut synthesis = Synthesis {
        unmatched_methods: table.unmatched_methods().to_vec(),
        ..Synthesis::default()
    };

    for path in &synthesis.unmatched_methods {
        tracing::warn!("No response types found for SDK method {}", path);
    }

    for (operation, entry) in table.iter() {
        let Some(argument_type) = &entry.argument_type else {
            tracing::warn!(
                "No argument type {} found for SDK method {}; skipping it",
                operation.expected_argument_type(),
                entry.path
            );
            synthesis.unmatched_arguments.push(operation.clone());
            continue;
        };

        let method = ClientMethod {
            name: operation.method_name(),
            operation: operation.clone(),
            path: entry.path.clone(),
            argument_type: argument_type.clone(),
        };
        tracing::debug!(
            "Generating {}({}) for {}",
            method.name,
            method.argument_type,
            method.path
        );
        synthesis.methods.push(method);
    }

    tracing::info!(
        "Synthesized {} client methods ({} methods without responses, {} without arguments)",
        synthesis.methods.len(),
        synthesis.unmatched_methods.len(),
        synthesis.unmatched_arguments.len()
    );
    synthesis
}
