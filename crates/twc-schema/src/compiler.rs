//! Schema document to declaration tree compiler.
//!
//! Default names follow the usual Swagger-to-TypeScript conventions:
//! definition keys and operation ids become PascalCase (`objs_user` →
//! `ObjsUser`, `chat_postMessage` → `ChatPostMessage`), and response codes
//! become `$<code>` (`$200`) with `default` → `Default`. The
//! [`TypeNameConvertor`] then decides the final names.
//!
//! The structural namespace names [`PATHS_NAMESPACE`],
//! [`DEFINITIONS_NAMESPACE`] and [`RESPONSES_NAMESPACE`] are part of the
//! contract with the post-processor and are never renamed.

use crate::convertor::TypeNameConvertor;
use crate::document::{Operation, SpecDocument};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use twc_core::naming::to_operation_name;
use twc_core::{Error, Result};
use twc_dts::{
    DeclarationFile, IndexSignature, Interface, Item, Member, Modifiers, Namespace, Property,
    TypeAlias, TypeExpr, print_inline,
};

/// Namespace holding one namespace per operation.
pub const PATHS_NAMESPACE: &str = "Paths";
/// Namespace holding reusable schema declarations.
pub const DEFINITIONS_NAMESPACE: &str = "Definitions";
/// Per-operation namespace holding response declarations.
pub const RESPONSES_NAMESPACE: &str = "Responses";

const REF_PREFIX: &str = "#/definitions/";

/// Compiles a Swagger 2 document into `Definitions` and `Paths` namespaces.
///
/// Both namespaces are emitted as ambient (`declare namespace`) with
/// unexported operation namespaces, matching what the post-processor expects
/// to rewrite.
///
/// # Errors
///
/// Returns [`Error::ResourceNotFound`] when a schema references a definition
/// that does not exist.
pub fn to_type_namespaces(
    document: &SpecDocument,
    convertor: &dyn TypeNameConvertor,
) -> Result<DeclarationFile> {
    let refs = definition_names(document, convertor);
    let compiler = SchemaCompiler { refs: &refs };

    let mut definitions = Namespace::new(DEFINITIONS_NAMESPACE);
    definitions.modifiers.declare = true;
    for (key, schema) in &document.definitions {
        let name = &refs[key];
        let item = compiler
            .declaration(name, schema)
            .inspect_err(|_| tracing::debug!("Failed to compile definition {}", key))?;
        definitions.items.push(item);
    }

    let mut paths = Namespace::new(PATHS_NAMESPACE);
    paths.modifiers.declare = true;
    let mut seen = BTreeSet::new();
    for (path, item) in &document.paths {
        for (verb, operation) in item.operations() {
            let default_name = default_operation_name(path, verb, operation);
            let name = leaf(
                convertor,
                vec![PATHS_NAMESPACE.to_string(), default_name.clone()],
            );
            if !seen.insert(name.clone()) {
                tracing::warn!(
                    "Skipping {} {}: operation namespace {} already generated",
                    verb.to_uppercase(),
                    path,
                    name
                );
                continue;
            }

            let responses = compiler.responses(convertor, &default_name, operation)?;
            let mut op = Namespace::new(name.clone());
            op.items.push(Item::Namespace(responses));
            paths.items.push(Item::Namespace(op));
            tracing::debug!("Compiled operation {} ({} {})", name, verb.to_uppercase(), path);
        }
    }

    tracing::info!(
        "Compiled {} operations and {} definitions",
        paths.items.len(),
        definitions.items.len()
    );

    Ok(DeclarationFile {
        items: vec![Item::Namespace(definitions), Item::Namespace(paths)],
    })
}

/// Final declaration name for every definition key.
///
/// When the convertor maps two keys to the same name, later keys keep their
/// default name so both declarations survive.
fn definition_names(
    document: &SpecDocument,
    convertor: &dyn TypeNameConvertor,
) -> BTreeMap<String, String> {
    let mut taken = BTreeSet::new();
    let mut names = BTreeMap::new();

    for key in document.definitions.keys() {
        let default_name = pascal_name(key);
        let converted = leaf(
            convertor,
            vec![DEFINITIONS_NAMESPACE.to_string(), default_name.clone()],
        );

        let mut name = converted.clone();
        if taken.contains(&name) {
            name = default_name;
            let mut suffix = 2;
            while taken.contains(&name) {
                name = format!("{}{suffix}", pascal_name(key));
                suffix += 1;
            }
            tracing::warn!(
                "Definition {} would be named {} which is already used; keeping {}",
                key,
                converted,
                name
            );
        }
        taken.insert(name.clone());
        names.insert(key.clone(), name);
    }

    names
}

fn default_operation_name(path: &str, verb: &str, operation: &Operation) -> String {
    operation.operation_id.as_deref().map_or_else(
        || pascal_name(&format!("{verb} {path}")),
        pascal_name,
    )
}

/// Joins the identifier runs of `raw`, upper-casing only the first character
/// of each, so `files_getUploadURLExternal` becomes
/// `FilesGetUploadURLExternal` exactly as the SDK path `files.getUploadURLExternal`
/// does.
fn pascal_name(raw: &str) -> String {
    let parts: Vec<&str> = raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect();
    to_operation_name(&parts)
}

fn default_response_name(code: &str) -> String {
    if code == "default" {
        "Default".to_string()
    } else {
        format!("${code}")
    }
}

/// Converts a name path and returns its last component.
fn leaf(convertor: &dyn TypeNameConvertor, names: Vec<String>) -> String {
    let fallback = names.last().cloned().unwrap_or_default();
    let index = names.len().saturating_sub(1);
    convertor
        .convert(names)
        .into_iter()
        .nth(index)
        .unwrap_or(fallback)
}

struct SchemaCompiler<'a> {
    refs: &'a BTreeMap<String, String>,
}

impl SchemaCompiler<'_> {
    fn responses(
        &self,
        convertor: &dyn TypeNameConvertor,
        operation_name: &str,
        operation: &Operation,
    ) -> Result<Namespace> {
        let mut namespace = Namespace::new(RESPONSES_NAMESPACE);
        for (code, response) in &operation.responses {
            let name = leaf(
                convertor,
                vec![
                    PATHS_NAMESPACE.to_string(),
                    operation_name.to_string(),
                    RESPONSES_NAMESPACE.to_string(),
                    default_response_name(code),
                ],
            );
            let item = match &response.schema {
                Some(schema) => self.declaration(&name, schema)?,
                None => Item::Interface(Interface {
                    modifiers: Modifiers::exported(),
                    ..Interface::new(name)
                }),
            };
            namespace.items.push(item);
        }
        Ok(namespace)
    }

    /// Interface for plain object schemas, type alias for everything else.
    fn declaration(&self, name: &str, schema: &Value) -> Result<Item> {
        if let Some(object) = schema.as_object().filter(|o| is_plain_object(o)) {
            return Ok(Item::Interface(Interface {
                modifiers: Modifiers::exported(),
                members: self.members(object)?,
                ..Interface::new(name)
            }));
        }

        Ok(Item::TypeAlias(TypeAlias {
            modifiers: Modifiers::exported(),
            name: name.to_string(),
            type_params: None,
            ty: self.type_of(schema)?,
        }))
    }

    fn type_of(&self, schema: &Value) -> Result<TypeExpr> {
        let Some(object) = schema.as_object() else {
            return Ok(any());
        };

        if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
            return self.resolve(reference).map(TypeExpr::Raw);
        }
        if let Some(values) = object.get("enum").and_then(Value::as_array) {
            let literals: Vec<String> = values.iter().map(Value::to_string).collect();
            return Ok(TypeExpr::Raw(literals.join(" | ")));
        }
        if let Some(parts) = object.get("allOf").and_then(Value::as_array) {
            return self.combine(parts, " & ");
        }
        if let Some(parts) = object
            .get("anyOf")
            .or_else(|| object.get("oneOf"))
            .and_then(Value::as_array)
        {
            return self.combine(parts, " | ");
        }

        match object.get("type") {
            Some(Value::String(ty)) => self.primitive(ty, object),
            Some(Value::Array(types)) => {
                let mut parts = Vec::with_capacity(types.len());
                for ty in types.iter().filter_map(Value::as_str) {
                    parts.push(print_inline(&self.primitive(ty, object)?));
                }
                Ok(TypeExpr::Raw(parts.join(" | ")))
            }
            _ if is_plain_object(object) => Ok(TypeExpr::Object(self.members(object)?)),
            _ => Ok(any()),
        }
    }

    fn primitive(&self, ty: &str, object: &Map<String, Value>) -> Result<TypeExpr> {
        let text = match ty {
            "string" => "string".to_string(),
            "integer" | "number" => "number".to_string(),
            "boolean" => "boolean".to_string(),
            "null" => "null".to_string(),
            "array" => match object.get("items") {
                Some(items) => {
                    let inner = print_inline(&self.type_of(items)?);
                    if inner.contains(" | ") || inner.contains(" & ") {
                        format!("({inner})[]")
                    } else {
                        format!("{inner}[]")
                    }
                }
                None => "any[]".to_string(),
            },
            "object" => return Ok(TypeExpr::Object(self.members(object)?)),
            _ => "any".to_string(),
        };
        Ok(TypeExpr::Raw(text))
    }

    fn combine(&self, parts: &[Value], separator: &str) -> Result<TypeExpr> {
        if parts.is_empty() {
            return Ok(any());
        }
        let mut rendered = Vec::with_capacity(parts.len());
        for part in parts {
            let text = print_inline(&self.type_of(part)?);
            if separator == " & " && text.contains(" | ") {
                rendered.push(format!("({text})"));
            } else {
                rendered.push(text);
            }
        }
        Ok(TypeExpr::Raw(rendered.join(separator)))
    }

    /// Object members: declared properties, then the index signature unless
    /// additional properties are forbidden.
    fn members(&self, object: &Map<String, Value>) -> Result<Vec<Member>> {
        let required: BTreeSet<&str> = object
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut members = Vec::new();
        if let Some(properties) = object.get("properties").and_then(Value::as_object) {
            for (name, schema) in properties {
                members.push(Member::Property(Property {
                    name: property_name(name),
                    optional: !required.contains(name.as_str()),
                    readonly: false,
                    ty: self.type_of(schema)?,
                }));
            }
        }

        let value_type = match object.get("additionalProperties") {
            Some(Value::Bool(false)) => None,
            Some(schema @ Value::Object(_)) => Some(self.type_of(schema)?),
            _ => Some(any()),
        };
        if let Some(value_type) = value_type {
            members.push(Member::Index(IndexSignature {
                readonly: false,
                key: "name".to_string(),
                key_type: "string".to_string(),
                value_type,
            }));
        }

        Ok(members)
    }

    fn resolve(&self, reference: &str) -> Result<String> {
        let name = reference
            .strip_prefix(REF_PREFIX)
            .map(|key| key.replace("~1", "/").replace("~0", "~"))
            .and_then(|key| self.refs.get(&key));

        name.map(|name| format!("{DEFINITIONS_NAMESPACE}.{name}"))
            .ok_or_else(|| Error::ResourceNotFound {
                resource: format!("schema reference {reference}"),
            })
    }
}

fn any() -> TypeExpr {
    TypeExpr::Raw("any".to_string())
}

/// Object schema without combinators, declarable as an interface.
fn is_plain_object(object: &Map<String, Value>) -> bool {
    let combinator = ["$ref", "enum", "allOf", "anyOf", "oneOf"]
        .iter()
        .any(|key| object.contains_key(*key));
    if combinator {
        return false;
    }
    match object.get("type") {
        Some(Value::String(ty)) => ty == "object",
        Some(_) => false,
        None => object.contains_key("properties") || object.contains_key("additionalProperties"),
    }
}

fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}
