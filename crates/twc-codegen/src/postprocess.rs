//! Rewrites of the compiled declaration tree.
//!
//! Every step takes a [`DeclarationFile`] by value and returns the rewritten
//! file; [`post_process`] composes them in a fixed order. Each step is safe
//! to apply twice, so running the pipeline again on its own output changes
//! nothing.
//!
//! # Examples
//!
//! ```
//! use twc_codegen::postprocess::{PostProcessOptions, post_process};
//! use twc_dts::{Scope, parse};
//!
//! let compiled = parse(
//!     "compiled.ts",
//!     "declare namespace Definitions { type OkFalse = boolean; }
//!      declare namespace Paths {
//!          namespace AuthTest {
//!              namespace Responses {
//!                  interface Success { ok: boolean; [name: string]: any; }
//!              }
//!          }
//!      }",
//! )
//! .unwrap();
//!
//! let (file, report) = post_process(compiled, None, PostProcessOptions::default()).unwrap();
//! let responses = file
//!     .namespace("Paths")
//!     .and_then(|paths| paths.namespace("AuthTest"))
//!     .and_then(|op| op.namespace("Responses"))
//!     .unwrap();
//!
//! assert_eq!(responses.interface("Success").unwrap().index_signature_count(), 0);
//! assert!(responses.class("SuccessOrErrorPredicate").is_some());
//! assert!(report.collisions.is_empty());
//! ```

use serde::Serialize;
use twc_core::{Error, Result, SuccessCheck};
use twc_dts::{
    Accessibility, Body, Class, ClassMember, ClassMethod, ClassProperty, Constructor,
    DeclarationFile, Interface, Item, Member, Modifiers, Namespace, Parameter, Property, Scope,
    TypeExpr,
};
use twc_schema::{DEFINITIONS_NAMESPACE, PATHS_NAMESPACE, RESPONSES_NAMESPACE};

/// Helper class appended to every `Responses` namespace.
pub const PREDICATE_CLASS: &str = "SuccessOrErrorPredicate";

/// Private field of the predicate class holding the wrapped response.
const PREDICATE_FIELD: &str = "#response";

const SUCCESS: &str = "Success";
const ERROR: &str = "Error";
const OK_TRUE: &str = "OkTrue";
const OK_FALSE: &str = "OkFalse";
const RESPONSE_METADATA_TYPE: &str = "string | object | undefined";

/// Settings for [`post_process`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessOptions {
    /// Semantics of the generated `isSuccess()`
    pub success_check: SuccessCheck,
    /// Treat supplemental name collisions as errors
    pub strict: bool,
}

/// Outcome of merging the supplemental declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Qualified names appended without conflict, e.g. `Definitions.SlashCommands`
    pub appended: Vec<String>,
    /// Qualified names that already existed in the generated tree
    pub collisions: Vec<String>,
}

/// Runs every post-processing step and merges `supplemental`.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if `Paths`, `Definitions` or an
/// operation's `Responses` namespace is absent, and
/// [`Error::NameCollision`] for supplemental collisions in strict mode.
pub fn post_process(
    file: DeclarationFile,
    supplemental: Option<&DeclarationFile>,
    options: PostProcessOptions,
) -> Result<(DeclarationFile, MergeReport)> {
    let file = export_namespaces(file)?;
    let file = add_predicates(file, options.success_check)?;
    let file = strip_index_signatures(file)?;
    let file = close_error_shapes(file)?;
    let file = force_ok_literals(file)?;

    match supplemental {
        Some(supplemental) => merge_supplemental(file, supplemental, options),
        None => Ok((file, MergeReport::default())),
    }
}

/// Exports `Paths`, `Definitions`, every operation namespace, every
/// `Responses` namespace and their declarations, dropping `declare`.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if a required namespace is absent.
pub fn export_namespaces(mut file: DeclarationFile) -> Result<DeclarationFile> {
    let definitions = top_namespace_mut(&mut file, DEFINITIONS_NAMESPACE)?;
    definitions.modifiers = Modifiers::exported();
    definitions.items.iter_mut().for_each(export_item);

    let paths = top_namespace_mut(&mut file, PATHS_NAMESPACE)?;
    paths.modifiers = Modifiers::exported();
    for item in &mut paths.items {
        let Item::Namespace(op) = item else {
            continue;
        };
        op.modifiers = Modifiers::exported();
        let parent = format!("{PATHS_NAMESPACE}.{}", op.name);
        let responses = namespace_mut(op, RESPONSES_NAMESPACE).ok_or_else(|| {
            Error::MissingNamespace {
                namespace: RESPONSES_NAMESPACE.to_string(),
                parent,
            }
        })?;
        responses.modifiers = Modifiers::exported();
        responses.items.iter_mut().for_each(export_item);
    }

    Ok(file)
}

/// Appends one [`PREDICATE_CLASS`] to every `Responses` namespace that does
/// not have it yet, declaring empty `Success` / `Error` interfaces where the
/// specification gave none.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if `Paths` is absent.
pub fn add_predicates(mut file: DeclarationFile, check: SuccessCheck) -> Result<DeclarationFile> {
    for_each_responses(&mut file, |_, responses| decorate_responses(responses, check))?;
    Ok(file)
}

/// Removes index signatures from `Success` and `Error`; declared fields stay.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if `Paths` is absent.
pub fn strip_index_signatures(mut file: DeclarationFile) -> Result<DeclarationFile> {
    for_each_responses(&mut file, |_, responses| {
        for name in [SUCCESS, ERROR] {
            if let Some(iface) = interface_mut(responses, name) {
                iface.members.retain(|member| !matches!(member, Member::Index(_)));
            }
        }
    })?;
    Ok(file)
}

/// Closes every `Error` interface: `ok` is pinned to the always-false type and
/// `response_metadata` is declared.
///
/// A type alias called `Error` is left alone.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if `Paths` or `Definitions` is absent.
pub fn close_error_shapes(mut file: DeclarationFile) -> Result<DeclarationFile> {
    let definitions = top_namespace_mut(&mut file, DEFINITIONS_NAMESPACE)?;
    let ok_false = if definitions.type_alias(OK_FALSE).is_some() {
        format!("{DEFINITIONS_NAMESPACE}.{OK_FALSE}")
    } else {
        "false".to_string()
    };

    for_each_responses(&mut file, |operation, responses| {
        if let Some(error) = interface_mut(responses, ERROR) {
            set_property(error, "ok", &ok_false);
            set_property(error, "response_metadata", RESPONSE_METADATA_TYPE);
        } else {
            tracing::debug!("{}.Responses.Error is not an interface; left as is", operation);
        }
    })?;
    Ok(file)
}

/// Forces `Definitions.OkTrue` / `Definitions.OkFalse` to the literal types
/// `true` / `false`.
///
/// # Errors
///
/// Returns [`Error::MissingNamespace`] if `Definitions` is absent.
pub fn force_ok_literals(mut file: DeclarationFile) -> Result<DeclarationFile> {
    let definitions = top_namespace_mut(&mut file, DEFINITIONS_NAMESPACE)?;
    for item in &mut definitions.items {
        if let Item::TypeAlias(alias) = item {
            match alias.name.as_str() {
                OK_TRUE => alias.ty = TypeExpr::from("true"),
                OK_FALSE => alias.ty = TypeExpr::from("false"),
                _ => {}
            }
        }
    }
    Ok(file)
}

/// Appends the supplemental `Paths` and `Definitions` contents to the
/// generated namespaces of the same name.
///
/// Items whose name already exists are still appended (the declarations merge
/// in the output) but are reported as collisions. New operation namespaces
/// that declare `Responses` get the same predicate as generated ones.
///
/// # Errors
///
/// Returns [`Error::NameCollision`] in strict mode if anything collides, and
/// [`Error::MissingNamespace`] if the generated tree lacks a target namespace.
pub fn merge_supplemental(
    mut file: DeclarationFile,
    supplemental: &DeclarationFile,
    options: PostProcessOptions,
) -> Result<(DeclarationFile, MergeReport)> {
    let mut report = MergeReport::default();

    for top in [PATHS_NAMESPACE, DEFINITIONS_NAMESPACE] {
        let Some(extra) = supplemental.namespace(top) else {
            continue;
        };
        let target = top_namespace_mut(&mut file, top)?;
        let mut collisions = Vec::new();

        for item in &extra.items {
            let mut item = item.clone();
            let colliding = item
                .name()
                .filter(|name| target.count_named(name) > 0)
                .map(str::to_string);

            match colliding {
                Some(name) => {
                    tracing::warn!(
                        "Supplemental {}.{} merges with a generated declaration of the same name",
                        top,
                        name
                    );
                    collisions.push(name);
                }
                None => {
                    if let Some(name) = item.name() {
                        report.appended.push(format!("{top}.{name}"));
                    }
                    if top == PATHS_NAMESPACE
                        && let Item::Namespace(op) = &mut item
                        && let Some(responses) = namespace_mut(op, RESPONSES_NAMESPACE)
                    {
                        decorate_responses(responses, options.success_check);
                    }
                }
            }
            target.items.push(item);
        }

        if options.strict && !collisions.is_empty() {
            return Err(Error::NameCollision {
                namespace: top.to_string(),
                names: collisions,
            });
        }
        report
            .collisions
            .extend(collisions.into_iter().map(|name| format!("{top}.{name}")));
    }

    tracing::info!(
        "Merged supplemental declarations: {} appended, {} collisions",
        report.appended.len(),
        report.collisions.len()
    );
    Ok((file, report))
}

fn decorate_responses(responses: &mut Namespace, check: SuccessCheck) {
    for name in [SUCCESS, ERROR] {
        if responses.count_named(name) == 0 {
            responses.items.push(Item::Interface(Interface {
                modifiers: Modifiers::exported(),
                ..Interface::new(name)
            }));
        }
    }
    if responses.count_named(PREDICATE_CLASS) == 0 {
        responses.items.push(Item::Class(predicate_class(check)));
    }
}

/// ```ts
/// export class SuccessOrErrorPredicate {
///     readonly #response: Success | Error;
///     constructor(response: Success | Error) { this.#response = response; }
///     public isSuccess(): boolean { ... }
/// }
/// ```
///
/// The client copies the response's fields onto the instance; a `#` field is
/// not reachable by those copies.
fn predicate_class(check: SuccessCheck) -> Class {
    let response_type = format!("{SUCCESS} | {ERROR}");
    let field = ClassProperty {
        readonly: true,
        name: PREDICATE_FIELD.to_string(),
        ty: Some(TypeExpr::from(response_type.as_str())),
        ..ClassProperty::default()
    };
    let constructor = Constructor {
        accessibility: None,
        params: vec![Parameter::typed("response", response_type)],
        body: Some(Body::from_lines([format!(
            "this.{PREDICATE_FIELD} = response;"
        )])),
    };
    let is_success = ClassMethod {
        accessibility: Some(Accessibility::Public),
        name: "isSuccess".to_string(),
        return_type: Some(TypeExpr::from("boolean")),
        body: Some(Body::from_lines([format!(
            "return {};",
            check.expression(&format!("this.{PREDICATE_FIELD}"))
        )])),
        ..ClassMethod::default()
    };

    Class {
        modifiers: Modifiers::exported(),
        members: vec![
            ClassMember::Property(field),
            ClassMember::Constructor(constructor),
            ClassMember::Method(is_success),
        ],
        ..Class::new(PREDICATE_CLASS)
    }
}

fn set_property(iface: &mut Interface, name: &str, ty: &str) {
    let existing = iface.members.iter_mut().find_map(|member| match member {
        Member::Property(prop) if prop.name == name => Some(prop),
        _ => None,
    });
    match existing {
        Some(prop) => {
            prop.ty = TypeExpr::from(ty);
            prop.optional = false;
        }
        None => iface
            .members
            .push(Member::Property(Property::new(name, ty))),
    }
}

fn export_item(item: &mut Item) {
    match item {
        Item::Namespace(ns) => ns.modifiers = Modifiers::exported(),
        Item::Interface(iface) => iface.modifiers = Modifiers::exported(),
        Item::TypeAlias(alias) => alias.modifiers = Modifiers::exported(),
        Item::Class(class) => class.modifiers = Modifiers::exported(),
        Item::Verbatim(_) => {}
    }
}

fn for_each_responses<F>(file: &mut DeclarationFile, mut visit: F) -> Result<()>
where
    F: FnMut(&str, &mut Namespace),
{
    let paths = top_namespace_mut(file, PATHS_NAMESPACE)?;
    for item in &mut paths.items {
        if let Item::Namespace(op) = item {
            let operation = op.name.clone();
            if let Some(responses) = namespace_mut(op, RESPONSES_NAMESPACE) {
                visit(&operation, responses);
            }
        }
    }
    Ok(())
}

fn top_namespace_mut<'f>(file: &'f mut DeclarationFile, name: &str) -> Result<&'f mut Namespace> {
    file.items
        .iter_mut()
        .find_map(|item| match item {
            Item::Namespace(ns) if ns.name == name => Some(ns),
            _ => None,
        })
        .ok_or_else(|| Error::MissingNamespace {
            namespace: name.to_string(),
            parent: "<root>".to_string(),
        })
}

fn namespace_mut<'n>(parent: &'n mut Namespace, name: &str) -> Option<&'n mut Namespace> {
    parent.items.iter_mut().find_map(|item| match item {
        Item::Namespace(ns) if ns.name == name => Some(ns),
        _ => None,
    })
}

fn interface_mut<'n>(parent: &'n mut Namespace, name: &str) -> Option<&'n mut Interface> {
    parent.items.iter_mut().find_map(|item| match item {
        Item::Interface(iface) if iface.name == name => Some(iface),
        _ => None,
    })
}
