//! Reads the vendored SDK declaration file.
//!
//! Two things are extracted: the names of the exported argument interfaces
//! and the client surface, i.e. the object graph hanging off the client
//! class's instance properties. Both work directly on the swc syntax tree.

use crate::surface::{ClientSurface, SurfaceNode, SurfaceValue};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use swc_common::Spanned;
use swc_ecma_ast::{
    Accessibility, ClassDecl, ClassMember, Decl, Expr, ModuleDecl, ModuleItem, Stmt,
    TsEntityName, TsInterfaceDecl, TsType, TsTypeAliasDecl, TsTypeElement, TsTypeRef,
};
use twc_core::{ArgumentTypeName, Error, Result};
use twc_dts::SourceModule;

/// Names of all exported, non-default top-level interfaces.
///
/// Declaration order is preserved.
#[must_use]
pub fn argument_type_names(module: &SourceModule) -> Vec<ArgumentTypeName> {
    module
        .module()
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
                Decl::TsInterface(iface) => Some(ArgumentTypeName::new(iface.id.sym.to_string())),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Builds the client surface from the class (or interface) `client_class`.
///
/// Only public instance properties are part of the surface; class methods
/// live on the prototype and are not enumerated. Property types resolve as
/// follows:
///
/// - an object literal becomes a fresh node
/// - a reference to a top-level interface or object alias becomes a node
///   shared by every property with that type
/// - a function type, an interface with a call signature or an unresolved
///   `...Method` reference becomes a method
/// - anything else is a plain value
///
/// # Errors
///
/// Returns [`Error::ResourceNotFound`] if neither a class nor an interface
/// called `client_class` is declared at the top level.
pub fn build_surface(module: &SourceModule, client_class: &str) -> Result<ClientSurface> {
    let declarations = Declarations::collect(module);
    let mut builder = SurfaceBuilder::new(module, &declarations);

    let root = if let Some(class) = declarations.classes.get(client_class) {
        let members = class
            .class
            .body
            .iter()
            .filter_map(|member| match member {
                ClassMember::ClassProp(prop)
                    if !prop.is_static
                        && !matches!(
                            prop.accessibility,
                            Some(Accessibility::Private | Accessibility::Protected)
                        ) =>
                {
                    Some(prop)
                }
                _ => None,
            })
            .map(|prop| {
                let value = prop.type_ann.as_ref().map_or_else(
                    || SurfaceValue::value("any"),
                    |ann| builder.value_of(&ann.type_ann),
                );
                (unquote(module.text(prop.key.span())), value)
            })
            .collect();
        SurfaceNode::new(members)
    } else if let Some(iface) = declarations.interfaces.get(client_class) {
        builder.interface_node(iface)
    } else {
        return Err(Error::ResourceNotFound {
            resource: format!("client class {client_class}"),
        });
    };

    tracing::debug!(
        "Client {} has {} top-level members, {} shared named types",
        client_class,
        root.members().len(),
        builder.named.len()
    );
    Ok(ClientSurface::new(Rc::new(root)))
}

/// Top-level declarations by name; the first declaration of a name wins.
#[derive(Default)]
struct Declarations<'m> {
    classes: HashMap<String, &'m ClassDecl>,
    interfaces: HashMap<String, &'m TsInterfaceDecl>,
    aliases: HashMap<String, &'m TsTypeAliasDecl>,
}

impl<'m> Declarations<'m> {
    fn collect(module: &'m SourceModule) -> Self {
        let mut declarations = Self::default();
        for item in &module.module().body {
            let decl = match item {
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
                ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
                _ => continue,
            };
            match decl {
                Decl::Class(class) => {
                    declarations
                        .classes
                        .entry(class.ident.sym.to_string())
                        .or_insert(class);
                }
                Decl::TsInterface(iface) => {
                    declarations
                        .interfaces
                        .entry(iface.id.sym.to_string())
                        .or_insert(&**iface);
                }
                Decl::TsTypeAlias(alias) => {
                    declarations
                        .aliases
                        .entry(alias.id.sym.to_string())
                        .or_insert(&**alias);
                }
                _ => {}
            }
        }
        declarations
    }
}

struct SurfaceBuilder<'a> {
    module: &'a SourceModule,
    declarations: &'a Declarations<'a>,
    named: HashMap<String, Rc<SurfaceNode>>,
    in_progress: HashSet<String>,
}

impl<'a> SurfaceBuilder<'a> {
    fn new(module: &'a SourceModule, declarations: &'a Declarations<'a>) -> Self {
        Self {
            module,
            declarations,
            named: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn value_of(&mut self, ty: &TsType) -> SurfaceValue {
        match ty {
            TsType::TsTypeLit(lit) => SurfaceValue::Object(Rc::new(self.members_node(&lit.members))),
            TsType::TsParenthesizedType(inner) => self.value_of(&inner.type_ann),
            TsType::TsFnOrConstructorType(_) => SurfaceValue::method(self.module.type_text(ty.span())),
            TsType::TsTypeRef(reference) => self.value_of_reference(reference),
            other => SurfaceValue::value(self.module.type_text(other.span())),
        }
    }

    fn value_of_reference(&mut self, reference: &TsTypeRef) -> SurfaceValue {
        let text = self.module.type_text(reference.span);
        let name = match &reference.type_name {
            TsEntityName::Ident(ident) => ident.sym.to_string(),
            qualified @ TsEntityName::TsQualifiedName(_) => self.module.type_text(qualified.span()),
        };
        if let Some(node) = self.named.get(&name) {
            return SurfaceValue::Object(Rc::clone(node));
        }
        if self.in_progress.contains(&name) {
            return SurfaceValue::value(text);
        }

        let declarations = self.declarations;
        if let Some(iface) = declarations.interfaces.get(&name) {
            let callable = iface
                .body
                .body
                .iter()
                .any(|member| matches!(member, TsTypeElement::TsCallSignatureDecl(_)));
            if callable {
                return SurfaceValue::method(text);
            }
            return self.shared(&name, |builder| builder.interface_node(iface));
        }
        if let Some(alias) = declarations.aliases.get(&name) {
            if let TsType::TsTypeLit(lit) = &*alias.type_ann {
                return self.shared(&name, |builder| builder.members_node(&lit.members));
            }
            self.in_progress.insert(name.clone());
            let value = self.value_of(&alias.type_ann);
            self.in_progress.remove(&name);
            return match value {
                SurfaceValue::Method { .. } => SurfaceValue::method(text),
                SurfaceValue::Value { .. } => SurfaceValue::value(text),
                object @ SurfaceValue::Object(_) => object,
            };
        }
        if name.ends_with("Method") {
            return SurfaceValue::method(text);
        }
        SurfaceValue::value(text)
    }

    fn shared<F>(&mut self, name: &str, build: F) -> SurfaceValue
    where
        F: FnOnce(&mut Self) -> SurfaceNode,
    {
        self.in_progress.insert(name.to_string());
        let node = Rc::new(build(self));
        self.in_progress.remove(name);
        self.named.insert(name.to_string(), Rc::clone(&node));
        SurfaceValue::Object(node)
    }

    /// Own members followed by members inherited through `extends`.
    fn interface_node(&mut self, iface: &TsInterfaceDecl) -> SurfaceNode {
        let mut members = self.members_node(&iface.body.body).into_members();
        let declarations = self.declarations;
        for parent in &iface.extends {
            let Expr::Ident(ident) = &*parent.expr else {
                continue;
            };
            let base = ident.sym.to_string();
            if self.in_progress.contains(&base) {
                continue;
            }
            if let Some(parent) = declarations.interfaces.get(&base) {
                self.in_progress.insert(base.clone());
                let inherited = self.interface_node(parent).into_members();
                self.in_progress.remove(&base);
                for (name, value) in inherited {
                    if !members.iter().any(|(own, _)| *own == name) {
                        members.push((name, value));
                    }
                }
            }
        }
        SurfaceNode::new(members)
    }

    fn members_node(&mut self, members: &[TsTypeElement]) -> SurfaceNode {
        let members = members
            .iter()
            .filter_map(|member| match member {
                TsTypeElement::TsPropertySignature(prop) => {
                    let value = prop.type_ann.as_ref().map_or_else(
                        || SurfaceValue::value("any"),
                        |ann| self.value_of(&ann.type_ann),
                    );
                    Some((unquote(self.module.text(prop.key.span())), value))
                }
                TsTypeElement::TsMethodSignature(method) => {
                    let name = unquote(self.module.text(method.key.span()));
                    Some((name.clone(), SurfaceValue::method(name)))
                }
                _ => None,
            })
            .collect();
        SurfaceNode::new(members)
    }
}

fn unquote(name: &str) -> String {
    name.trim_matches(|ch| ch == '\'' || ch == '"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(source: &str) -> SourceModule {
        SourceModule::parse("methods.d.ts", source).unwrap()
    }

    fn surface(source: &str) -> ClientSurface {
        build_surface(&module(source), "Methods").unwrap()
    }

    fn method_names(surface: &ClientSurface) -> Vec<String> {
        let mut names: Vec<String> = surface.methods().iter().map(ToString::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_argument_type_names() {
        let module = module(
            "export interface AuthTestArguments {}\n\
             interface Hidden {}\n\
             export default interface Defaulted {}\n\
             export interface ChatPostMessageArguments { channel: string; }",
        );
        let names: Vec<String> = argument_type_names(&module)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["AuthTestArguments", "ChatPostMessageArguments"]);
    }

    #[test]
    fn test_object_literal_properties() {
        let surface = surface(
            "export interface Method<A> { (options?: A): Promise<any>; }\n\
             export declare abstract class Methods {\n\
                 readonly auth: { test: Method<AuthTestArguments>; };\n\
                 readonly admin: { apps: { approve: Method<X>; }; };\n\
             }",
        );
        assert_eq!(method_names(&surface), ["admin.apps.approve", "auth.test"]);
    }

    #[test]
    fn test_class_methods_and_private_fields_excluded() {
        let surface = surface(
            "export declare class Methods {\n\
                 static version: () => string;\n\
                 private secret: () => string;\n\
                 apiCall(method: string): Promise<any>;\n\
                 readonly api: { test: (a?: X) => Promise<Y>; };\n\
             }",
        );
        assert_eq!(method_names(&surface), ["api.test"]);
    }

    #[test]
    fn test_named_type_shared() {
        let surface = surface(
            "interface ListApi { list: ListMethod; }\n\
             export declare class Methods {\n\
                 readonly conversations: ListApi;\n\
                 readonly channels: ListApi;\n\
             }",
        );
        let root = surface.root();
        let (Some(SurfaceValue::Object(a)), Some(SurfaceValue::Object(b))) =
            (root.member("conversations"), root.member("channels"))
        else {
            panic!("expected object members");
        };
        assert!(Rc::ptr_eq(a, b));
        assert_eq!(surface.methods().len(), 1);
    }

    #[test]
    fn test_alias_to_function_is_method() {
        let surface = surface(
            "type Callback = (args: X) => Promise<Y>;\n\
             export declare class Methods { readonly ping: Callback; readonly token: string; }",
        );
        assert_eq!(method_names(&surface), ["ping"]);
    }

    #[test]
    fn test_parenthesized_function_is_method() {
        let surface = surface(
            "export declare class Methods {\n\
                 readonly call: ((a: X) => Promise<Y>);\n\
                 readonly list: Promise<(a: X) => Y>;\n\
             }",
        );
        assert_eq!(method_names(&surface), ["call"]);
    }

    #[test]
    fn test_union_is_a_value() {
        let surface = surface(
            "interface Api { run: RunMethod; }\n\
             export declare class Methods { readonly maybe: Api | undefined; readonly items: Api[]; }",
        );
        assert!(surface.methods().is_empty());
        assert!(matches!(
            surface.root().member("maybe"),
            Some(SurfaceValue::Value { ty }) if ty == "Api | undefined"
        ));
    }

    #[test]
    fn test_generic_reference_resolves_by_name() {
        let surface = surface(
            "interface Paginated<T> { list: Method<T>; }\n\
             export declare class Methods { readonly users: Paginated<UsersListArguments>; }",
        );
        assert_eq!(method_names(&surface), ["users.list"]);
    }

    #[test]
    fn test_quoted_member_names() {
        let surface = surface(
            "export declare class Methods { readonly 'files': { \"upload\": Method<X>; }; }",
        );
        assert_eq!(method_names(&surface), ["files.upload"]);
    }

    #[test]
    fn test_interface_client() {
        let module = module(
            "interface Base { auth: { test: Method<X>; }; }\n\
             interface Client extends Base { chat: { postMessage(args: Y): Promise<Z>; }; }",
        );
        let surface = build_surface(&module, "Client").unwrap();
        assert_eq!(method_names(&surface), ["auth.test", "chat.postMessage"]);
    }

    #[test]
    fn test_recursive_type_terminates() {
        let surface = surface(
            "interface Node { child: Node; run: RunMethod; }\n\
             export declare class Methods { readonly tree: Node; }",
        );
        assert_eq!(method_names(&surface), ["tree.run"]);
    }

    #[test]
    fn test_missing_client_class() {
        let module = module("export interface Other {}");
        let err = build_surface(&module, "Methods").unwrap_err();
        assert!(err.is_not_found());
    }
}
