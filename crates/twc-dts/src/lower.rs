//! Lowering from the swc syntax tree to the declaration model.
//!
//! Namespaces, interfaces, type aliases and classes become structured items.
//! Every other statement is kept as its source text. Types stay text except
//! object literal types, which the SDK uses to declare its callable surface.

use crate::model::{
    Accessibility, Body, CallSignature, Class, ClassMember, ClassMethod, ClassProperty,
    Constructor, DeclarationFile, IndexSignature, Interface, Item, Member, MethodSignature,
    Modifiers, Namespace, Parameter, Property, TypeAlias, TypeExpr,
};
use crate::parser::SourceModule;
use swc_common::{Span, Spanned};
use swc_ecma_ast as ast;
use swc_ecma_ast::{
    Decl, DefaultDecl, Expr, MethodKind, ModuleDecl, ModuleItem, ParamOrTsParamProp, Pat, Stmt,
    TsFnParam, TsModuleName, TsNamespaceBody, TsParamPropParam, TsType, TsTypeAnn,
    TsTypeElement,
};

pub fn lower_module(source: &SourceModule) -> DeclarationFile {
    let lowering = Lowering { source };
    DeclarationFile {
        items: lowering.items(&source.module().body),
    }
}

struct Lowering<'a> {
    source: &'a SourceModule,
}

impl Lowering<'_> {
    fn items(&self, body: &[ModuleItem]) -> Vec<Item> {
        body.iter().map(|item| self.item(item)).collect()
    }

    fn item(&self, item: &ModuleItem) -> Item {
        let lowered = match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                self.decl(&export.decl, Modifiers::exported())
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                let modifiers = Modifiers {
                    default: true,
                    ..Modifiers::exported()
                };
                match &export.decl {
                    DefaultDecl::TsInterfaceDecl(iface) => {
                        Some(Item::Interface(self.interface(iface, modifiers)))
                    }
                    DefaultDecl::Class(class) => class.ident.as_ref().map(|ident| {
                        Item::Class(self.class(ident.sym.to_string(), &class.class, modifiers))
                    }),
                    DefaultDecl::Fn(_) => None,
                }
            }
            ModuleItem::Stmt(Stmt::Decl(decl)) => self.decl(decl, Modifiers::default()),
            _ => None,
        };
        lowered.unwrap_or_else(|| {
            Item::Verbatim(self.source.statement_text(item.span()).to_string())
        })
    }

    fn decl(&self, decl: &Decl, modifiers: Modifiers) -> Option<Item> {
        match decl {
            Decl::TsModule(module) => {
                let TsModuleName::Ident(id) = &module.id else {
                    return None;
                };
                if module.global {
                    return None;
                }
                let modifiers = Modifiers {
                    declare: module.declare,
                    ..modifiers
                };
                let items = module
                    .body
                    .as_ref()
                    .map(|body| self.namespace_body(body))?;
                Some(Item::Namespace(Namespace {
                    modifiers,
                    name: id.sym.to_string(),
                    items,
                }))
            }
            Decl::TsInterface(iface) => Some(Item::Interface(self.interface(
                iface,
                Modifiers {
                    declare: iface.declare,
                    ..modifiers
                },
            ))),
            Decl::TsTypeAlias(alias) => Some(Item::TypeAlias(TypeAlias {
                modifiers: Modifiers {
                    declare: alias.declare,
                    ..modifiers
                },
                name: alias.id.sym.to_string(),
                type_params: alias.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
                ty: self.ty(&alias.type_ann),
            })),
            Decl::Class(class) => Some(Item::Class(self.class(
                class.ident.sym.to_string(),
                &class.class,
                Modifiers {
                    declare: class.declare,
                    ..modifiers
                },
            ))),
            _ => None,
        }
    }

    /// Items of a namespace block; `namespace A.B {}` nests `B` inside `A`
    /// as an exported namespace.
    fn namespace_body(&self, body: &TsNamespaceBody) -> Vec<Item> {
        match body {
            TsNamespaceBody::TsModuleBlock(block) => self.items(&block.body),
            TsNamespaceBody::TsNamespaceDecl(inner) => vec![Item::Namespace(Namespace {
                modifiers: Modifiers::exported(),
                name: inner.id.sym.to_string(),
                items: self.namespace_body(&inner.body),
            })],
        }
    }

    fn interface(&self, iface: &ast::TsInterfaceDecl, modifiers: Modifiers) -> Interface {
        Interface {
            modifiers,
            name: iface.id.sym.to_string(),
            type_params: iface.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
            extends: iface
                .extends
                .iter()
                .map(|parent| self.source.type_text(parent.span))
                .collect(),
            members: self.members(&iface.body.body),
        }
    }

    fn class(&self, name: String, class: &ast::Class, modifiers: Modifiers) -> Class {
        let mut heritage = Vec::new();
        if let Some(parent) = &class.super_class {
            let args = class
                .super_type_params
                .as_ref()
                .map(|args| self.source.type_text(args.span))
                .unwrap_or_default();
            heritage.push(format!("extends {}{args}", self.source.type_text(parent.span())));
        }
        if !class.implements.is_empty() {
            let implements: Vec<String> = class
                .implements
                .iter()
                .map(|iface| self.source.type_text(iface.span))
                .collect();
            heritage.push(format!("implements {}", implements.join(", ")));
        }

        Class {
            modifiers,
            is_abstract: class.is_abstract,
            name,
            type_params: class.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
            heritage: (!heritage.is_empty()).then(|| heritage.join(" ")),
            members: class
                .body
                .iter()
                .filter_map(|member| self.class_member(member))
                .collect(),
        }
    }

    fn class_member(&self, member: &ast::ClassMember) -> Option<ClassMember> {
        match member {
            ast::ClassMember::ClassProp(prop) => Some(ClassMember::Property(ClassProperty {
                accessibility: prop.accessibility.map(accessibility),
                is_static: prop.is_static,
                readonly: prop.readonly,
                name: self.source.type_text(prop.key.span()),
                optional: prop.is_optional,
                ty: self.annotation(prop.type_ann.as_deref()),
                initializer: prop.value.as_ref().map(|value| self.source.type_text(value.span())),
            })),
            ast::ClassMember::PrivateProp(prop) => Some(ClassMember::Property(ClassProperty {
                accessibility: prop.accessibility.map(accessibility),
                is_static: prop.is_static,
                readonly: prop.readonly,
                name: self.private_name(prop.key.span),
                optional: prop.is_optional,
                ty: self.annotation(prop.type_ann.as_deref()),
                initializer: prop.value.as_ref().map(|value| self.source.type_text(value.span())),
            })),
            ast::ClassMember::Constructor(ctor) => Some(ClassMember::Constructor(Constructor {
                accessibility: ctor.accessibility.map(accessibility),
                params: ctor
                    .params
                    .iter()
                    .map(|param| match param {
                        ParamOrTsParamProp::Param(param) => self.pat(&param.pat),
                        ParamOrTsParamProp::TsParamProp(prop) => self.param_prop(prop),
                    })
                    .collect(),
                body: ctor.body.as_ref().map(|block| self.body(block.span)),
            })),
            ast::ClassMember::Method(method) => {
                let name = self.source.type_text(method.key.span());
                Some(ClassMember::Method(self.class_method(
                    accessor_name(method.kind, name),
                    method.accessibility,
                    method.is_static,
                    method.is_abstract,
                    &method.function,
                )))
            }
            ast::ClassMember::PrivateMethod(method) => {
                let name = self.private_name(method.key.span);
                Some(ClassMember::Method(self.class_method(
                    accessor_name(method.kind, name),
                    method.accessibility,
                    method.is_static,
                    method.is_abstract,
                    &method.function,
                )))
            }
            ast::ClassMember::TsIndexSignature(sig) => self
                .index_signature(&sig.params, sig.type_ann.as_deref(), sig.readonly)
                .map(ClassMember::Index),
            _ => None,
        }
    }

    fn class_method(
        &self,
        name: String,
        visibility: Option<ast::Accessibility>,
        is_static: bool,
        is_abstract: bool,
        function: &ast::Function,
    ) -> ClassMethod {
        ClassMethod {
            accessibility: visibility.map(accessibility),
            is_static,
            is_abstract,
            is_async: function.is_async,
            name,
            type_params: function.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
            params: function.params.iter().map(|param| self.pat(&param.pat)).collect(),
            return_type: self.annotation(function.return_type.as_deref()),
            body: function.body.as_ref().map(|block| self.body(block.span)),
        }
    }

    fn members(&self, members: &[TsTypeElement]) -> Vec<Member> {
        members.iter().filter_map(|member| self.member(member)).collect()
    }

    fn member(&self, member: &TsTypeElement) -> Option<Member> {
        match member {
            TsTypeElement::TsPropertySignature(prop) => Some(Member::Property(Property {
                name: self.key(&prop.key, prop.computed),
                optional: prop.optional,
                readonly: prop.readonly,
                ty: self
                    .annotation(prop.type_ann.as_deref())
                    .unwrap_or_else(|| TypeExpr::from("any")),
            })),
            TsTypeElement::TsIndexSignature(sig) => self
                .index_signature(&sig.params, sig.type_ann.as_deref(), sig.readonly)
                .map(Member::Index),
            TsTypeElement::TsMethodSignature(method) => Some(Member::Method(MethodSignature {
                name: self.key(&method.key, method.computed),
                optional: method.optional,
                type_params: method.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
                params: self.fn_params(&method.params),
                return_type: self.annotation(method.type_ann.as_deref()),
            })),
            TsTypeElement::TsCallSignatureDecl(call) => Some(Member::Call(CallSignature {
                type_params: call.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
                params: self.fn_params(&call.params),
                return_type: self.annotation(call.type_ann.as_deref()),
            })),
            TsTypeElement::TsConstructSignatureDecl(ctor) => Some(Member::Method(MethodSignature {
                name: "new".to_string(),
                optional: false,
                type_params: ctor.type_params.as_ref().map(|tp| self.source.type_text(tp.span)),
                params: self.fn_params(&ctor.params),
                return_type: self.annotation(ctor.type_ann.as_deref()),
            })),
            TsTypeElement::TsGetterSignature(getter) => Some(Member::Method(MethodSignature {
                name: format!("get {}", self.key(&getter.key, getter.computed)),
                optional: false,
                type_params: None,
                params: Vec::new(),
                return_type: self.annotation(getter.type_ann.as_deref()),
            })),
            TsTypeElement::TsSetterSignature(setter) => Some(Member::Method(MethodSignature {
                name: format!("set {}", self.key(&setter.key, setter.computed)),
                optional: false,
                type_params: None,
                params: vec![self.fn_param(&setter.param)],
                return_type: None,
            })),
        }
    }

    fn index_signature(
        &self,
        params: &[TsFnParam],
        type_ann: Option<&TsTypeAnn>,
        readonly: bool,
    ) -> Option<IndexSignature> {
        let [TsFnParam::Ident(key)] = params else {
            return None;
        };
        Some(IndexSignature {
            readonly,
            key: key.id.sym.to_string(),
            key_type: key
                .type_ann
                .as_ref()
                .map_or_else(|| "string".to_string(), |ann| self.source.type_text(ann.type_ann.span())),
            value_type: self.annotation(type_ann).unwrap_or_else(|| TypeExpr::from("any")),
        })
    }

    fn key(&self, key: &Expr, computed: bool) -> String {
        let text = self.source.type_text(key.span());
        if computed { format!("[{text}]") } else { text }
    }

    fn private_name(&self, span: Span) -> String {
        let text = self.source.type_text(span);
        if text.starts_with('#') { text } else { format!("#{text}") }
    }

    fn fn_params(&self, params: &[TsFnParam]) -> Vec<Parameter> {
        params.iter().map(|param| self.fn_param(param)).collect()
    }

    fn fn_param(&self, param: &TsFnParam) -> Parameter {
        match param {
            TsFnParam::Ident(ident) => self.binding_ident(ident),
            TsFnParam::Rest(rest) => self.rest(rest),
            TsFnParam::Array(array) => {
                self.destructured(array.span, array.optional, array.type_ann.as_deref())
            }
            TsFnParam::Object(object) => {
                self.destructured(object.span, object.optional, object.type_ann.as_deref())
            }
        }
    }

    fn pat(&self, pat: &Pat) -> Parameter {
        match pat {
            Pat::Ident(ident) => self.binding_ident(ident),
            Pat::Rest(rest) => self.rest(rest),
            Pat::Array(array) => {
                self.destructured(array.span, array.optional, array.type_ann.as_deref())
            }
            Pat::Object(object) => {
                self.destructured(object.span, object.optional, object.type_ann.as_deref())
            }
            Pat::Assign(assign) => Parameter {
                initializer: Some(self.source.type_text(assign.right.span())),
                ..self.pat(&assign.left)
            },
            other => Parameter {
                pattern: self.source.type_text(other.span()),
                ..Parameter::default()
            },
        }
    }

    fn param_prop(&self, prop: &ast::TsParamProp) -> Parameter {
        let mut modifiers = Vec::new();
        if let Some(visibility) = prop.accessibility {
            modifiers.push(accessibility(visibility).as_str().to_string());
        }
        if prop.is_override {
            modifiers.push("override".to_string());
        }
        if prop.readonly {
            modifiers.push("readonly".to_string());
        }
        let param = match &prop.param {
            TsParamPropParam::Ident(ident) => self.binding_ident(ident),
            TsParamPropParam::Assign(assign) => Parameter {
                initializer: Some(self.source.type_text(assign.right.span())),
                ..self.pat(&assign.left)
            },
        };
        Parameter { modifiers, ..param }
    }

    fn binding_ident(&self, ident: &ast::BindingIdent) -> Parameter {
        Parameter {
            pattern: ident.id.sym.to_string(),
            optional: ident.id.optional,
            ty: self.annotation(ident.type_ann.as_deref()),
            ..Parameter::default()
        }
    }

    fn rest(&self, rest: &ast::RestPat) -> Parameter {
        let binding = self.pat(&rest.arg);
        Parameter {
            pattern: format!("...{}", binding.pattern),
            ty: self.annotation(rest.type_ann.as_deref()).or(binding.ty),
            ..Parameter::default()
        }
    }

    /// Destructuring pattern text, without its `?` marker or annotation.
    fn destructured(&self, span: Span, optional: bool, type_ann: Option<&TsTypeAnn>) -> Parameter {
        let end = type_ann.map_or(span.hi, |ann| ann.span.lo.min(span.hi));
        let text = self.source.type_text(Span::new(span.lo, end));
        let pattern = text.trim_end().trim_end_matches([':', '?']).trim_end().to_string();
        Parameter {
            pattern,
            optional,
            ty: self.annotation(type_ann),
            ..Parameter::default()
        }
    }

    fn annotation(&self, ann: Option<&TsTypeAnn>) -> Option<TypeExpr> {
        ann.map(|ann| self.ty(&ann.type_ann))
    }

    fn ty(&self, ty: &TsType) -> TypeExpr {
        match ty {
            TsType::TsTypeLit(lit) => TypeExpr::Object(self.members(&lit.members)),
            other => TypeExpr::Raw(self.source.type_text(other.span())),
        }
    }

    /// Statement lines between the braces of a block.
    fn body(&self, span: Span) -> Body {
        let text = self.source.text(span);
        let inner = text
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(text);
        Body::from_source(inner)
    }
}

/// Prefixes accessor names with their `get` or `set` keyword.
fn accessor_name(kind: MethodKind, name: String) -> String {
    match kind {
        MethodKind::Getter => format!("get {name}"),
        MethodKind::Setter => format!("set {name}"),
        MethodKind::Method => name,
    }
}

const fn accessibility(visibility: ast::Accessibility) -> Accessibility {
    match visibility {
        ast::Accessibility::Public => Accessibility::Public,
        ast::Accessibility::Protected => Accessibility::Protected,
        ast::Accessibility::Private => Accessibility::Private,
    }
}
