//! Declaration tree printer.
//!
//! Output uses four-space indentation, one member per line and a blank line
//! between top-level statements. Object literal types in member position are
//! expanded over several lines; inside parameter lists they are printed
//! inline.

use crate::model::{
    Body, ClassMember, DeclarationFile, IndexSignature, Item, Member, Modifiers, Parameter,
    TypeExpr,
};

const INDENT: &str = "    ";

/// Prints a declaration tree as TypeScript source.
///
/// # Examples
///
/// ```
/// use twc_dts::{print, DeclarationFile, Interface, Item, Member, Modifiers, Property};
///
/// let mut success = Interface::new("Success");
/// success.modifiers = Modifiers::exported();
/// success.members.push(Member::Property(Property::new("ok", "true")));
///
/// let file = DeclarationFile { items: vec![Item::Interface(success)] };
/// assert_eq!(print(&file), "export interface Success {\n    ok: true;\n}\n");
/// ```
#[must_use]
pub fn print(file: &DeclarationFile) -> String {
    let mut printer = Printer::default();
    for (index, item) in file.items.iter().enumerate() {
        if index > 0 {
            printer.out.push('\n');
        }
        printer.item(item);
    }
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(&format!("{header} {{"));
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line("}");
    }

    /// Prints `head`, the type, then `tail`, expanding object literals.
    fn typed_line(&mut self, head: &str, ty: &TypeExpr, tail: &str) {
        match ty {
            TypeExpr::Raw(text) => self.line(&format!("{head}{text}{tail}")),
            TypeExpr::Object(members) if members.is_empty() => {
                self.line(&format!("{head}{{}}{tail}"));
            }
            TypeExpr::Object(members) => {
                self.line(&format!("{head}{{"));
                self.depth += 1;
                for member in members {
                    self.member(member);
                }
                self.depth -= 1;
                self.line(&format!("}}{tail}"));
            }
        }
    }

    fn item(&mut self, item: &Item) {
        match item {
            Item::Namespace(ns) => {
                let header = format!("{}namespace {}", prefix(ns.modifiers), ns.name);
                self.block(&header, |p| {
                    for item in &ns.items {
                        p.item(item);
                    }
                });
            }
            Item::Interface(iface) => {
                let mut header = format!(
                    "{}interface {}{}",
                    prefix(iface.modifiers),
                    iface.name,
                    iface.type_params.as_deref().unwrap_or_default()
                );
                if !iface.extends.is_empty() {
                    header.push_str(" extends ");
                    header.push_str(&iface.extends.join(", "));
                }
                self.block(&header, |p| {
                    for member in &iface.members {
                        p.member(member);
                    }
                });
            }
            Item::TypeAlias(alias) => {
                let head = format!(
                    "{}type {}{} = ",
                    prefix(alias.modifiers),
                    alias.name,
                    alias.type_params.as_deref().unwrap_or_default()
                );
                self.typed_line(&head, &alias.ty, ";");
            }
            Item::Class(class) => {
                let mut header = format!(
                    "{}{}class {}{}",
                    prefix(class.modifiers),
                    if class.is_abstract { "abstract " } else { "" },
                    class.name,
                    class.type_params.as_deref().unwrap_or_default()
                );
                if let Some(heritage) = &class.heritage {
                    header.push(' ');
                    header.push_str(heritage);
                }
                self.block(&header, |p| {
                    for member in &class.members {
                        p.class_member(member);
                    }
                });
            }
            Item::Verbatim(text) => {
                for line in text.lines() {
                    self.line(line);
                }
            }
        }
    }

    fn member(&mut self, member: &Member) {
        match member {
            Member::Property(prop) => {
                let head = format!(
                    "{}{}{}: ",
                    if prop.readonly { "readonly " } else { "" },
                    prop.name,
                    if prop.optional { "?" } else { "" }
                );
                self.typed_line(&head, &prop.ty, ";");
            }
            Member::Index(index) => self.index_signature(index),
            Member::Method(method) => {
                let head = format!(
                    "{}{}{}({})",
                    method.name,
                    if method.optional { "?" } else { "" },
                    method.type_params.as_deref().unwrap_or_default(),
                    params(&method.params)
                );
                self.signature_tail(&head, method.return_type.as_ref());
            }
            Member::Call(call) => {
                let head = format!(
                    "{}({})",
                    call.type_params.as_deref().unwrap_or_default(),
                    params(&call.params)
                );
                self.signature_tail(&head, call.return_type.as_ref());
            }
        }
    }

    fn signature_tail(&mut self, head: &str, return_type: Option<&TypeExpr>) {
        match return_type {
            Some(ty) => self.typed_line(&format!("{head}: "), ty, ";"),
            None => self.line(&format!("{head};")),
        }
    }

    fn index_signature(&mut self, index: &IndexSignature) {
        let head = format!(
            "{}[{}: {}]: ",
            if index.readonly { "readonly " } else { "" },
            index.key,
            index.key_type
        );
        self.typed_line(&head, &index.value_type, ";");
    }

    fn class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Index(index) => self.index_signature(index),
            ClassMember::Property(prop) => {
                let mut head = String::new();
                if let Some(access) = prop.accessibility {
                    head.push_str(access.as_str());
                    head.push(' ');
                }
                if prop.is_static {
                    head.push_str("static ");
                }
                if prop.readonly {
                    head.push_str("readonly ");
                }
                head.push_str(&prop.name);
                if prop.optional {
                    head.push('?');
                }
                let tail = prop
                    .initializer
                    .as_ref()
                    .map_or_else(|| ";".to_string(), |init| format!(" = {init};"));
                match &prop.ty {
                    Some(ty) => self.typed_line(&format!("{head}: "), ty, &tail),
                    None => self.line(&format!("{head}{tail}")),
                }
            }
            ClassMember::Constructor(ctor) => {
                let mut signature = String::new();
                if let Some(access) = ctor.accessibility {
                    signature.push_str(access.as_str());
                    signature.push(' ');
                }
                signature.push_str(&format!("constructor({})", params(&ctor.params)));
                self.with_body(&signature, ctor.body.as_ref());
            }
            ClassMember::Method(method) => {
                let mut signature = String::new();
                if let Some(access) = method.accessibility {
                    signature.push_str(access.as_str());
                    signature.push(' ');
                }
                for (flag, keyword) in [
                    (method.is_static, "static "),
                    (method.is_abstract, "abstract "),
                    (method.is_async, "async "),
                ] {
                    if flag {
                        signature.push_str(keyword);
                    }
                }
                signature.push_str(&format!(
                    "{}{}({})",
                    method.name,
                    method.type_params.as_deref().unwrap_or_default(),
                    params(&method.params)
                ));
                if let Some(ty) = &method.return_type {
                    signature.push_str(": ");
                    signature.push_str(&inline_type(ty));
                }
                self.with_body(&signature, method.body.as_ref());
            }
        }
    }

    fn with_body(&mut self, signature: &str, body: Option<&Body>) {
        match body {
            None => self.line(&format!("{signature};")),
            Some(body) if body.lines.is_empty() => self.line(&format!("{signature} {{}}")),
            Some(body) => self.block(signature, |p| {
                for line in &body.lines {
                    p.line(line);
                }
            }),
        }
    }
}

fn prefix(modifiers: Modifiers) -> String {
    let mut out = String::new();
    if modifiers.export {
        out.push_str("export ");
    }
    if modifiers.default {
        out.push_str("default ");
    }
    if modifiers.declare {
        out.push_str("declare ");
    }
    out
}

fn params(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|param| {
            let mut out = String::new();
            for modifier in &param.modifiers {
                out.push_str(modifier);
                out.push(' ');
            }
            out.push_str(&param.pattern);
            if param.optional {
                out.push('?');
            }
            if let Some(ty) = &param.ty {
                out.push_str(": ");
                out.push_str(&inline_type(ty));
            }
            if let Some(init) = &param.initializer {
                out.push_str(" = ");
                out.push_str(init);
            }
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints a type on a single line.
///
/// # Examples
///
/// ```
/// use twc_dts::{Member, Property, TypeExpr, print_inline};
///
/// let ty = TypeExpr::Object(vec![Member::Property(Property::new("id", "string"))]);
/// assert_eq!(print_inline(&ty), "{ id: string }");
/// ```
#[must_use]
pub fn print_inline(ty: &TypeExpr) -> String {
    inline_type(ty)
}

fn inline_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Raw(text) => text.clone(),
        TypeExpr::Object(members) if members.is_empty() => "{}".to_string(),
        TypeExpr::Object(members) => {
            let body: Vec<String> = members.iter().map(inline_member).collect();
            format!("{{ {} }}", body.join("; "))
        }
    }
}

fn inline_member(member: &Member) -> String {
    match member {
        Member::Property(prop) => format!(
            "{}{}{}: {}",
            if prop.readonly { "readonly " } else { "" },
            prop.name,
            if prop.optional { "?" } else { "" },
            inline_type(&prop.ty)
        ),
        Member::Index(index) => format!(
            "{}[{}: {}]: {}",
            if index.readonly { "readonly " } else { "" },
            index.key,
            index.key_type,
            inline_type(&index.value_type)
        ),
        Member::Method(method) => format!(
            "{}{}{}({}){}",
            method.name,
            if method.optional { "?" } else { "" },
            method.type_params.as_deref().unwrap_or_default(),
            params(&method.params),
            inline_return(method.return_type.as_ref())
        ),
        Member::Call(call) => format!(
            "{}({}){}",
            call.type_params.as_deref().unwrap_or_default(),
            params(&call.params),
            inline_return(call.return_type.as_ref())
        ),
    }
}

fn inline_return(ty: Option<&TypeExpr>) -> String {
    ty.map(|ty| format!(": {}", inline_type(ty)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Accessibility, Class, ClassMethod, Constructor, Interface, Namespace, Property, TypeAlias,
    };
    use crate::parse;

    #[test]
    fn test_nested_namespaces() {
        let mut success = Interface::new("Success");
        success.members.push(Member::Property(Property::new("ok", "true")));
        success.members.push(Member::Property(Property {
            optional: true,
            ..Property::new(
                "team",
                TypeExpr::Object(vec![Member::Property(Property::new("id", "string"))]),
            )
        }));

        let mut responses = Namespace::new("Responses");
        responses.items.push(Item::Interface(success));
        let mut paths = Namespace::new("Paths").exported();
        paths.items.push(Item::Namespace(responses));

        let alias = TypeAlias {
            modifiers: Modifiers::exported(),
            name: "OkTrue".into(),
            type_params: None,
            ty: "true".into(),
        };

        let file = DeclarationFile {
            items: vec![Item::Namespace(paths), Item::TypeAlias(alias)],
        };

        assert_eq!(
            print(&file),
            "export namespace Paths {
    namespace Responses {
        interface Success {
            ok: true;
            team?: {
                id: string;
            };
        }
    }
}

export type OkTrue = true;
"
        );
    }

    #[test]
    fn test_class_with_bodies() {
        let mut class = Class::new("SuccessOrErrorPredicate");
        class.modifiers = Modifiers::exported();
        class.members.push(ClassMember::Constructor(Constructor {
            accessibility: None,
            params: vec![Parameter {
                modifiers: vec!["private".into(), "readonly".into()],
                ..Parameter::typed("response", "Success | Error")
            }],
            body: Some(Body::default()),
        }));
        class.members.push(ClassMember::Method(ClassMethod {
            accessibility: Some(Accessibility::Public),
            name: "isSuccess".into(),
            return_type: Some("boolean".into()),
            body: Some(Body::from_lines(["return this.response.ok === true;"])),
            ..ClassMethod::default()
        }));

        let file = DeclarationFile {
            items: vec![Item::Class(class)],
        };
        assert_eq!(
            print(&file),
            "export class SuccessOrErrorPredicate {
    constructor(private readonly response: Success | Error) {}
    public isSuccess(): boolean {
        return this.response.ok === true;
    }
}
"
        );
    }

    #[test]
    fn test_inline_object_parameter() {
        let method = Member::Method(crate::model::MethodSignature {
            name: "list".into(),
            optional: false,
            type_params: None,
            params: vec![Parameter::typed(
                "opts",
                TypeExpr::Object(vec![Member::Property(Property::new("limit", "number"))]),
            )],
            return_type: Some("void".into()),
        });
        assert_eq!(inline_member(&method), "list(opts: { limit: number }): void");
    }

    #[test]
    fn test_verbatim_is_reindented() {
        let mut ns = Namespace::new("Extra");
        ns.items
            .push(Item::Verbatim("enum Color {\n    Red,\n}".into()));
        let file = DeclarationFile {
            items: vec![Item::Namespace(ns)],
        };
        assert_eq!(
            print(&file),
            "namespace Extra {\n    enum Color {\n        Red,\n    }\n}\n"
        );
    }

    #[test]
    fn test_print_then_parse_is_stable() {
        let source = r"
export declare namespace Paths {
    namespace ChatPostMessage {
        namespace Responses {
            interface Success {
                ok: Definitions.OkTrue;
                channel?: string;
                message?: {
                    text?: string;
                    [name: string]: any;
                };
            }
        }
    }
}
declare class Methods {
    readonly chat: {
        postMessage: Method<ChatPostMessageArguments>;
    };
    apiCall(method: string, options?: { [key: string]: unknown }): Promise<void>;
}
";
        let first = parse("a.d.ts", source).unwrap();
        let printed = print(&first);
        let second = parse("b.d.ts", &printed).unwrap();
        assert_eq!(first, second);
        assert_eq!(print(&second), printed);
    }
}
