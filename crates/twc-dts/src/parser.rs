//! TypeScript front end built on `swc_ecma_parser`.
//!
//! [`SourceModule`] owns the parsed swc module together with the source it
//! came from, so consumers can match on swc nodes and still recover the exact
//! text of any node from its span. [`parse`] lowers the module into the
//! declaration model used by the rest of the generator.

use crate::lower::lower_module;
use crate::model::DeclarationFile;
use std::fmt;
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceMap, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use twc_core::{Error, Result};

/// Parses `source` into a declaration tree.
///
/// `file` names the source in error messages; a `.d.ts` suffix switches the
/// parser to declaration-file mode.
///
/// # Errors
///
/// Returns [`Error::ParseError`] with the line and column of the offending
/// token.
///
/// # Examples
///
/// ```
/// use twc_dts::{parse, Scope};
///
/// let file = parse("args.d.ts", "export interface AuthTestArguments { token?: string; }").unwrap();
/// let args = file.interface("AuthTestArguments").unwrap();
/// assert!(args.modifiers.export);
/// assert!(args.property("token").unwrap().optional);
/// ```
pub fn parse(file: &str, source: &str) -> Result<DeclarationFile> {
    let module = SourceModule::parse(file, source)?;
    let declarations = lower_module(&module);
    tracing::trace!(
        "Parsed {} top-level declarations from {}",
        declarations.items.len(),
        file
    );
    Ok(declarations)
}

/// A parsed TypeScript module and the text it was parsed from.
pub struct SourceModule {
    name: String,
    source: String,
    start: BytePos,
    source_map: Lrc<SourceMap>,
    module: Module,
}

impl SourceModule {
    /// Parses `source` as a TypeScript module.
    ///
    /// Recoverable syntax errors are logged and parsing continues.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] for the first unrecoverable error.
    pub fn parse(file: &str, source: &str) -> Result<Self> {
        let source_map: Lrc<SourceMap> = Lrc::default();
        let fm = source_map.new_source_file(
            FileName::Custom(file.to_string()).into(),
            source.to_string(),
        );
        let syntax = Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: false,
            dts: file.ends_with(".d.ts"),
            ..Default::default()
        });
        let mut parser = Parser::new(syntax, StringInput::from(&*fm), None);

        let module = parser.parse_module().map_err(|err| {
            error_at(&source_map, file, err.span(), err.kind().msg().into_owned())
        })?;

        for err in parser.take_errors() {
            let error = error_at(&source_map, file, err.span(), err.kind().msg().into_owned());
            tracing::warn!("{}", error);
        }

        Ok(Self {
            name: file.to_string(),
            source: source.to_string(),
            start: fm.start_pos,
            source_map,
            module,
        })
    }

    /// Source name passed to [`SourceModule::parse`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The swc module.
    #[must_use]
    pub const fn module(&self) -> &Module {
        &self.module
    }

    /// Exact source text covered by `span`.
    ///
    /// Spans outside this module yield an empty string.
    #[must_use]
    pub fn text(&self, span: Span) -> &str {
        self.offset(span.lo)
            .zip(self.offset(span.hi))
            .and_then(|(lo, hi)| self.source.get(lo..hi))
            .unwrap_or_default()
    }

    /// Text of `span` with comments removed and whitespace collapsed, the
    /// form in which types are stored.
    #[must_use]
    pub fn type_text(&self, span: Span) -> String {
        normalize(self.text(span))
    }

    /// Text of a statement, including a trailing `;` the node's span may
    /// leave out.
    #[must_use]
    pub fn statement_text(&self, span: Span) -> &str {
        let text = self.text(span);
        if text.ends_with(';') {
            return text;
        }
        let Some(end) = self.offset(span.hi) else {
            return text;
        };
        let rest = &self.source[end..];
        let trimmed = rest.trim_start_matches([' ', '\t']);
        if trimmed.starts_with(';') {
            let hi = end + (rest.len() - trimmed.len()) + 1;
            self.offset(span.lo)
                .and_then(|lo| self.source.get(lo..hi))
                .unwrap_or(text)
        } else {
            text
        }
    }

    fn offset(&self, pos: BytePos) -> Option<usize> {
        let relative = pos.0.checked_sub(self.start.0)?;
        let offset = usize::try_from(relative).ok()?;
        (offset <= self.source.len()).then_some(offset)
    }
}

impl fmt::Debug for SourceModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceModule")
            .field("name", &self.name)
            .field("items", &self.module.body.len())
            .finish_non_exhaustive()
    }
}

fn error_at(source_map: &SourceMap, file: &str, span: Span, message: String) -> Error {
    let loc = source_map.lookup_char_pos(span.lo);
    Error::ParseError {
        file: file.to_string(),
        line: loc.line,
        column: loc.col.0 + 1,
        message,
    }
}

/// Drops comments and collapses whitespace outside string literals.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut pending_space = false;

    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
                pending_space = true;
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                pending_space = true;
            }
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
                if matches!(c, '"' | '\'' | '`') {
                    while let Some(inner) = chars.next() {
                        out.push(inner);
                        if inner == '\\' {
                            if let Some(escaped) = chars.next() {
                                out.push(escaped);
                            }
                        } else if inner == c {
                            break;
                        }
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Accessibility, ClassMember, Item, Member, TypeExpr};
    use crate::Scope;
    use swc_common::Spanned;
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};

    fn parse_ok(source: &str) -> DeclarationFile {
        parse("test.d.ts", source).unwrap()
    }

    #[test]
    fn test_dotted_namespace_nests() {
        let file = parse_ok("declare namespace Paths.AuthTest { interface X {} }");
        let paths = file.namespace("Paths").unwrap();
        assert!(paths.modifiers.declare);
        let op = paths.namespace("AuthTest").unwrap();
        assert!(op.modifiers.export);
        assert!(op.interface("X").is_some());
    }

    #[test]
    fn test_interface_members() {
        let file = parse_ok(
            r#"
            export interface Success {
                ok: true;
                readonly "x-id"?: string
                list: Array<{ a: string; b?: number }>;
                [name: string]: any;
                fetch(id: string, opts?: { limit: number }): Promise<void>;
            }
            "#,
        );
        let success = file.interface("Success").unwrap();
        assert_eq!(success.members.len(), 5);
        assert_eq!(success.property("ok").unwrap().ty.as_raw(), Some("true"));

        let quoted = success.property("\"x-id\"").unwrap();
        assert!(quoted.readonly && quoted.optional);

        assert_eq!(
            success.property("list").unwrap().ty.as_raw(),
            Some("Array<{ a: string; b?: number }>")
        );
        assert_eq!(success.index_signature_count(), 1);

        let Member::Method(fetch) = &success.members[4] else {
            panic!("expected method");
        };
        assert_eq!(fetch.params.len(), 2);
        assert!(fetch.params[1].optional);
        assert!(matches!(fetch.params[1].ty, Some(TypeExpr::Object(_))));
    }

    #[test]
    fn test_object_literal_property_is_structured() {
        let file = parse_ok("interface Methods { auth: { test: (a?: X) => Promise<R> } }");
        let methods = file.interface("Methods").unwrap();
        let TypeExpr::Object(members) = &methods.property("auth").unwrap().ty else {
            panic!("expected object literal");
        };
        let Member::Property(test) = &members[0] else {
            panic!("expected property");
        };
        assert_eq!(test.ty.as_raw(), Some("(a?: X) => Promise<R>"));
    }

    #[test]
    fn test_object_in_union_stays_raw() {
        let file = parse_ok("type A = { a: 1 } | { b: 2 };");
        assert_eq!(
            file.type_alias("A").unwrap().ty.as_raw(),
            Some("{ a: 1 } | { b: 2 }")
        );
    }

    #[test]
    fn test_newline_terminated_members() {
        let file = parse_ok("interface A {\n  a: string\n  b: number | \n    undefined\n  [k: string]: any\n}");
        let a = file.interface("A").unwrap();
        assert_eq!(a.members.len(), 3);
        assert_eq!(a.property("b").unwrap().ty.as_raw(), Some("number | undefined"));
    }

    #[test]
    fn test_multiline_union_alias() {
        let file = parse_ok("type Kind =\n  | 'a'\n  | 'b'\ninterface Next {}");
        let kind = file.type_alias("Kind").unwrap().ty.as_raw().unwrap().to_string();
        assert!(kind.ends_with("'a' | 'b'"), "{kind}");
        assert!(file.interface("Next").is_some());
    }

    #[test]
    fn test_class_members() {
        let file = parse_ok(
            r"
            export declare abstract class Methods extends EventEmitter<Events> {
                private readonly token?: string;
                static count: number;
                protected constructor(token: string);
                readonly chat: {
                    postMessage: Method<ChatPostMessageArguments, ChatPostMessageResponse>;
                };
                abstract apiCall(method: string, options?: Record<string, unknown>): Promise<WebAPICallResult>;
                get name(): string;
            }
            ",
        );
        let class = file.class("Methods").unwrap();
        assert!(class.is_abstract);
        assert!(class.modifiers.export && class.modifiers.declare);
        assert_eq!(class.heritage.as_deref(), Some("extends EventEmitter<Events>"));
        assert_eq!(class.members.len(), 6);

        let token = class.property("token").unwrap();
        assert_eq!(token.accessibility, Some(Accessibility::Private));
        assert!(token.readonly && token.optional);

        let count = class.property("count").unwrap();
        assert!(count.is_static);
        assert!(matches!(
            class.property("chat").unwrap().ty,
            Some(TypeExpr::Object(_))
        ));
        assert!(class.method("apiCall").unwrap().is_abstract);
        assert!(class.method("get name").is_some());
    }

    #[test]
    fn test_class_with_bodies() {
        let file = parse(
            "predicate.ts",
            r"
            export class Predicate {
                readonly #response: Success | Error;
                static count = 0;
                constructor(response: Success | Error, private readonly token?: string) {
                    this.#response = response;
                }
                public isSuccess(): boolean {
                    return this.#response.ok === true;
                }
            }
            ",
        )
        .unwrap();
        let class = file.class("Predicate").unwrap();

        let field = class.property("#response").unwrap();
        assert!(field.readonly);
        assert_eq!(field.ty.as_ref().and_then(TypeExpr::as_raw), Some("Success | Error"));
        assert_eq!(class.property("count").unwrap().initializer.as_deref(), Some("0"));

        let ClassMember::Constructor(ctor) = &class.members[2] else {
            panic!("expected constructor");
        };
        assert!(ctor.params[0].modifiers.is_empty());
        assert_eq!(ctor.params[1].modifiers, ["private", "readonly"]);
        assert!(ctor.params[1].optional);
        assert_eq!(
            ctor.body.as_ref().map(|b| b.lines.clone()),
            Some(vec!["this.#response = response;".to_string()])
        );

        let method = class.method("isSuccess").unwrap();
        assert_eq!(method.accessibility, Some(Accessibility::Public));
        assert_eq!(
            method.body.as_ref().unwrap().lines,
            ["return this.#response.ok === true;"]
        );
    }

    #[test]
    fn test_unknown_statements_are_verbatim() {
        let file = parse_ok(
            "import { WebClient } from '@slack/web-api';\nexport enum Color {\n    Red,\n}\ninterface A {}\nexport * from './x';\n",
        );
        assert_eq!(file.items.len(), 4);
        assert_eq!(
            file.items[0],
            Item::Verbatim("import { WebClient } from '@slack/web-api';".into())
        );
        assert_eq!(
            file.items[1],
            Item::Verbatim("export enum Color {\n    Red,\n}".into())
        );
        assert!(matches!(file.items[2], Item::Interface(_)));
        assert_eq!(file.items[3], Item::Verbatim("export * from './x';".into()));
    }

    #[test]
    fn test_ambient_module_is_verbatim() {
        let file = parse_ok("declare module 'x' {\n  const a: number;\n}\ntype B = string;");
        assert!(matches!(file.items[0], Item::Verbatim(_)));
        assert!(file.type_alias("B").is_some());
    }

    #[test]
    fn test_default_export_interface() {
        let file = parse_ok("export default interface Ignored { a: string; }");
        let iface = file.interface("Ignored").unwrap();
        assert!(iface.modifiers.export && iface.modifiers.default);
        assert!(!iface.modifiers.is_named_export());
    }

    #[test]
    fn test_parameter_defaults_and_rest() {
        let file = parse(
            "methods.ts",
            "class C { m(token?: string, options: Options = {}, ...rest: any[]): void {} }",
        )
        .unwrap();
        let method = file.class("C").unwrap().method("m").unwrap();
        assert!(method.params[0].optional);
        assert_eq!(method.params[1].pattern, "options");
        assert_eq!(method.params[1].initializer.as_deref(), Some("{}"));
        assert_eq!(method.params[2].pattern, "...rest");
        assert_eq!(
            method.params[2].ty.as_ref().and_then(TypeExpr::as_raw),
            Some("any[]")
        );
        assert_eq!(method.return_type.as_ref().and_then(TypeExpr::as_raw), Some("void"));
    }

    #[test]
    fn test_comments_removed_from_types() {
        let file = parse_ok("interface A {\n  /** doc */\n  a: string /* inline */ | number; // tail\n}");
        assert_eq!(
            file.interface("A").unwrap().property("a").unwrap().ty.as_raw(),
            Some("string | number")
        );
    }

    #[test]
    fn test_error_position() {
        let err = parse("bad.ts", "interface A {\n  a: string;\n").unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().starts_with("bad.ts:"), "{err}");
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let err = parse("bad.ts", "export interface {}").unwrap_err();
        let Error::ParseError { line, .. } = err else {
            panic!("expected a parse error");
        };
        assert_eq!(line, 1);
    }

    #[test]
    fn test_source_text_of_nodes() {
        let module = SourceModule::parse("a.ts", "type A = Array<\n  string  // item\n>;").unwrap();
        let ModuleItem::Stmt(Stmt::Decl(Decl::TsTypeAlias(alias))) = &module.module().body[0]
        else {
            panic!("expected a type alias");
        };
        assert_eq!(module.type_text(alias.type_ann.span()), "Array< string >");
        assert_eq!(
            module.statement_text(alias.span()),
            "type A = Array<\n  string  // item\n>;"
        );
        assert_eq!(module.name(), "a.ts");
    }

    #[test]
    fn test_normalize_preserves_strings() {
        assert_eq!(normalize("'a  b'  |\n  \"c // d\""), "'a  b' | \"c // d\"");
    }
}
