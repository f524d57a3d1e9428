//! Declaration tree types.
//!
//! All types are plain owned data. Transforms take a value and return a new
//! one; nothing in the tree is shared or interior-mutable.

/// A parsed or generated declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationFile {
    /// Top-level statements in source order
    pub items: Vec<Item>,
}

/// One declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `namespace Name { ... }`
    Namespace(Namespace),
    /// `interface Name { ... }`
    Interface(Interface),
    /// `type Name = ...;`
    TypeAlias(TypeAlias),
    /// `class Name { ... }`
    Class(Class),
    /// Any other statement, kept as source text
    Verbatim(String),
}

impl Item {
    /// Declared name, if the item has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Namespace(ns) => Some(&ns.name),
            Self::Interface(iface) => Some(&iface.name),
            Self::TypeAlias(alias) => Some(&alias.name),
            Self::Class(class) => Some(&class.name),
            Self::Verbatim(_) => None,
        }
    }

    /// Declaration modifiers, if the item carries any.
    #[must_use]
    pub const fn modifiers(&self) -> Option<&Modifiers> {
        match self {
            Self::Namespace(ns) => Some(&ns.modifiers),
            Self::Interface(iface) => Some(&iface.modifiers),
            Self::TypeAlias(alias) => Some(&alias.modifiers),
            Self::Class(class) => Some(&class.modifiers),
            Self::Verbatim(_) => None,
        }
    }
}

/// `export` / `declare` / `default` keywords in front of a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `export`
    pub export: bool,
    /// `declare`
    pub declare: bool,
    /// `default` (only meaningful together with `export`)
    pub default: bool,
}

impl Modifiers {
    /// `export` only.
    #[must_use]
    pub const fn exported() -> Self {
        Self {
            export: true,
            declare: false,
            default: false,
        }
    }

    /// Exported and not a default export.
    #[must_use]
    pub const fn is_named_export(&self) -> bool {
        self.export && !self.default
    }
}

/// Name lookups shared by files and namespaces.
pub trait Scope {
    /// Items declared directly in this scope.
    fn items(&self) -> &[Item];

    /// First namespace called `name`.
    fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.items().iter().find_map(|item| match item {
            Item::Namespace(ns) if ns.name == name => Some(ns),
            _ => None,
        })
    }

    /// All namespaces, in declaration order.
    fn namespaces(&self) -> Box<dyn Iterator<Item = &Namespace> + '_> {
        Box::new(self.items().iter().filter_map(|item| match item {
            Item::Namespace(ns) => Some(ns),
            _ => None,
        }))
    }

    /// All interfaces, in declaration order.
    fn interfaces(&self) -> Box<dyn Iterator<Item = &Interface> + '_> {
        Box::new(self.items().iter().filter_map(|item| match item {
            Item::Interface(iface) => Some(iface),
            _ => None,
        }))
    }

    /// First interface called `name`.
    fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces().find(|iface| iface.name == name)
    }

    /// First type alias called `name`.
    fn type_alias(&self, name: &str) -> Option<&TypeAlias> {
        self.items().iter().find_map(|item| match item {
            Item::TypeAlias(alias) if alias.name == name => Some(alias),
            _ => None,
        })
    }

    /// First class called `name`.
    fn class(&self, name: &str) -> Option<&Class> {
        self.items().iter().find_map(|item| match item {
            Item::Class(class) if class.name == name => Some(class),
            _ => None,
        })
    }

    /// Number of items in this scope called `name`.
    fn count_named(&self, name: &str) -> usize {
        self.items()
            .iter()
            .filter(|item| item.name() == Some(name))
            .count()
    }
}

impl Scope for DeclarationFile {
    fn items(&self) -> &[Item] {
        &self.items
    }
}

/// `namespace Name { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    /// Modifiers
    pub modifiers: Modifiers,
    /// Namespace name
    pub name: String,
    /// Nested declarations
    pub items: Vec<Item>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns this namespace marked `export` with `declare` removed.
    #[must_use]
    pub fn exported(mut self) -> Self {
        self.modifiers.export = true;
        self.modifiers.declare = false;
        self
    }
}

impl Scope for Namespace {
    fn items(&self) -> &[Item] {
        &self.items
    }
}

/// `interface Name<T> extends A, B { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    /// Modifiers
    pub modifiers: Modifiers,
    /// Interface name
    pub name: String,
    /// Raw type parameter list including angle brackets
    pub type_params: Option<String>,
    /// Extended types, raw
    pub extends: Vec<String>,
    /// Body members
    pub members: Vec<Member>,
}

impl Interface {
    /// Creates an empty interface.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.members.iter().find_map(|member| match member {
            Member::Property(prop) if prop.name == name => Some(prop),
            _ => None,
        })
    }

    /// Number of index signatures.
    #[must_use]
    pub fn index_signature_count(&self) -> usize {
        self.members
            .iter()
            .filter(|member| matches!(member, Member::Index(_)))
            .count()
    }
}

/// Interface or object-literal member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// `name?: T`
    Property(Property),
    /// `[key: string]: T`
    Index(IndexSignature),
    /// `name(args): R`
    Method(MethodSignature),
    /// `(args): R`
    Call(CallSignature),
}

/// Property signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name as written (may be a quoted string)
    pub name: String,
    /// `?` marker
    pub optional: bool,
    /// `readonly` modifier
    pub readonly: bool,
    /// Property type
    pub ty: TypeExpr,
}

impl Property {
    /// Required, mutable property.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            readonly: false,
            ty: ty.into(),
        }
    }
}

/// Index signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSignature {
    /// `readonly` modifier
    pub readonly: bool,
    /// Key binding name
    pub key: String,
    /// Key type, raw
    pub key_type: String,
    /// Value type
    pub value_type: TypeExpr,
}

/// Method signature in an interface or object literal type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name as written
    pub name: String,
    /// `?` marker
    pub optional: bool,
    /// Raw type parameter list
    pub type_params: Option<String>,
    /// Parameters
    pub params: Vec<Parameter>,
    /// Return type
    pub return_type: Option<TypeExpr>,
}

/// Call signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSignature {
    /// Raw type parameter list
    pub type_params: Option<String>,
    /// Parameters
    pub params: Vec<Parameter>,
    /// Return type
    pub return_type: Option<TypeExpr>,
}

/// Function or constructor parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter modifiers such as `private` or `readonly`
    pub modifiers: Vec<String>,
    /// Binding: identifier, `...rest` or destructuring pattern
    pub pattern: String,
    /// `?` marker
    pub optional: bool,
    /// Declared type
    pub ty: Option<TypeExpr>,
    /// Default value, raw
    pub initializer: Option<String>,
}

impl Parameter {
    /// `name: ty`
    #[must_use]
    pub fn typed(name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            pattern: name.into(),
            ty: Some(ty.into()),
            ..Self::default()
        }
    }
}

/// A type in a declaration.
///
/// Object literal types are kept structured because the SDK declares its
/// callable surface as nested object literals; every other type is kept as
/// normalised source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Type source text
    Raw(String),
    /// `{ ...members }`
    Object(Vec<Member>),
}

impl TypeExpr {
    /// Raw text, if this is not an object literal.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(text) => Some(text),
            Self::Object(_) => None,
        }
    }
}

impl From<&str> for TypeExpr {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<String> for TypeExpr {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

/// `type Name<T> = ...;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    /// Modifiers
    pub modifiers: Modifiers,
    /// Alias name
    pub name: String,
    /// Raw type parameter list
    pub type_params: Option<String>,
    /// Aliased type
    pub ty: TypeExpr,
}

/// `class Name<T> extends Base { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Class {
    /// Modifiers
    pub modifiers: Modifiers,
    /// `abstract` keyword
    pub is_abstract: bool,
    /// Class name
    pub name: String,
    /// Raw type parameter list
    pub type_params: Option<String>,
    /// Raw `extends ... implements ...` clause
    pub heritage: Option<String>,
    /// Body members
    pub members: Vec<ClassMember>,
}

impl Class {
    /// Creates an empty class.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Instance or static property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ClassProperty> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Property(prop) if prop.name == name => Some(prop),
            _ => None,
        })
    }

    /// Method called `name`.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&ClassMethod> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Method(method) if method.name == name => Some(method),
            _ => None,
        })
    }
}

/// Member visibility keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Accessibility {
    /// Keyword text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// Class body member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    /// Field declaration
    Property(ClassProperty),
    /// `constructor(...)`
    Constructor(Constructor),
    /// Method declaration
    Method(ClassMethod),
    /// `[key: string]: T`
    Index(IndexSignature),
}

/// Class field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassProperty {
    /// Visibility
    pub accessibility: Option<Accessibility>,
    /// `static`
    pub is_static: bool,
    /// `readonly`
    pub readonly: bool,
    /// Field name as written
    pub name: String,
    /// `?` marker
    pub optional: bool,
    /// Declared type
    pub ty: Option<TypeExpr>,
    /// Initializer, raw
    pub initializer: Option<String>,
}

/// Class constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constructor {
    /// Visibility
    pub accessibility: Option<Accessibility>,
    /// Parameters
    pub params: Vec<Parameter>,
    /// Implementation, absent in declaration files
    pub body: Option<Body>,
}

/// Class method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMethod {
    /// Visibility
    pub accessibility: Option<Accessibility>,
    /// `static`
    pub is_static: bool,
    /// `abstract`
    pub is_abstract: bool,
    /// `async`
    pub is_async: bool,
    /// Method name as written (accessors keep their `get`/`set` keyword)
    pub name: String,
    /// Raw type parameter list
    pub type_params: Option<String>,
    /// Parameters
    pub params: Vec<Parameter>,
    /// Return type
    pub return_type: Option<TypeExpr>,
    /// Implementation, absent in declaration files
    pub body: Option<Body>,
}

/// Statement lines of a function body, without the surrounding braces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    /// Lines with common indentation removed
    pub lines: Vec<String>,
}

impl Body {
    /// Builds a body from individual statement lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a body from source text, dropping blank edge lines and the
    /// indentation common to all non-blank lines.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Self::default();
        };
        let lines = &lines[first..=last];

        let indent = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);

        Self {
            lines: lines
                .iter()
                .map(|line| {
                    if line.trim().is_empty() {
                        String::new()
                    } else {
                        line[indent..].trim_end().to_string()
                    }
                })
                .collect(),
        }
    }
}
