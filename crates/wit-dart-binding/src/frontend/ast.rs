//! WIT AST types
//!
//! Syntax-level representation of one WIT document. Names are not resolved
//! here; see [`crate::frontend::resolve`] for the world model.

use std::fmt;

use crate::frontend::lexer::Span;

/// An identifier with its source position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// `namespace:name[@version]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    pub namespace: String,
    pub name: String,
    pub version: Option<String>,
}

impl PackageName {
    /// Whether a reference to `other` designates this package. A reference
    /// without a version matches any version.
    pub fn matches(&self, other: &PackageName) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && (other.version.is_none() || self.version == other.version)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        Ok(())
    }
}

/// A parsed WIT document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Logical path of the document, used in error messages
    pub path: String,
    pub package: Option<PackageName>,
    pub items: Vec<TopItem>,
}

impl Document {
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.items.iter().filter_map(|item| match item {
            TopItem::Interface(iface) => Some(iface),
            _ => None,
        })
    }

    pub fn worlds(&self) -> impl Iterator<Item = &WorldDecl> {
        self.items.iter().filter_map(|item| match item {
            TopItem::World(world) => Some(world),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopItem {
    Interface(InterfaceDecl),
    World(WorldDecl),
    /// `use ns:pkg/iface[@v] [as alias];`
    Use(TopUse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUse {
    pub path: UsePath,
    pub alias: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: Ident,
    pub docs: String,
    pub items: Vec<InterfaceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceItem {
    Use(UseDecl),
    Type(TypeDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldDecl {
    pub name: Ident,
    pub docs: String,
    pub items: Vec<WorldItemDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldItemDecl {
    Import(ExternDecl),
    Export(ExternDecl),
    Use(UseDecl),
    Type(TypeDecl),
}

/// The target of an `import` or `export`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternDecl {
    /// `name: func(...)`
    Func(FuncDecl),
    /// `name: interface { ... }`
    Interface {
        name: Ident,
        docs: String,
        items: Vec<InterfaceItem>,
    },
    /// `iface` or `ns:pkg/iface[@v]`
    Path { path: UsePath, docs: String },
}

/// Reference to an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsePath {
    /// An interface of the current package, or a top-level `use` alias
    Local(Ident),
    /// An interface of another package
    Package {
        package: PackageName,
        interface: Ident,
        span: Span,
    },
}

impl UsePath {
    /// The interface name without its package
    pub fn interface_name(&self) -> &str {
        match self {
            UsePath::Local(ident) => &ident.name,
            UsePath::Package { interface, .. } => &interface.name,
        }
    }
}

impl fmt::Display for UsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsePath::Local(ident) => write!(f, "{}", ident.name),
            UsePath::Package {
                package, interface, ..
            } => {
                write!(f, "{}:{}/{}", package.namespace, package.name, interface.name)?;
                if let Some(version) = &package.version {
                    write!(f, "@{version}")?;
                }
                Ok(())
            }
        }
    }
}

/// `use path.{a, b as c};`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseDecl {
    pub path: UsePath,
    pub names: Vec<UseName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseName {
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl UseName {
    /// The name this import is visible under
    pub fn local(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: Ident,
    pub docs: String,
    pub kind: TypeDeclKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclKind {
    Record(Vec<FieldDecl>),
    Variant(Vec<CaseDecl>),
    Enum(Vec<NameDecl>),
    Flags(Vec<NameDecl>),
    /// `type name = ty;`
    Alias(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Ident,
    pub docs: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDecl {
    pub name: Ident,
    pub docs: String,
    pub ty: Option<TypeRef>,
}

/// An enum case or a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDecl {
    pub name: Ident,
    pub docs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: Ident,
    pub docs: String,
    pub params: Vec<(Ident, TypeRef)>,
    pub result: Option<TypeRef>,
}

/// Type expression as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Bool,
    S8,
    S16,
    S32,
    S64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
    List(Box<TypeRef>),
    Option(Box<TypeRef>),
    Result {
        ok: Option<Box<TypeRef>>,
        err: Option<Box<TypeRef>>,
    },
    Tuple(Vec<TypeRef>),
    Named(Ident),
}
