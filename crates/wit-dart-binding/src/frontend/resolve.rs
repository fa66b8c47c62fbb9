//! World model and cross-document name resolution
//!
//! The root document selects the world; dependency documents contribute
//! packages whose interfaces can be imported, exported or `use`d. Every
//! type reachable from the world ends up in [`World::types`], in the order
//! it is first reached.

use std::collections::{HashMap, HashSet};

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use tracing::{debug, warn};
use wit_dart_common::{ResolvedInputs, WitFile};

use crate::frontend::ast::{
    Document, ExternDecl, FuncDecl, Ident, InterfaceDecl, InterfaceItem, NameDecl, PackageName,
    TopItem, TypeDecl, TypeDeclKind, TypeRef, UseDecl, UseName, UsePath, WorldDecl,
    WorldItemDecl,
};
use crate::frontend::errors::SyntaxError;
use crate::frontend::lexer::Span;
use crate::frontend::parser::parse_document;

type Result<T> = std::result::Result<T, SyntaxError>;

// ============================================================================
// World model
// ============================================================================

/// Index of a type definition in [`World::types`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

impl TypeId {
    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// A resolved type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
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
    List(Box<Type>),
    Option(Box<Type>),
    Result {
        ok: Option<Box<Type>>,
        err: Option<Box<Type>>,
    },
    Tuple(Vec<Type>),
    Named(TypeId),
}

/// A named type definition.
///
/// `name` is the WIT name, made unique across the world by prefixing the
/// declaring interface or world name on collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub docs: String,
    pub kind: TypeDefKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    Record(Vec<Field>),
    Variant(Vec<Case>),
    Enum(Vec<EnumCase>),
    Flags(Vec<EnumCase>),
    Alias(Type),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub docs: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub docs: String,
    pub ty: Option<Type>,
}

/// An enum case or a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub name: String,
    pub docs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub docs: String,
    pub params: Vec<(String, Type)>,
    pub result: Option<Type>,
}

/// An import or export of the world
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldItem {
    Function(Function),
    Interface {
        name: String,
        docs: String,
        /// `ns:pkg/name[@version]`, or the plain name for inline interfaces
        qualified_name: String,
        functions: Vec<Function>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub name: String,
    pub docs: String,
    pub types: Vec<TypeDef>,
    pub imports: Vec<WorldItem>,
    pub exports: Vec<WorldItem>,
}

impl World {
    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }
}

/// Parse every document and resolve the first world of the root document.
pub fn resolve_world(inputs: &ResolvedInputs) -> Result<World> {
    let parsed = inputs
        .documents()
        .map(|file| {
            Ok(Parsed {
                file,
                doc: parse_document(&file.path, &file.contents)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Resolver::new(&parsed)?.world()
}

// ============================================================================
// Resolver
// ============================================================================

struct Parsed<'a> {
    file: &'a WitFile,
    doc: Document,
}

struct Package<'a> {
    name: Option<PackageName>,
    /// interface name -> (scope, declaration)
    interfaces: IndexMap<&'a str, (usize, &'a InterfaceDecl)>,
}

/// Names visible inside one interface or world
struct Scope<'a> {
    doc: usize,
    pkg: usize,
    label: String,
    types: IndexMap<&'a str, &'a TypeDecl>,
    uses: IndexMap<&'a str, (&'a UsePath, &'a UseName)>,
}

struct Resolver<'a> {
    docs: &'a [Parsed<'a>],
    packages: Vec<Package<'a>>,
    doc_packages: Vec<usize>,
    /// Top-level `use` aliases per document
    aliases: Vec<HashMap<&'a str, &'a UsePath>>,
    scopes: Vec<Scope<'a>>,
    resolved: HashMap<(usize, String), TypeId>,
    in_progress: HashSet<(usize, String)>,
    types: Vec<Option<TypeDef>>,
    /// Dart class names already claimed
    names: HashSet<String>,
}

impl<'a> Resolver<'a> {
    fn new(docs: &'a [Parsed<'a>]) -> Result<Self> {
        let mut resolver = Self {
            docs,
            packages: Vec::new(),
            doc_packages: Vec::new(),
            aliases: Vec::new(),
            scopes: Vec::new(),
            resolved: HashMap::new(),
            in_progress: HashSet::new(),
            types: Vec::new(),
            names: HashSet::new(),
        };

        for (index, parsed) in docs.iter().enumerate() {
            let doc = &parsed.doc;
            let pkg = match &doc.package {
                Some(name) => resolver.package_index(name),
                None if index == 0 => {
                    resolver.packages.push(Package {
                        name: None,
                        interfaces: IndexMap::new(),
                    });
                    resolver.packages.len() - 1
                }
                None => {
                    return Err(resolver.error(
                        index,
                        0,
                        "dependency documents must declare a `package`",
                    ))
                }
            };
            resolver.doc_packages.push(pkg);

            let mut aliases = HashMap::new();
            for item in &doc.items {
                if let TopItem::Use(top_use) = item {
                    let local = top_use
                        .alias
                        .as_ref()
                        .map(|alias| alias.name.as_str())
                        .unwrap_or_else(|| top_use.path.interface_name());
                    aliases.insert(local, &top_use.path);
                }
            }
            resolver.aliases.push(aliases);

            for iface in doc.interfaces() {
                if resolver.packages[pkg]
                    .interfaces
                    .contains_key(iface.name.name.as_str())
                {
                    return Err(resolver.error(
                        index,
                        iface.name.span.start,
                        format!("interface `{}` is defined more than once", iface.name.name),
                    ));
                }
                let scope = resolver.interface_scope(index, pkg, &iface.name.name, &iface.items)?;
                resolver.packages[pkg]
                    .interfaces
                    .insert(iface.name.name.as_str(), (scope, iface));
            }
        }

        Ok(resolver)
    }

    fn package_index(&mut self, name: &PackageName) -> usize {
        if let Some(index) = self
            .packages
            .iter()
            .position(|pkg| pkg.name.as_ref() == Some(name))
        {
            return index;
        }
        self.packages.push(Package {
            name: Some(name.clone()),
            interfaces: IndexMap::new(),
        });
        self.packages.len() - 1
    }

    fn error(&self, doc: usize, offset: usize, message: impl Into<String>) -> SyntaxError {
        let file = self.docs[doc].file;
        SyntaxError::at(&file.path, &file.contents, offset, message)
    }

    fn world(mut self) -> Result<World> {
        let docs = self.docs;
        let root = &docs[0];
        let mut worlds = root.doc.worlds();
        let Some(decl) = worlds.next() else {
            return Err(self.error(0, 0, "no `world` is declared"));
        };
        let skipped = worlds.count();
        if skipped > 0 {
            warn!(
                world = %decl.name.name,
                skipped,
                "Several worlds declared, generating the first"
            );
        }

        let pkg = self.doc_packages[0];
        let types = decl
            .items
            .iter()
            .filter_map(|item| match item {
                WorldItemDecl::Type(ty) => Some(ty),
                _ => None,
            })
            .collect();
        let uses = decl
            .items
            .iter()
            .filter_map(|item| match item {
                WorldItemDecl::Use(use_decl) => Some(use_decl),
                _ => None,
            })
            .collect();
        self.reserve_world_classes(decl)?;
        let scope = self.add_scope(0, pkg, &decl.name.name, types, uses)?;

        let mut imports = Vec::new();
        let mut exports = Vec::new();
        for item in &decl.items {
            match item {
                WorldItemDecl::Type(ty) => {
                    self.lookup(scope, &ty.name.name, 0, &ty.name.span)?;
                }
                WorldItemDecl::Use(use_decl) => self.lookup_uses(scope, use_decl)?,
                WorldItemDecl::Import(ext) => imports.push(self.extern_item(scope, ext)?),
                WorldItemDecl::Export(ext) => exports.push(self.extern_item(scope, ext)?),
            }
        }

        let types: Vec<TypeDef> = self.types.into_iter().flatten().collect();
        debug!(
            world = %decl.name.name,
            types = types.len(),
            imports = imports.len(),
            exports = exports.len(),
            "Resolved WIT world"
        );
        Ok(World {
            name: decl.name.name.clone(),
            docs: decl.docs.clone(),
            types,
            imports,
            exports,
        })
    }

    // ------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------

    fn interface_scope(
        &mut self,
        doc: usize,
        pkg: usize,
        label: &str,
        items: &'a [InterfaceItem],
    ) -> Result<usize> {
        let types = items
            .iter()
            .filter_map(|item| match item {
                InterfaceItem::Type(ty) => Some(ty),
                _ => None,
            })
            .collect();
        let uses = items
            .iter()
            .filter_map(|item| match item {
                InterfaceItem::Use(use_decl) => Some(use_decl),
                _ => None,
            })
            .collect();
        self.add_scope(doc, pkg, label, types, uses)
    }

    fn add_scope(
        &mut self,
        doc: usize,
        pkg: usize,
        label: &str,
        types: Vec<&'a TypeDecl>,
        uses: Vec<&'a UseDecl>,
    ) -> Result<usize> {
        let mut scope = Scope {
            doc,
            pkg,
            label: label.to_string(),
            types: IndexMap::new(),
            uses: IndexMap::new(),
        };
        for decl in types {
            if scope.types.insert(decl.name.name.as_str(), decl).is_some() {
                return Err(self.error(
                    doc,
                    decl.name.span.start,
                    format!("type `{}` is defined more than once", decl.name.name),
                ));
            }
        }
        for use_decl in uses {
            for name in &use_decl.names {
                let local = name.local();
                if scope.types.contains_key(local.name.as_str())
                    || scope
                        .uses
                        .insert(local.name.as_str(), (&use_decl.path, name))
                        .is_some()
                {
                    return Err(self.error(
                        doc,
                        local.span.start,
                        format!("type `{}` is defined more than once", local.name),
                    ));
                }
            }
        }
        self.scopes.push(scope);
        Ok(self.scopes.len() - 1)
    }

    // ------------------------------------------------------------------
    // Interfaces
    // ------------------------------------------------------------------

    fn extern_item(&mut self, scope: usize, decl: &'a ExternDecl) -> Result<WorldItem> {
        let doc = self.scopes[scope].doc;
        let pkg = self.scopes[scope].pkg;
        match decl {
            ExternDecl::Func(func) => Ok(WorldItem::Function(self.function(scope, func)?)),
            ExternDecl::Interface { name, docs, items } => {
                let iface = self.interface_scope(doc, pkg, &name.name, items)?;
                Ok(WorldItem::Interface {
                    name: name.name.clone(),
                    docs: docs.clone(),
                    qualified_name: name.name.clone(),
                    functions: self.interface_functions(iface, items)?,
                })
            }
            ExternDecl::Path { path, docs } => {
                let (iface, iface_decl, qualified_name) = self.interface_by_path(doc, path)?;
                let docs = if docs.is_empty() {
                    iface_decl.docs.clone()
                } else {
                    docs.clone()
                };
                Ok(WorldItem::Interface {
                    name: iface_decl.name.name.clone(),
                    docs,
                    qualified_name,
                    functions: self.interface_functions(iface, &iface_decl.items)?,
                })
            }
        }
    }

    /// Resolve every type of an interface and return its functions.
    fn interface_functions(
        &mut self,
        scope: usize,
        items: &'a [InterfaceItem],
    ) -> Result<Vec<Function>> {
        let doc = self.scopes[scope].doc;
        let mut functions = Vec::new();
        for item in items {
            match item {
                InterfaceItem::Type(ty) => {
                    self.lookup(scope, &ty.name.name, doc, &ty.name.span)?;
                }
                InterfaceItem::Use(use_decl) => self.lookup_uses(scope, use_decl)?,
                InterfaceItem::Func(func) => functions.push(self.function(scope, func)?),
            }
        }
        Ok(functions)
    }

    fn interface_by_path(
        &self,
        doc: usize,
        path: &'a UsePath,
    ) -> Result<(usize, &'a InterfaceDecl, String)> {
        match path {
            UsePath::Local(ident) => match self.aliases[doc].get(ident.name.as_str()).copied() {
                Some(UsePath::Local(target)) => {
                    self.package_interface(doc, self.doc_packages[doc], target)
                }
                Some(target) => self.interface_by_path(doc, target),
                None => self.package_interface(doc, self.doc_packages[doc], ident),
            },
            UsePath::Package {
                package,
                interface,
                span,
            } => {
                let pkg = self
                    .packages
                    .iter()
                    .position(|pkg| pkg.name.as_ref().is_some_and(|name| name.matches(package)))
                    .ok_or_else(|| {
                        self.error(doc, span.start, format!("package `{package}` not found"))
                    })?;
                self.package_interface(doc, pkg, interface)
            }
        }
    }

    fn package_interface(
        &self,
        doc: usize,
        pkg: usize,
        name: &Ident,
    ) -> Result<(usize, &'a InterfaceDecl, String)> {
        let package = &self.packages[pkg];
        let (scope, decl) = package
            .interfaces
            .get(name.name.as_str())
            .copied()
            .ok_or_else(|| {
                self.error(
                    doc,
                    name.span.start,
                    format!("interface `{}` not found", name.name),
                )
            })?;
        let qualified_name = match &package.name {
            Some(pkg_name) => {
                let mut qualified =
                    format!("{}:{}/{}", pkg_name.namespace, pkg_name.name, name.name);
                if let Some(version) = &pkg_name.version {
                    qualified.push('@');
                    qualified.push_str(version);
                }
                qualified
            }
            None => name.name.clone(),
        };
        Ok((scope, decl, qualified_name))
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    fn lookup_uses(&mut self, scope: usize, use_decl: &'a UseDecl) -> Result<()> {
        let doc = self.scopes[scope].doc;
        for name in &use_decl.names {
            let local = name.local();
            self.lookup(scope, &local.name, doc, &local.span)?;
        }
        Ok(())
    }

    /// Resolve `name` in `scope`; errors are reported at `at` in `at_doc`.
    fn lookup(&mut self, scope: usize, name: &str, at_doc: usize, at: &Span) -> Result<TypeId> {
        let key = (scope, name.to_string());
        if let Some(id) = self.resolved.get(&key) {
            return Ok(*id);
        }
        if !self.in_progress.insert(key.clone()) {
            return Err(self.error(at_doc, at.start, format!("type `{name}` depends on itself")));
        }
        let result = self.lookup_uncached(scope, name, at_doc, at);
        self.in_progress.remove(&key);
        let id = result?;
        self.resolved.insert(key, id);
        Ok(id)
    }

    fn lookup_uncached(
        &mut self,
        scope: usize,
        name: &str,
        at_doc: usize,
        at: &Span,
    ) -> Result<TypeId> {
        if let Some(decl) = self.scopes[scope].types.get(name).copied() {
            return self.define(scope, decl);
        }
        if let Some((path, use_name)) = self.scopes[scope].uses.get(name).copied() {
            let doc = self.scopes[scope].doc;
            let (target, _, _) = self.interface_by_path(doc, path)?;
            return self.lookup(target, &use_name.name.name, doc, &use_name.name.span);
        }
        Err(self.error(at_doc, at.start, format!("unknown type `{name}`")))
    }

    fn define(&mut self, scope: usize, decl: &'a TypeDecl) -> Result<TypeId> {
        let id = TypeId(self.types.len());
        self.types.push(None);
        let name = self.unique_name(scope, decl);

        let kind = match &decl.kind {
            TypeDeclKind::Record(fields) => TypeDefKind::Record(
                fields
                    .iter()
                    .map(|field| {
                        Ok(Field {
                            name: field.name.name.clone(),
                            docs: field.docs.clone(),
                            ty: self.ty(scope, &field.ty)?,
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
            TypeDeclKind::Variant(cases) => TypeDefKind::Variant(
                cases
                    .iter()
                    .map(|case| {
                        Ok(Case {
                            name: case.name.name.clone(),
                            docs: case.docs.clone(),
                            ty: case.ty.as_ref().map(|ty| self.ty(scope, ty)).transpose()?,
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
            TypeDeclKind::Enum(cases) => TypeDefKind::Enum(cases.iter().map(enum_case).collect()),
            TypeDeclKind::Flags(flags) => {
                TypeDefKind::Flags(flags.iter().map(enum_case).collect())
            }
            TypeDeclKind::Alias(ty) => TypeDefKind::Alias(self.ty(scope, ty)?),
        };

        self.types[id.0] = Some(TypeDef {
            name,
            docs: decl.docs.clone(),
            kind,
        });
        Ok(id)
    }

    /// A name for `decl` whose Dart class, and the classes of its variant
    /// cases, do not clash with any class already named.
    fn unique_name(&mut self, scope: usize, decl: &TypeDecl) -> String {
        let cases: Vec<&str> = match &decl.kind {
            TypeDeclKind::Variant(cases) => cases.iter().map(|case| case.name.name.as_str()).collect(),
            _ => Vec::new(),
        };
        let name = decl.name.name.as_str();
        let mut candidate = name.to_string();
        if !self.is_free(&candidate, &cases) {
            candidate = format!("{}-{}", self.scopes[scope].label, name);
        }
        let base = candidate.clone();
        let mut counter = 2;
        while !self.is_free(&candidate, &cases) {
            candidate = format!("{base}{counter}");
            counter += 1;
        }
        self.reserve(&candidate);
        for case in &cases {
            self.reserve(&format!("{candidate}-{case}"));
        }
        candidate
    }

    fn is_free(&self, name: &str, cases: &[&str]) -> bool {
        !self.names.contains(&class_key(name))
            && cases
                .iter()
                .all(|case| !self.names.contains(&class_key(&format!("{name}-{case}"))))
    }

    fn reserve(&mut self, name: &str) {
        self.names.insert(class_key(name));
    }

    /// Claim the class names emitted for the world and its interfaces so no
    /// type takes them.
    fn reserve_world_classes(&mut self, decl: &'a WorldDecl) -> Result<()> {
        self.reserve(&format!("{}-world", decl.name.name));
        self.reserve(&format!("{}-world-imports", decl.name.name));
        for item in &decl.items {
            let (ext, suffix) = match item {
                WorldItemDecl::Import(ext) => (ext, "import"),
                WorldItemDecl::Export(ext) => (ext, "export"),
                _ => continue,
            };
            let name = match ext {
                ExternDecl::Func(_) => continue,
                ExternDecl::Interface { name, .. } => name.name.as_str(),
                ExternDecl::Path { path, .. } => self.interface_by_path(0, path)?.1.name.name.as_str(),
            };
            self.reserve(&format!("{name}-{suffix}"));
        }
        Ok(())
    }

    fn ty(&mut self, scope: usize, ty: &TypeRef) -> Result<Type> {
        Ok(match ty {
            TypeRef::Bool => Type::Bool,
            TypeRef::S8 => Type::S8,
            TypeRef::S16 => Type::S16,
            TypeRef::S32 => Type::S32,
            TypeRef::S64 => Type::S64,
            TypeRef::U8 => Type::U8,
            TypeRef::U16 => Type::U16,
            TypeRef::U32 => Type::U32,
            TypeRef::U64 => Type::U64,
            TypeRef::F32 => Type::F32,
            TypeRef::F64 => Type::F64,
            TypeRef::Char => Type::Char,
            TypeRef::String => Type::String,
            TypeRef::List(inner) => Type::List(Box::new(self.ty(scope, inner)?)),
            TypeRef::Option(inner) => Type::Option(Box::new(self.ty(scope, inner)?)),
            TypeRef::Result { ok, err } => Type::Result {
                ok: self.boxed(scope, ok.as_deref())?,
                err: self.boxed(scope, err.as_deref())?,
            },
            TypeRef::Tuple(types) => Type::Tuple(
                types
                    .iter()
                    .map(|ty| self.ty(scope, ty))
                    .collect::<Result<_>>()?,
            ),
            TypeRef::Named(ident) => {
                let doc = self.scopes[scope].doc;
                Type::Named(self.lookup(scope, &ident.name, doc, &ident.span)?)
            }
        })
    }

    fn boxed(&mut self, scope: usize, ty: Option<&TypeRef>) -> Result<Option<Box<Type>>> {
        ty.map(|ty| self.ty(scope, ty).map(Box::new)).transpose()
    }

    fn function(&mut self, scope: usize, func: &FuncDecl) -> Result<Function> {
        let params = func
            .params
            .iter()
            .map(|(name, ty)| Ok((name.name.clone(), self.ty(scope, ty)?)))
            .collect::<Result<_>>()?;
        let result = func
            .result
            .as_ref()
            .map(|ty| self.ty(scope, ty))
            .transpose()?;
        Ok(Function {
            name: func.name.name.clone(),
            docs: func.docs.clone(),
            params,
            result,
        })
    }
}

/// The Dart class a kebab-case name turns into
fn class_key(name: &str) -> String {
    name.to_upper_camel_case()
}

fn enum_case(case: &NameDecl) -> EnumCase {
    EnumCase {
        name: case.name.name.clone(),
        docs: case.docs.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(root: &str, deps: &[(&str, &str)]) -> ResolvedInputs {
        ResolvedInputs {
            root: WitFile::new("wit/root.wit", root),
            deps: deps
                .iter()
                .map(|(path, contents)| WitFile::new(*path, *contents))
                .collect(),
        }
    }

    #[test]
    fn test_world_functions_and_types() {
        let world = resolve_world(&inputs(
            r#"
package example:host;

world host {
  import print: func(msg: string);

  record record-test {
    a: u32,
    b: string,
    c: float64,
  }

  export get: func() -> record-test;
}
"#,
            &[],
        ))
        .unwrap();

        assert_eq!(world.name, "host");
        assert_eq!(world.types.len(), 1);
        assert_eq!(world.types[0].name, "record-test");
        let WorldItem::Function(get) = &world.exports[0] else {
            panic!("expected a function export");
        };
        let Some(Type::Named(id)) = &get.result else {
            panic!("expected a named result");
        };
        assert_eq!(world.type_def(*id).name, "record-test");
        assert_eq!(world.imports.len(), 1);
    }

    #[test]
    fn test_interfaces_across_packages() {
        let world = resolve_world(&inputs(
            r#"
package my:app;

interface api {
  use my:types/shapes.{point};
  move: func(p: point) -> point;
}

world app {
  import my:types/shapes;
  export api;
}
"#,
            &[(
                "wit/deps/types/shapes.wit",
                r#"
package my:types;

/// Geometry
interface shapes {
  record point { x: s32, y: s32 }
  enum unit { px, em }
  origin: func() -> point;
}
"#,
            )],
        ))
        .unwrap();

        let names: Vec<&str> = world.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["point", "unit"]);
        let WorldItem::Interface {
            qualified_name,
            docs,
            functions,
            ..
        } = &world.imports[0]
        else {
            panic!("expected an interface import");
        };
        assert_eq!(qualified_name, "my:types/shapes");
        assert_eq!(docs, "Geometry");
        assert_eq!(functions[0].name, "origin");

        let WorldItem::Interface {
            qualified_name,
            functions,
            ..
        } = &world.exports[0]
        else {
            panic!("expected an interface export");
        };
        assert_eq!(qualified_name, "my:app/api");
        assert_eq!(functions[0].params[0].1, Type::Named(TypeId(0)));
    }

    #[test]
    fn test_colliding_names_are_prefixed() {
        let world = resolve_world(&inputs(
            r#"
interface a { record item { x: u8 } }
interface b { record item { y: u8 } }
world w {
  import a;
  import b;
}
"#,
            &[],
        ))
        .unwrap();
        let names: Vec<&str> = world.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["item", "b-item"]);
    }

    #[test]
    fn test_variant_case_classes_do_not_clash() {
        let world = resolve_world(&inputs(
            r#"
world w {
  record value-num { a: u8 }
  variant value { num(u32), other }
  export f: func(v: value, n: value-num);
}
"#,
            &[],
        ))
        .unwrap();
        let names: Vec<&str> = world.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["value-num", "w-value"]);
    }

    #[test]
    fn test_world_and_interface_classes_are_reserved() {
        let world = resolve_world(&inputs(
            r#"
interface api { run: func(); }
world w {
  record w-world { a: u8 }
  record api-export { b: u8 }
  export api;
}
"#,
            &[],
        ))
        .unwrap();
        let names: Vec<&str> = world.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["w-w-world", "w-api-export"]);
    }

    #[test]
    fn test_unknown_type() {
        let err = resolve_world(&inputs("world w {\n  export f: func() -> missing;\n}", &[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "wit/root.wit:2:23: unknown type `missing`");
    }

    #[test]
    fn test_unknown_package() {
        let err = resolve_world(&inputs("world w {\n  import x:y/z;\n}", &[])).unwrap_err();
        assert_eq!(err.message, "package `x:y` not found");
        assert_eq!((err.line, err.column), (2, 10));
    }

    #[test]
    fn test_missing_world() {
        let err = resolve_world(&inputs("interface i {}", &[])).unwrap_err();
        assert_eq!(err.to_string(), "wit/root.wit:1:1: no `world` is declared");
    }

    #[test]
    fn test_syntax_error_in_dependency() {
        let err = resolve_world(&inputs(
            "world w {}",
            &[("wit/deps/bad.wit", "package a:b;\ninterface {")],
        ))
        .unwrap_err();
        assert_eq!(err.path, "wit/deps/bad.wit");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_self_referencing_alias() {
        let err = resolve_world(&inputs("world w {\n  type a = list<a>;\n}", &[])).unwrap_err();
        assert_eq!(err.message, "type `a` depends on itself");
    }
}
