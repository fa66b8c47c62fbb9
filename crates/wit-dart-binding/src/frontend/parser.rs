//! WIT parser
//!
//! Hand-written recursive descent over the token stream from
//! [`crate::frontend::lexer`]. Keywords are plain identifiers checked by
//! spelling; `%`-escaped identifiers never act as keywords.

use crate::frontend::ast::*;
use crate::frontend::errors::SyntaxError;
use crate::frontend::lexer::{tokenize, Span, SpannedToken, Token};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Parse one WIT document.
pub fn parse_document(path: &str, source: &str) -> Result<Document> {
    let mut parser = Parser {
        path,
        source,
        tokens: tokenize(source),
        pos: 0,
    };
    parser.document()
}

struct Parser<'a> {
    path: &'a str,
    source: &'a str,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(tok, _)| tok)
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_at(0)
    }

    fn span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.clone(),
            None => self.source.len()..self.source.len(),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Id(id)) if id == keyword)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<Span> {
        if self.peek() == Some(&token) {
            let span = self.span();
            self.pos += 1;
            Ok(span)
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("`{keyword}`")))
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        match self.peek() {
            Some(Token::Id(name)) | Some(Token::ExplicitId(name)) => {
                let ident = Ident {
                    name: name.clone(),
                    span: self.span(),
                };
                self.pos += 1;
                Ok(ident)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Consecutive doc comments, joined with newlines.
    fn docs(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(Token::DocComment(text)) = self.peek() {
            lines.push(text.clone());
            self.pos += 1;
        }
        lines.join("\n")
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError::at(self.path, self.source, offset, message)
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = match self.peek() {
            Some(tok) => tok.describe(),
            None => "end of input".to_string(),
        };
        self.error_at(self.span().start, format!("expected {expected}, found {found}"))
    }

    /// Comma separated items up to `close`, trailing comma allowed.
    fn comma_list<T>(
        &mut self,
        close: Token,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        loop {
            if self.eat(&close) {
                return Ok(items);
            }
            items.push(item(self)?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    // ------------------------------------------------------------------
    // Top level
    // ------------------------------------------------------------------

    fn document(&mut self) -> Result<Document> {
        let mut package = None;
        let mut items = Vec::new();

        loop {
            let docs = self.docs();
            if self.peek().is_none() {
                break;
            }
            if self.at_keyword("package") {
                let start = self.span().start;
                if package.is_some() || !items.is_empty() {
                    return Err(self.error_at(
                        start,
                        "`package` must be the first declaration of a document",
                    ));
                }
                self.pos += 1;
                package = Some(self.package_name()?);
                self.expect(Token::Semicolon)?;
            } else if self.eat_keyword("interface") {
                let name = self.ident()?;
                let body = self.interface_body()?;
                items.push(TopItem::Interface(InterfaceDecl {
                    name,
                    docs,
                    items: body,
                }));
            } else if self.eat_keyword("world") {
                items.push(TopItem::World(self.world(docs)?));
            } else if self.eat_keyword("use") {
                let path = self.use_path()?;
                let alias = if self.eat_keyword("as") {
                    Some(self.ident()?)
                } else {
                    None
                };
                self.expect(Token::Semicolon)?;
                items.push(TopItem::Use(TopUse { path, alias }));
            } else {
                return Err(self.unexpected("`package`, `interface`, `world` or `use`"));
            }
        }

        Ok(Document {
            path: self.path.to_string(),
            package,
            items,
        })
    }

    fn package_name(&mut self) -> Result<PackageName> {
        let namespace = self.ident()?;
        self.expect(Token::Colon)?;
        let name = self.ident()?;
        let version = self.version()?;
        Ok(PackageName {
            namespace: namespace.name,
            name: name.name,
            version,
        })
    }

    fn version(&mut self) -> Result<Option<String>> {
        if !self.eat(&Token::At) {
            return Ok(None);
        }
        match self.peek() {
            Some(Token::Version(v)) => {
                let v = v.clone();
                self.pos += 1;
                Ok(Some(v))
            }
            _ => Err(self.unexpected("a version like `1.0.0`")),
        }
    }

    fn use_path(&mut self) -> Result<UsePath> {
        let first = self.ident()?;
        if !self.eat(&Token::Colon) {
            return Ok(UsePath::Local(first));
        }
        let name = self.ident()?;
        self.expect(Token::Slash)?;
        let interface = self.ident()?;
        let version = self.version()?;
        let end = self.tokens[..self.pos]
            .last()
            .map(|(_, span)| span.end)
            .unwrap_or(interface.span.end);
        Ok(UsePath::Package {
            package: PackageName {
                namespace: first.name,
                name: name.name,
                version,
            },
            interface,
            span: first.span.start..end,
        })
    }

    /// `use path.{a, b as c};` after the `use` keyword.
    fn use_decl(&mut self) -> Result<UseDecl> {
        let path = self.use_path()?;
        self.expect(Token::Period)?;
        self.expect(Token::LBrace)?;
        let names = self.comma_list(Token::RBrace, |p| {
            let name = p.ident()?;
            let alias = if p.eat_keyword("as") {
                Some(p.ident()?)
            } else {
                None
            };
            Ok(UseName { name, alias })
        })?;
        self.expect(Token::Semicolon)?;
        Ok(UseDecl { path, names })
    }

    // ------------------------------------------------------------------
    // Interfaces and worlds
    // ------------------------------------------------------------------

    fn interface_body(&mut self) -> Result<Vec<InterfaceItem>> {
        self.expect(Token::LBrace)?;
        let mut items = Vec::new();
        loop {
            let docs = self.docs();
            if self.eat(&Token::RBrace) {
                return Ok(items);
            }
            if self.eat_keyword("use") {
                items.push(InterfaceItem::Use(self.use_decl()?));
            } else if let Some(decl) = self.type_decl(&docs)? {
                items.push(InterfaceItem::Type(decl));
            } else {
                self.reject_unsupported()?;
                let name = self.ident()?;
                self.expect(Token::Colon)?;
                items.push(InterfaceItem::Func(self.func(name, docs)?));
            }
        }
    }

    fn world(&mut self, docs: String) -> Result<WorldDecl> {
        let name = self.ident()?;
        self.expect(Token::LBrace)?;
        let mut items = Vec::new();
        loop {
            let item_docs = self.docs();
            if self.eat(&Token::RBrace) {
                break;
            }
            if self.eat_keyword("import") {
                items.push(WorldItemDecl::Import(self.extern_decl(item_docs)?));
            } else if self.eat_keyword("export") {
                items.push(WorldItemDecl::Export(self.extern_decl(item_docs)?));
            } else if self.eat_keyword("use") {
                items.push(WorldItemDecl::Use(self.use_decl()?));
            } else if let Some(decl) = self.type_decl(&item_docs)? {
                items.push(WorldItemDecl::Type(decl));
            } else {
                self.reject_unsupported()?;
                return Err(self.unexpected("`import`, `export`, `use` or a type definition"));
            }
        }
        Ok(WorldDecl { name, docs, items })
    }

    fn reject_unsupported(&self) -> Result<()> {
        let start = self.span().start;
        let followed_by_colon = self.peek_at(1) == Some(&Token::Colon);
        if self.at_keyword("resource") && !followed_by_colon {
            return Err(self.error_at(start, "resources are not supported"));
        }
        if self.at_keyword("include") && !followed_by_colon {
            return Err(self.error_at(start, "`include` is not supported"));
        }
        Ok(())
    }

    fn extern_decl(&mut self, docs: String) -> Result<ExternDecl> {
        let named = matches!(self.peek(), Some(Token::Id(_)) | Some(Token::ExplicitId(_)))
            && self.peek_at(1) == Some(&Token::Colon)
            && matches!(self.peek_at(2), Some(Token::Id(kw)) if kw == "func" || kw == "interface")
            && self.peek_at(3) != Some(&Token::Slash);

        if !named {
            let path = self.use_path()?;
            self.expect(Token::Semicolon)?;
            return Ok(ExternDecl::Path { path, docs });
        }

        let name = self.ident()?;
        self.expect(Token::Colon)?;
        if self.eat_keyword("interface") {
            let items = self.interface_body()?;
            self.eat(&Token::Semicolon);
            Ok(ExternDecl::Interface { name, docs, items })
        } else {
            Ok(ExternDecl::Func(self.func(name, docs)?))
        }
    }

    /// `func(params) [-> ty];` after `name:`.
    fn func(&mut self, name: Ident, docs: String) -> Result<FuncDecl> {
        self.expect_keyword("func")?;
        self.expect(Token::LParen)?;
        let params = self.comma_list(Token::RParen, |p| {
            let name = p.ident()?;
            p.expect(Token::Colon)?;
            Ok((name, p.type_ref()?))
        })?;
        let result = if self.eat(&Token::Arrow) {
            Some(self.type_ref()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;
        Ok(FuncDecl {
            name,
            docs,
            params,
            result,
        })
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    /// A type definition, if the next token starts one.
    fn type_decl(&mut self, docs: &str) -> Result<Option<TypeDecl>> {
        // `record: func()` is a function named after a keyword
        if self.peek_at(1) == Some(&Token::Colon) {
            return Ok(None);
        }
        let kind = if self.eat_keyword("type") {
            let name = self.ident()?;
            self.expect(Token::Equals)?;
            let ty = self.type_ref()?;
            self.expect(Token::Semicolon)?;
            return Ok(Some(TypeDecl {
                name,
                docs: docs.to_string(),
                kind: TypeDeclKind::Alias(ty),
            }));
        } else if self.at_keyword("record") {
            "record"
        } else if self.at_keyword("variant") {
            "variant"
        } else if self.at_keyword("enum") {
            "enum"
        } else if self.at_keyword("flags") {
            "flags"
        } else {
            return Ok(None);
        };
        self.pos += 1;

        let name = self.ident()?;
        self.expect(Token::LBrace)?;
        let keyword = kind;
        let kind = match keyword {
            "record" => TypeDeclKind::Record(self.comma_list(Token::RBrace, |p| {
                let docs = p.docs();
                let name = p.ident()?;
                p.expect(Token::Colon)?;
                Ok(FieldDecl {
                    name,
                    docs,
                    ty: p.type_ref()?,
                })
            })?),
            "variant" => TypeDeclKind::Variant(self.comma_list(Token::RBrace, |p| {
                let docs = p.docs();
                let name = p.ident()?;
                let ty = if p.eat(&Token::LParen) {
                    let ty = p.type_ref()?;
                    p.expect(Token::RParen)?;
                    Some(ty)
                } else {
                    None
                };
                Ok(CaseDecl { name, docs, ty })
            })?),
            "enum" => TypeDeclKind::Enum(self.comma_list(Token::RBrace, Self::name_decl)?),
            _ => TypeDeclKind::Flags(self.comma_list(Token::RBrace, Self::name_decl)?),
        };
        let empty = match &kind {
            TypeDeclKind::Variant(cases) => cases.is_empty(),
            TypeDeclKind::Enum(cases) | TypeDeclKind::Flags(cases) => cases.is_empty(),
            _ => false,
        };
        if empty {
            return Err(self.error_at(
                name.span.start,
                format!("{keyword} `{}` must not be empty", name.name),
            ));
        }
        Ok(Some(TypeDecl {
            name,
            docs: docs.to_string(),
            kind,
        }))
    }

    fn name_decl(&mut self) -> Result<NameDecl> {
        let docs = self.docs();
        let name = self.ident()?;
        Ok(NameDecl { name, docs })
    }

    fn type_ref(&mut self) -> Result<TypeRef> {
        let start = self.span().start;
        let Some(token) = self.peek().cloned() else {
            return Err(self.unexpected("a type"));
        };
        let id = match token {
            Token::ExplicitId(_) => return Ok(TypeRef::Named(self.ident()?)),
            Token::Id(id) => id,
            _ => return Err(self.unexpected("a type")),
        };

        let simple = match id.as_str() {
            "bool" => Some(TypeRef::Bool),
            "s8" => Some(TypeRef::S8),
            "s16" => Some(TypeRef::S16),
            "s32" => Some(TypeRef::S32),
            "s64" => Some(TypeRef::S64),
            "u8" => Some(TypeRef::U8),
            "u16" => Some(TypeRef::U16),
            "u32" => Some(TypeRef::U32),
            "u64" => Some(TypeRef::U64),
            "f32" | "float32" => Some(TypeRef::F32),
            "f64" | "float64" => Some(TypeRef::F64),
            "char" => Some(TypeRef::Char),
            "string" => Some(TypeRef::String),
            _ => None,
        };
        if let Some(ty) = simple {
            self.pos += 1;
            return Ok(ty);
        }

        match id.as_str() {
            "list" | "option" => {
                self.pos += 1;
                self.expect(Token::Lt)?;
                let inner = Box::new(self.type_ref()?);
                self.expect(Token::Gt)?;
                Ok(if id == "list" {
                    TypeRef::List(inner)
                } else {
                    TypeRef::Option(inner)
                })
            }
            "result" => {
                self.pos += 1;
                if !self.eat(&Token::Lt) {
                    return Ok(TypeRef::Result { ok: None, err: None });
                }
                let ok = if self.eat(&Token::Underscore) {
                    self.expect(Token::Comma)?;
                    None
                } else {
                    Some(Box::new(self.type_ref()?))
                };
                let err = if ok.is_none() || self.eat(&Token::Comma) {
                    Some(Box::new(self.type_ref()?))
                } else {
                    None
                };
                self.expect(Token::Gt)?;
                Ok(TypeRef::Result { ok, err })
            }
            "tuple" => {
                self.pos += 1;
                self.expect(Token::Lt)?;
                let types = self.comma_list(Token::Gt, Self::type_ref)?;
                if types.is_empty() {
                    return Err(self.error_at(start, "`tuple` needs at least one type"));
                }
                Ok(TypeRef::Tuple(types))
            }
            "borrow" | "own" => Err(self.error_at(start, "resources are not supported")),
            "future" | "stream" => Err(self.error_at(start, format!("`{id}` is not supported"))),
            _ => Ok(TypeRef::Named(self.ident()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = r#"
package example:host;

/// The host world
world host {
  import print: func(msg: string);

  record record-test {
    a: u32,
    b: string,
    c: float64,
  }

  export run: func();
  export map: func(a: list<u8>, b: option<record-test>) -> result<_, string>;
}
"#;

    fn world(doc: &Document) -> &WorldDecl {
        doc.worlds().next().unwrap()
    }

    #[test]
    fn test_parse_world() {
        let doc = parse_document("host.wit", HOST).unwrap();
        assert_eq!(
            doc.package,
            Some(PackageName {
                namespace: "example".into(),
                name: "host".into(),
                version: None,
            })
        );
        let world = world(&doc);
        assert_eq!(world.name.name, "host");
        assert_eq!(world.docs, "The host world");
        assert_eq!(world.items.len(), 4);

        let WorldItemDecl::Type(record) = &world.items[1] else {
            panic!("expected a record");
        };
        let TypeDeclKind::Record(fields) = &record.kind else {
            panic!("expected a record");
        };
        let field_types: Vec<&TypeRef> = fields.iter().map(|f| &f.ty).collect();
        assert_eq!(field_types, vec![&TypeRef::U32, &TypeRef::String, &TypeRef::F64]);

        let WorldItemDecl::Export(ExternDecl::Func(map)) = &world.items[3] else {
            panic!("expected an exported function");
        };
        assert_eq!(map.params.len(), 2);
        assert_eq!(
            map.result,
            Some(TypeRef::Result {
                ok: None,
                err: Some(Box::new(TypeRef::String)),
            })
        );
    }

    #[test]
    fn test_parse_interfaces_and_uses() {
        let source = r#"
package wasi:demo@0.2.0;

use other:types/shapes@1.0.0 as shapes;

interface store {
  use shapes.{point, size as extent};

  enum color { red, green }
  flags perms { read, write }
  variant value { none, num(s64), pair(tuple<u8, u8>) }
  type id = u64;

  get: func(key: string) -> option<value>;
}

world app {
  import store;
  import other:types/log;
  export api: interface {
    ping: func() -> result;
  }
}
"#;
        let doc = parse_document("app.wit", source).unwrap();
        assert_eq!(doc.package.as_ref().unwrap().to_string(), "wasi:demo@0.2.0");

        let TopItem::Use(top_use) = &doc.items[0] else {
            panic!("expected a top-level use");
        };
        assert_eq!(top_use.path.to_string(), "other:types/shapes@1.0.0");
        assert_eq!(top_use.alias.as_ref().unwrap().name, "shapes");

        let store = doc.interfaces().next().unwrap();
        assert_eq!(store.items.len(), 6);
        let InterfaceItem::Use(use_decl) = &store.items[0] else {
            panic!("expected a use");
        };
        assert_eq!(use_decl.names[1].local().name, "extent");

        let world = world(&doc);
        assert!(matches!(
            &world.items[0],
            WorldItemDecl::Import(ExternDecl::Path { path: UsePath::Local(name), .. }) if name.name == "store"
        ));
        assert!(matches!(
            &world.items[1],
            WorldItemDecl::Import(ExternDecl::Path { path: UsePath::Package { .. }, .. })
        ));
        assert!(matches!(
            &world.items[2],
            WorldItemDecl::Export(ExternDecl::Interface { items, .. }) if items.len() == 1
        ));
    }

    #[test]
    fn test_keyword_as_explicit_name() {
        let doc = parse_document("a.wit", "interface i { %record: func(%type: u8); }").unwrap();
        let iface = doc.interfaces().next().unwrap();
        let InterfaceItem::Func(func) = &iface.items[0] else {
            panic!("expected a function");
        };
        assert_eq!(func.name.name, "record");
        assert_eq!(func.params[0].0.name, "type");
    }

    #[test]
    fn test_missing_semicolon_is_positioned() {
        let err = parse_document("bad.wit", "package a:b;\nworld w {\n  export run: func()\n}")
            .unwrap_err();
        assert_eq!(err.path, "bad.wit");
        assert_eq!((err.line, err.column), (4, 1));
        assert_eq!(err.message, "expected `;`, found `}`");
    }

    #[test]
    fn test_resources_are_rejected() {
        let err = parse_document("r.wit", "interface i {\n  resource file;\n}").unwrap_err();
        assert_eq!(err.to_string(), "r.wit:2:3: resources are not supported");
    }

    #[test]
    fn test_include_is_rejected() {
        let err = parse_document("w.wit", "world w { include other; }").unwrap_err();
        assert_eq!(err.message, "`include` is not supported");
    }

    #[test]
    fn test_empty_case_lists_are_rejected() {
        let err = parse_document("v.wit", "interface i {\n  variant shape {}\n}").unwrap_err();
        assert_eq!(err.to_string(), "v.wit:2:11: variant `shape` must not be empty");

        let err = parse_document("e.wit", "world w { enum color {} }").unwrap_err();
        assert_eq!(err.message, "enum `color` must not be empty");

        let err = parse_document("f.wit", "world w { flags perms {} }").unwrap_err();
        assert_eq!(err.message, "flags `perms` must not be empty");

        assert!(parse_document("r.wit", "world w { record unit {} }").is_ok());
    }

    #[test]
    fn test_package_after_items() {
        let err = parse_document("p.wit", "world w {}\npackage a:b;").unwrap_err();
        assert_eq!((err.line, err.column), (2, 1));
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = parse_document("e.wit", "world w {").unwrap_err();
        assert_eq!(err.message, "expected `import`, `export`, `use` or a type definition, found end of input");
    }
}
