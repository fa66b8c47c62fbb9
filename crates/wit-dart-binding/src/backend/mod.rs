//! Dart backend - generate Dart bindings from a resolved WIT world
//!
//! Output is a pure function of the world and the configuration; no paths
//! or timestamps end up in the generated text.

mod functions;
mod json;
mod names;
mod records;
mod types;
mod variants;

use wit_dart_common::codegen::{comment, doc_comment, Source};
use wit_dart_common::GeneratorConfig;

use crate::frontend::{TypeDef, TypeDefKind, World, WorldItem};

/// Lints the generated code may trip
const IGNORED_LINTS: &str = "require_trailing_commas, unnecessary_non_null_assertion, \
unused_element, unused_field, avoid_returning_null_for_void, lines_longer_than_80_chars";

/// Generates the Dart source for one world.
pub struct DartGen<'a> {
    world: &'a World,
    config: &'a GeneratorConfig,
}

impl<'a> DartGen<'a> {
    pub fn new(world: &'a World, config: &'a GeneratorConfig) -> Self {
        Self { world, config }
    }

    pub fn generate(&self) -> String {
        let mut src = Source::new();
        if let Some(header) = &self.config.file_header {
            src.push_raw(header);
            src.push_raw("\n");
        }
        src.line(comment("FILE GENERATED FROM WIT"));
        src.blank();
        src.line(comment(&format!("ignore_for_file: {IGNORED_LINTS}")));
        src.blank();
        src.line("import 'dart:async';");
        src.line(comment("ignore: unused_import"));
        src.line("import 'dart:typed_data';");
        src.blank();
        src.line("import 'package:wasm_wit_component/wasm_wit_component.dart';");

        for def in &self.world.types {
            src.blank();
            self.type_def(&mut src, def);
        }

        src.blank();
        self.imports_class(&mut src);
        for item in &self.world.imports {
            if let WorldItem::Interface {
                name,
                docs,
                functions,
                ..
            } = item
            {
                src.blank();
                self.import_interface(&mut src, name, docs, functions);
            }
        }
        for item in &self.world.exports {
            if let WorldItem::Interface {
                name,
                docs,
                qualified_name,
                functions,
            } = item
            {
                src.blank();
                self.export_interface(&mut src, name, docs, qualified_name, functions);
            }
        }

        src.blank();
        self.world_class(&mut src);
        src.into_string()
    }

    fn type_def(&self, src: &mut Source, def: &TypeDef) {
        match &def.kind {
            TypeDefKind::Record(fields) => self.record(src, def, fields),
            TypeDefKind::Variant(cases) => self.variant(src, def, cases),
            TypeDefKind::Enum(cases) => self.enumeration(src, def, cases),
            TypeDefKind::Flags(flags) => self.flags(src, def, flags),
            TypeDefKind::Alias(target) => self.alias(src, def, target),
        }
    }

    /// WIT docs as `///` lines, when enabled.
    pub(crate) fn docs(&self, src: &mut Source, docs: &str) {
        if !self.config.generate_docs || docs.is_empty() {
            return;
        }
        for line in doc_comment(docs) {
            src.line(line);
        }
    }
}

/// Generate Dart source for `world`.
pub fn generate_dart(world: &World, config: &GeneratorConfig) -> String {
    DartGen::new(world, config).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{Function, Type};
    use wit_dart_common::{InputSource, Int64Type};

    fn function(name: &str, params: Vec<(&str, Type)>, result: Option<Type>) -> Function {
        Function {
            name: name.into(),
            docs: format!("Calls {name}"),
            params: params
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
            result,
        }
    }

    fn world() -> World {
        World {
            name: "my-app".into(),
            docs: "The app".into(),
            types: vec![],
            imports: vec![WorldItem::Interface {
                name: "logging".into(),
                docs: String::new(),
                qualified_name: "wasi:logging/logging".into(),
                functions: vec![function("log", vec![("msg", Type::String)], None)],
            }],
            exports: vec![
                WorldItem::Interface {
                    name: "api".into(),
                    docs: String::new(),
                    qualified_name: "my:app/api".into(),
                    functions: vec![function("count", vec![], Some(Type::U64))],
                },
                WorldItem::Function(function("stop", vec![("code", Type::U8)], None)),
            ],
        }
    }

    #[test]
    fn test_file_header_and_world_classes() {
        let world = world();
        let mut config = GeneratorConfig::new(InputSource::path("app.wit"));
        config.file_header = Some("// Copyright ACME".into());
        let out = generate_dart(&world, &config);

        assert!(out.starts_with("// Copyright ACME\n// FILE GENERATED FROM WIT\n\n"));
        assert!(out.contains(
            "class MyAppWorldImports {\n  final LoggingImport logging;\n\n  const MyAppWorldImports({\n    required this.logging,\n  });\n}\n"
        ));
        assert!(out.contains("abstract class LoggingImport {\n  void log(String msg);\n}\n"));
        assert!(out.contains(
            "  int count() => library.call('my:app/api#count', const []) as int;\n"
        ));
        assert!(out.contains("  late final api = ApiExport(library);\n"));
        assert!(out.contains("  void stop(int code) => library.call('stop', [code]);\n"));
        assert!(!out.contains("///"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_async_worker_and_docs() {
        let world = world();
        let mut config = GeneratorConfig::new(InputSource::path("app.wit"));
        config.async_worker = true;
        config.generate_docs = true;
        config.int64_type = Int64Type::ArbitraryPrecision;
        let out = generate_dart(&world, &config);

        assert!(out.contains("/// The app\nclass MyAppWorld {\n"));
        assert!(out.contains("  /// Calls stop\n  Future<void> stop(int code) => library.callAsync('stop', [code]);\n"));
        assert!(out.contains(
            "  Future<BigInt> count() async => await library.callAsync('my:app/api#count', const []) as BigInt;\n"
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let world = world();
        let config = GeneratorConfig::new(InputSource::path("app.wit"));
        assert_eq!(generate_dart(&world, &config), generate_dart(&world, &config));
    }
}
