//! World imports, world exports and interface classes

use wit_dart_common::codegen::Source;

use super::names::{member_name, string_literal, type_name};
use super::DartGen;
use crate::frontend::{Function, WorldItem};

impl DartGen<'_> {
    /// `<World>WorldImports`: everything the host provides to the component
    pub(crate) fn imports_class(&self, src: &mut Source) {
        let class = format!("{}WorldImports", type_name(&self.world.name));
        src.nested(format!("class {class} {{"), "}", |src| {
            let mut fields = Vec::new();
            for item in &self.world.imports {
                match item {
                    WorldItem::Function(func) => {
                        self.docs(src, &func.docs);
                        let name = member_name(&func.name);
                        src.line(format!(
                            "final {} Function({}) {name};",
                            self.optional_type(func.result.as_ref()),
                            self.params(func)
                        ));
                        fields.push(name);
                    }
                    WorldItem::Interface { name, docs, .. } => {
                        self.docs(src, docs);
                        let field = member_name(name);
                        src.line(format!("final {}Import {field};", type_name(name)));
                        fields.push(field);
                    }
                }
            }

            if fields.is_empty() {
                src.line(format!("const {class}();"));
                return;
            }
            src.blank();
            src.nested(format!("const {class}({{"), "});", |src| {
                for field in &fields {
                    src.line(format!("required this.{field},"));
                }
            });
        });
    }

    /// Interface the host implements for an imported WIT interface
    pub(crate) fn import_interface(
        &self,
        src: &mut Source,
        name: &str,
        docs: &str,
        functions: &[Function],
    ) {
        self.docs(src, docs);
        src.nested(format!("abstract class {}Import {{", type_name(name)), "}", |src| {
            for func in functions {
                self.docs(src, &func.docs);
                src.line(format!(
                    "{} {}({});",
                    self.optional_type(func.result.as_ref()),
                    member_name(&func.name),
                    self.params(func)
                ));
            }
        });
    }

    /// Wrapper calling the functions of an exported WIT interface
    pub(crate) fn export_interface(
        &self,
        src: &mut Source,
        name: &str,
        docs: &str,
        qualified_name: &str,
        functions: &[Function],
    ) {
        let class = format!("{}Export", type_name(name));
        self.docs(src, docs);
        src.nested(format!("class {class} {{"), "}", |src| {
            src.line("final WasmLibrary library;");
            src.blank();
            src.line(format!("const {class}(this.library);"));
            for func in functions {
                src.blank();
                self.export_method(src, func, &format!("{qualified_name}#{}", func.name));
            }
        });
    }

    /// `<World>World`: the instantiated component
    pub(crate) fn world_class(&self, src: &mut Source) {
        let world = type_name(&self.world.name);
        let class = format!("{world}World");
        self.docs(src, &self.world.docs);
        src.nested(format!("class {class} {{"), "}", |src| {
            src.line(format!("final {world}WorldImports imports;"));
            src.line("final WasmLibrary library;");
            src.blank();
            src.nested(format!("{class}({{"), "});", |src| {
                src.line("required this.imports,");
                src.line("required this.library,");
            });

            for item in &self.world.exports {
                src.blank();
                match item {
                    WorldItem::Function(func) => self.export_method(src, func, &func.name),
                    WorldItem::Interface { name, docs, .. } => {
                        self.docs(src, docs);
                        src.line(format!(
                            "late final {} = {}Export(library);",
                            member_name(name),
                            type_name(name)
                        ));
                    }
                }
            }
        });
    }

    fn export_method(&self, src: &mut Source, func: &Function, call_name: &str) {
        let name = member_name(&func.name);
        let params = self.params(func);
        let args: Vec<String> = func.params.iter().map(|(arg, _)| member_name(arg)).collect();
        let args = if args.is_empty() {
            "const []".to_string()
        } else {
            format!("[{}]", args.join(", "))
        };
        let call = string_literal(call_name);

        self.docs(src, &func.docs);
        let line = match (&func.result, self.config.async_worker) {
            (None, false) => format!("void {name}({params}) => library.call({call}, {args});"),
            (Some(ty), false) => {
                let ty = self.dart_type(ty);
                format!("{ty} {name}({params}) => library.call({call}, {args}) as {ty};")
            }
            (None, true) => {
                format!("Future<void> {name}({params}) => library.callAsync({call}, {args});")
            }
            (Some(ty), true) => {
                let ty = self.dart_type(ty);
                format!(
                    "Future<{ty}> {name}({params}) async => await library.callAsync({call}, {args}) as {ty};"
                )
            }
        };
        src.line(line);
    }

    fn params(&self, func: &Function) -> String {
        func.params
            .iter()
            .map(|(name, ty)| format!("{} {}", self.dart_type(ty), member_name(name)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
