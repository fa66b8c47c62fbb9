//! Variants, enums, flags and type aliases

use wit_dart_common::codegen::Source;

use super::names::{enum_value_name, member_name, string_literal, type_name};
use super::records::Member;
use super::DartGen;
use crate::frontend::{Case, EnumCase, Type, TypeDef};

/// Flag accessors that a flag name must not shadow
const FLAGS_RESERVED: &[&str] = &["flagsBits", "noFlags", "allFlags"];

impl DartGen<'_> {
    pub(crate) fn variant(&self, src: &mut Source, def: &TypeDef, cases: &[Case]) {
        let base = type_name(&def.name);
        let sealed_base = self.config.same_class_union;

        self.docs(src, &def.docs);
        let has_body = sealed_base || self.config.json_serialization;
        if !has_body {
            src.line(format!("sealed class {base} {{}}"));
        } else {
            src.nested(format!("sealed class {base} {{"), "}", |src| {
                let mut first = true;
                if sealed_base {
                    src.line(format!("const {base}();"));
                    src.blank();
                    for case in cases {
                        let factory = format!("const factory {base}.{}", member_name(&case.name));
                        let class = case_class(&base, case);
                        match &case.ty {
                            Some(ty) => src.line(format!(
                                "{factory}({} value) = {class};",
                                self.dart_type(ty)
                            )),
                            None => src.line(format!("{factory}() = {class};")),
                        }
                    }
                    first = false;
                }
                if self.config.json_serialization {
                    if !first {
                        src.blank();
                    }
                    self.variant_from_json(src, &base, cases);
                    src.blank();
                    src.line("Map<String, Object?> toJson();");
                }
            });
        }

        for case in cases {
            src.blank();
            self.variant_case(src, &base, case);
        }
    }

    fn variant_from_json(&self, src: &mut Source, base: &str, cases: &[Case]) {
        src.nested(format!("factory {base}.fromJson(Object? json) {{"), "}", |src| {
            src.line("final map = json! as Map<String, Object?>;");
            src.nested("return switch (map['tag']) {", "};", |src| {
                for case in cases {
                    let class = case_class(base, case);
                    let value = match &case.ty {
                        Some(ty) => format!("{class}({})", self.from_json("map['value']", ty)),
                        None => format!("const {class}()"),
                    };
                    src.line(format!("{} => {value},", string_literal(&case.name)));
                }
                src.line(format!(
                    "_ => throw FormatException('Unknown {base} case: ${{map['tag']}}'),"
                ));
            });
        });
    }

    fn variant_case(&self, src: &mut Source, base: &str, case: &Case) {
        let class = case_class(base, case);
        let relation = if self.config.same_class_union {
            "extends"
        } else {
            "implements"
        };
        let members: Vec<Member> = case
            .ty
            .iter()
            .map(|ty| Member {
                name: "value".to_string(),
                ty,
            })
            .collect();

        self.docs(src, &case.docs);
        src.nested(format!("class {class} {relation} {base} {{"), "}", |src| {
            match &case.ty {
                Some(ty) => {
                    src.line(format!("final {} value;", self.dart_type(ty)));
                    src.blank();
                    src.line(format!("const {class}(this.value);"));
                }
                None => src.line(format!("const {class}();")),
            }

            if self.config.json_serialization {
                src.blank();
                src.line("@override");
                src.nested("Map<String, Object?> toJson() {", "}", |src| {
                    src.nested("return {", "};", |src| {
                        src.line(format!("'tag': {},", string_literal(&case.name)));
                        if let Some(ty) = &case.ty {
                            src.line(format!("'value': {},", self.to_json("value", ty)));
                        }
                    });
                });
            }
            if self.config.copy_with && !members.is_empty() {
                src.blank();
                self.copy_with(src, &class, &members, false);
            }
            if self.config.equality_and_hash_code {
                src.blank();
                self.equality(src, &class, &members);
            }
            if self.config.to_string {
                src.blank();
                let payload = if members.is_empty() { "" } else { "$value" };
                self.to_string_method(
                    src,
                    &format!("{base}.{}({payload})", member_name(&case.name)),
                );
            }
        });
    }

    pub(crate) fn enumeration(&self, src: &mut Source, def: &TypeDef, cases: &[EnumCase]) {
        let name = type_name(&def.name);
        let json = self.config.json_serialization;

        self.docs(src, &def.docs);
        src.nested(format!("enum {name} {{"), "}", |src| {
            for (i, case) in cases.iter().enumerate() {
                self.docs(src, &case.docs);
                let last = i + 1 == cases.len();
                let terminator = if last && json { ";" } else { "," };
                src.line(format!("{}{terminator}", enum_value_name(&case.name)));
            }
            if !json {
                return;
            }

            src.blank();
            src.nested(format!("static {name} fromJson(Object? json) {{"), "}", |src| {
                src.nested("return switch (json) {", "};", |src| {
                    for case in cases {
                        src.line(format!(
                            "{} => {name}.{},",
                            string_literal(&case.name),
                            enum_value_name(&case.name)
                        ));
                    }
                    src.line(format!("_ => throw FormatException('Unknown {name}: $json'),"));
                });
            });
            src.blank();
            src.nested("String toJson() {", "}", |src| {
                src.nested("return switch (this) {", "};", |src| {
                    for case in cases {
                        src.line(format!(
                            "{name}.{} => {},",
                            enum_value_name(&case.name),
                            string_literal(&case.name)
                        ));
                    }
                });
            });
        });
    }

    pub(crate) fn flags(&self, src: &mut Source, def: &TypeDef, flags: &[EnumCase]) {
        let name = type_name(&def.name);
        let flag_names: Vec<String> = flags
            .iter()
            .map(|flag| {
                let flag_name = member_name(&flag.name);
                if FLAGS_RESERVED.contains(&flag_name.as_str()) {
                    format!("{flag_name}_")
                } else {
                    flag_name
                }
            })
            .collect();

        self.docs(src, &def.docs);
        src.nested(format!("class {name} {{"), "}", |src| {
            src.line("final int flagsBits;");
            src.blank();
            src.line(format!("const {name}(this.flagsBits);"));
            src.blank();
            src.line(format!("static const noFlags = {name}(0);"));
            src.line(format!(
                "static const allFlags = {name}((1 << {}) - 1);",
                flags.len()
            ));
            for (i, (flag, flag_name)) in flags.iter().zip(&flag_names).enumerate() {
                self.docs(src, &flag.docs);
                src.line(format!("static const {flag_name} = {name}(1 << {i});"));
            }
            src.blank();
            for (flag, flag_name) in flags.iter().zip(&flag_names) {
                src.line(format!(
                    "bool get is{} => (flagsBits & {flag_name}.flagsBits) != 0;",
                    type_name(&flag.name)
                ));
            }
            if !flags.is_empty() {
                src.blank();
            }
            src.line(format!(
                "{name} operator |({name} other) => {name}(flagsBits | other.flagsBits);"
            ));
            src.blank();
            src.line(format!(
                "{name} operator &({name} other) => {name}(flagsBits & other.flagsBits);"
            ));

            if self.config.json_serialization {
                src.blank();
                src.line(format!(
                    "factory {name}.fromJson(Object? json) => {name}(json! as int);"
                ));
                src.blank();
                src.line("int toJson() => flagsBits;");
            }
            if self.config.equality_and_hash_code {
                src.blank();
                let bits = Type::U32;
                self.equality(
                    src,
                    &name,
                    &[Member {
                        name: "flagsBits".to_string(),
                        ty: &bits,
                    }],
                );
            }
            if self.config.to_string {
                src.blank();
                let fields: Vec<String> = flags
                    .iter()
                    .map(|flag| {
                        let getter = format!("is{}", type_name(&flag.name));
                        format!("{}: ${getter}", member_name(&flag.name))
                    })
                    .collect();
                self.to_string_method(src, &format!("{name}({})", fields.join(", ")));
            }
        });
    }

    pub(crate) fn alias(&self, src: &mut Source, def: &TypeDef, target: &Type) {
        self.docs(src, &def.docs);
        src.line(format!(
            "typedef {} = {};",
            type_name(&def.name),
            self.dart_type(target)
        ));
    }
}

/// `ValueNum` for case `num` of variant `Value`
fn case_class(base: &str, case: &Case) -> String {
    format!("{base}{}", type_name(&case.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{TypeDefKind, World};
    use wit_dart_common::{GeneratorConfig, InputSource};

    fn world(kind: TypeDefKind) -> World {
        World {
            name: "w".into(),
            docs: String::new(),
            types: vec![TypeDef {
                name: "value".into(),
                docs: String::new(),
                kind,
            }],
            imports: vec![],
            exports: vec![],
        }
    }

    fn case(name: &str, ty: Option<Type>) -> Case {
        Case {
            name: name.into(),
            docs: String::new(),
            ty,
        }
    }

    fn named(name: &str) -> EnumCase {
        EnumCase {
            name: name.into(),
            docs: String::new(),
        }
    }

    fn render(world: &World, config: &GeneratorConfig) -> String {
        let def = &world.types[0];
        let mut src = Source::new();
        let dart = DartGen::new(world, config);
        match &def.kind {
            TypeDefKind::Variant(cases) => dart.variant(&mut src, def, cases),
            TypeDefKind::Enum(cases) => dart.enumeration(&mut src, def, cases),
            TypeDefKind::Flags(flags) => dart.flags(&mut src, def, flags),
            TypeDefKind::Alias(ty) => dart.alias(&mut src, def, ty),
            TypeDefKind::Record(_) => unreachable!(),
        }
        src.into_string()
    }

    fn variant_world() -> World {
        world(TypeDefKind::Variant(vec![
            case("none", None),
            case("num", Some(Type::S64)),
        ]))
    }

    #[test]
    fn test_variant_as_sealed_hierarchy() {
        let world = variant_world();
        let config = GeneratorConfig::new(InputSource::path("w.wit"));
        let out = render(&world, &config);
        assert!(out.starts_with(
            "sealed class Value {\n  const Value();\n\n  const factory Value.none() = ValueNone;\n  const factory Value.num(int value) = ValueNum;\n}\n"
        ));
        assert!(out.contains("\nclass ValueNone extends Value {\n  const ValueNone();\n"));
        assert!(out.contains("\nclass ValueNum extends Value {\n  final int value;\n\n  const ValueNum(this.value);\n"));
        assert!(out.contains("    return ValueNum(value ?? this.value);\n"));
        assert!(out.contains("  List<Object?> get _props => const [];\n"));
        assert!(out.contains("  String toString() => 'Value.num($value)';\n"));
    }

    #[test]
    fn test_variant_as_independent_classes() {
        let world = variant_world();
        let config = GeneratorConfig::all_disabled(InputSource::path("w.wit"));
        assert_eq!(
            render(&world, &config),
            "sealed class Value {}\n\nclass ValueNone implements Value {\n  const ValueNone();\n}\n\nclass ValueNum implements Value {\n  final int value;\n\n  const ValueNum(this.value);\n}\n"
        );
    }

    #[test]
    fn test_variant_json() {
        let world = variant_world();
        let mut config = GeneratorConfig::new(InputSource::path("w.wit"));
        config.json_serialization = true;
        let out = render(&world, &config);
        assert!(out.contains("      'none' => const ValueNone(),\n"));
        assert!(out.contains("      'num' => ValueNum(map['value']! as int),\n"));
        assert!(out.contains("      _ => throw FormatException('Unknown Value case: ${map['tag']}'),\n"));
        assert!(out.contains("      'tag': 'num',\n      'value': value,\n"));
    }

    #[test]
    fn test_enum() {
        let world = world(TypeDefKind::Enum(vec![named("red"), named("dark-blue")]));
        let mut config = GeneratorConfig::new(InputSource::path("w.wit"));
        assert_eq!(render(&world, &config), "enum Value {\n  red,\n  darkBlue,\n}\n");

        config.json_serialization = true;
        let out = render(&world, &config);
        assert!(out.starts_with("enum Value {\n  red,\n  darkBlue;\n\n"));
        assert!(out.contains("      'dark-blue' => Value.darkBlue,\n"));
        assert!(out.contains("      Value.darkBlue => 'dark-blue',\n"));
    }

    #[test]
    fn test_flags() {
        let world = world(TypeDefKind::Flags(vec![named("read"), named("write")]));
        let config = GeneratorConfig::new(InputSource::path("w.wit"));
        let out = render(&world, &config);
        assert!(out.contains("  static const allFlags = Value((1 << 2) - 1);\n"));
        assert!(out.contains("  static const write = Value(1 << 1);\n"));
        assert!(out.contains("  bool get isRead => (flagsBits & read.flagsBits) != 0;\n"));
        assert!(out.contains("  List<Object?> get _props => [flagsBits];\n"));
        assert!(out.contains("  String toString() => 'Value(read: $isRead, write: $isWrite)';\n"));
    }

    #[test]
    fn test_alias() {
        let world = world(TypeDefKind::Alias(Type::List(Box::new(Type::F32))));
        let config = GeneratorConfig::new(InputSource::path("w.wit"));
        assert_eq!(render(&world, &config), "typedef Value = Float32List;\n");
    }
}
