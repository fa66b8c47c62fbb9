//! Records and the helpers shared by every generated class

use wit_dart_common::codegen::Source;

use super::names::{member_name, string_literal, type_name};
use super::DartGen;
use crate::frontend::{Field, Type, TypeDef};

/// A generated field: Dart name plus WIT type
pub(crate) struct Member<'t> {
    pub name: String,
    pub ty: &'t Type,
}

impl DartGen<'_> {
    pub(crate) fn record(&self, src: &mut Source, def: &TypeDef, fields: &[Field]) {
        let class = type_name(&def.name);
        let members: Vec<Member> = fields
            .iter()
            .map(|field| Member {
                name: member_name(&field.name),
                ty: &field.ty,
            })
            .collect();

        self.docs(src, &def.docs);
        src.nested(format!("class {class} {{"), "}", |src| {
            for (field, member) in fields.iter().zip(&members) {
                self.docs(src, &field.docs);
                src.line(format!("final {} {};", self.dart_type(member.ty), member.name));
            }
            if !members.is_empty() {
                src.blank();
            }

            if members.is_empty() {
                src.line(format!("const {class}();"));
            } else {
                src.nested(format!("const {class}({{"), "});", |src| {
                    for member in &members {
                        let required =
                            self.config.required_option || !self.is_nullable(member.ty);
                        let prefix = if required { "required " } else { "" };
                        src.line(format!("{prefix}this.{},", member.name));
                    }
                });
            }

            if self.config.json_serialization {
                src.blank();
                self.record_from_json(src, &class, fields, &members);
                src.blank();
                src.nested("Map<String, Object?> toJson() {", "}", |src| {
                    src.nested("return {", "};", |src| {
                        for (field, member) in fields.iter().zip(&members) {
                            src.line(format!(
                                "{}: {},",
                                string_literal(&field.name),
                                self.to_json(&member.name, member.ty)
                            ));
                        }
                    });
                });
            }

            if self.config.copy_with && !members.is_empty() {
                src.blank();
                self.copy_with(src, &class, &members, true);
            }
            if self.config.equality_and_hash_code {
                src.blank();
                self.equality(src, &class, &members);
            }
            if self.config.to_string {
                src.blank();
                let fields: Vec<String> = members
                    .iter()
                    .map(|member| format!("{}: ${}", member.name, member.name))
                    .collect();
                self.to_string_method(src, &format!("{class}({})", fields.join(", ")));
            }
        });
    }

    fn record_from_json(&self, src: &mut Source, class: &str, fields: &[Field], members: &[Member]) {
        if members.is_empty() {
            src.line(format!("factory {class}.fromJson(Object? json) => const {class}();"));
            return;
        }
        src.nested(format!("factory {class}.fromJson(Object? json) {{"), "}", |src| {
            src.line("final map = json! as Map<String, Object?>;");
            src.nested(format!("return {class}("), ");", |src| {
                for (field, member) in fields.iter().zip(members) {
                    let value = format!("map[{}]", string_literal(&field.name));
                    src.line(format!("{}: {},", member.name, self.from_json(&value, member.ty)));
                }
            });
        });
    }

    /// `copyWith` where `null` keeps the current value. Nullable members take
    /// an `Option` so they can be cleared.
    pub(crate) fn copy_with(&self, src: &mut Source, class: &str, members: &[Member], named: bool) {
        src.line(format!("{class} copyWith({{"));
        src.indent();
        for member in members {
            let ty = self.dart_type(member.ty);
            if self.is_nullable(member.ty) {
                src.line(format!("Option<{ty}>? {},", member.name));
            } else {
                src.line(format!("{ty}? {},", member.name));
            }
        }
        src.dedent();
        src.nested("}) {", "}", |src| {
            let values: Vec<(String, String)> = members
                .iter()
                .map(|member| {
                    let name = &member.name;
                    let value = if self.is_nullable(member.ty) {
                        format!("{name} != null ? {name}.value : this.{name}")
                    } else {
                        format!("{name} ?? this.{name}")
                    };
                    (name.clone(), value)
                })
                .collect();
            if named {
                src.nested(format!("return {class}("), ");", |src| {
                    for (name, value) in &values {
                        src.line(format!("{name}: {value},"));
                    }
                });
            } else {
                let args: Vec<&str> = values.iter().map(|(_, value)| value.as_str()).collect();
                src.line(format!("return {class}({});", args.join(", ")));
            }
        });
    }

    /// `operator ==` and `hashCode` over the members
    pub(crate) fn equality(&self, src: &mut Source, class: &str, members: &[Member]) {
        if members.is_empty() {
            src.line("List<Object?> get _props => const [];");
        } else {
            let props: Vec<&str> = members.iter().map(|member| member.name.as_str()).collect();
            src.line(format!("List<Object?> get _props => [{}];", props.join(", ")));
        }
        src.blank();
        src.line("@override");
        src.line("bool operator ==(Object other) =>");
        src.line("    identical(this, other) ||");
        src.line(format!("    other is {class} &&"));
        src.line("        const ObjectComparator().arePropsEqual(_props, other._props);");
        src.blank();
        src.line("@override");
        src.line("int get hashCode => const ObjectComparator().hashProps(_props);");
    }

    pub(crate) fn to_string_method(&self, src: &mut Source, text: &str) {
        src.line("@override");
        src.line(format!("String toString() => '{text}';"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{TypeDefKind, World};
    use wit_dart_common::{GeneratorConfig, InputSource};

    fn point_world() -> World {
        let field = |name: &str, ty: Type| Field {
            name: name.into(),
            docs: String::new(),
            ty,
        };
        World {
            name: "w".into(),
            docs: String::new(),
            types: vec![TypeDef {
                name: "point".into(),
                docs: "A point".into(),
                kind: TypeDefKind::Record(vec![
                    field("x", Type::S32),
                    field("label", Type::Option(Box::new(Type::String))),
                ]),
            }],
            imports: vec![],
            exports: vec![],
        }
    }

    fn render(world: &World, config: &GeneratorConfig) -> String {
        let def = &world.types[0];
        let TypeDefKind::Record(fields) = &def.kind else {
            panic!("expected a record");
        };
        let mut src = Source::new();
        DartGen::new(world, config).record(&mut src, def, fields);
        src.into_string()
    }

    #[test]
    fn test_record_without_helpers() {
        let world = point_world();
        let config = GeneratorConfig::all_disabled(InputSource::path("w.wit"));
        assert_eq!(
            render(&world, &config),
            "class Point {\n  final int x;\n  final Option<String> label;\n\n  const Point({\n    required this.x,\n    required this.label,\n  });\n}\n"
        );
    }

    #[test]
    fn test_record_with_defaults() {
        let world = point_world();
        let config = GeneratorConfig::new(InputSource::path("w.wit"));
        let out = render(&world, &config);
        assert!(out.contains("  final String? label;\n"));
        assert!(out.contains("    required this.x,\n    this.label,\n"));
        assert!(out.contains("    Option<String?>? label,\n"));
        assert!(out.contains("      label: label != null ? label.value : this.label,\n"));
        assert!(out.contains("  List<Object?> get _props => [x, label];\n"));
        assert!(out.contains("  String toString() => 'Point(x: $x, label: $label)';\n"));
        assert!(!out.contains("toJson"));
        assert!(!out.contains("/// A point"));
    }

    #[test]
    fn test_record_json_and_docs() {
        let world = point_world();
        let mut config = GeneratorConfig::new(InputSource::path("w.wit"));
        config.json_serialization = true;
        config.generate_docs = true;
        config.required_option = true;
        let out = render(&world, &config);
        assert!(out.starts_with("/// A point\nclass Point {\n"));
        assert!(out.contains("    required this.label,\n"));
        assert!(out.contains("      x: map['x']! as int,\n"));
        assert!(out.contains("      label: map['label'] == null ? null : map['label']! as String,\n"));
        assert!(out.contains("      'label': label,\n"));
    }
}
