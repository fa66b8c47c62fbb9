//! JSON conversion expressions
//!
//! `to_json` turns a Dart value into JSON-compatible values (maps, lists,
//! strings, numbers, booleans and null); `from_json` reads it back from an
//! `Object?`.

use wit_dart_common::Int64Type;

use super::names::type_name;
use super::DartGen;
use crate::frontend::{Type, TypeDefKind};

impl DartGen<'_> {
    /// Whether the Dart value of `ty` is already JSON-compatible.
    fn json_native(&self, ty: &Type) -> bool {
        match ty {
            Type::Bool
            | Type::S8
            | Type::S16
            | Type::S32
            | Type::U8
            | Type::U16
            | Type::U32
            | Type::F32
            | Type::F64
            | Type::Char
            | Type::String => true,
            Type::S64 | Type::U64 => self.config.int64_type == Int64Type::NativeFixed64,
            Type::List(inner) => self.typed_list(inner).is_some() || self.json_native(inner),
            Type::Option(inner) => {
                self.config.use_null_for_option
                    && !self.is_nullable(inner)
                    && self.json_native(inner)
            }
            Type::Named(id) => match &self.world.type_def(*id).kind {
                TypeDefKind::Alias(target) => self.json_native(target),
                _ => false,
            },
            Type::Result { .. } | Type::Tuple(_) => false,
        }
    }

    /// Expression converting `expr` of type `ty` to JSON.
    pub(crate) fn to_json(&self, expr: &str, ty: &Type) -> String {
        if self.json_native(ty) {
            return expr.to_string();
        }
        match ty {
            Type::S64 | Type::U64 => format!("{expr}.toString()"),
            Type::List(inner) => {
                format!("{expr}.map((e) => {}).toList()", self.to_json("e", inner))
            }
            Type::Option(inner) if self.is_nullable(ty) => format!(
                "{expr} == null ? null : {}",
                self.to_json(&format!("{expr}!"), inner)
            ),
            Type::Option(inner) => {
                format!("{expr}.toJson((e) => {})", self.to_json("e", inner))
            }
            Type::Result { ok, err } => format!(
                "{expr}.toJson({}, {})",
                self.to_json_closure(ok.as_deref()),
                self.to_json_closure(err.as_deref())
            ),
            Type::Tuple(types) => {
                let items: Vec<String> = types
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| self.to_json(&format!("{expr}.${}", i + 1), ty))
                    .collect();
                format!("[{}]", items.join(", "))
            }
            Type::Named(id) => match &self.world.type_def(*id).kind {
                TypeDefKind::Alias(target) => self.to_json(expr, target),
                _ => format!("{expr}.toJson()"),
            },
            _ => expr.to_string(),
        }
    }

    /// Expression reading a value of type `ty` from the JSON value `expr`.
    pub(crate) fn from_json(&self, expr: &str, ty: &Type) -> String {
        match ty {
            Type::Bool => format!("{expr}! as bool"),
            Type::S8 | Type::S16 | Type::S32 | Type::U8 | Type::U16 | Type::U32 => {
                format!("{expr}! as int")
            }
            Type::S64 | Type::U64 => match self.config.int64_type {
                Int64Type::NativeFixed64 => format!("{expr}! as int"),
                Int64Type::ArbitraryPrecision => format!("BigInt.parse({expr}! as String)"),
            },
            Type::F32 | Type::F64 => format!("({expr}! as num).toDouble()"),
            Type::Char | Type::String => format!("{expr}! as String"),
            Type::List(inner) => match self.typed_list(inner) {
                Some(list) => format!(
                    "{list}.fromList(({expr}! as List).cast<{}>())",
                    self.dart_type(inner)
                ),
                None => format!(
                    "({expr}! as List).map((e) => {}).toList()",
                    self.from_json("e", inner)
                ),
            },
            Type::Option(inner) if self.is_nullable(ty) => format!(
                "{expr} == null ? null : {}",
                self.from_json(expr, inner)
            ),
            Type::Option(inner) => format!(
                "Option.fromJson({expr}, (e) => {})",
                self.from_json("e", inner)
            ),
            Type::Result { ok, err } => format!(
                "Result.fromJson({expr}, {}, {})",
                self.from_json_closure(ok.as_deref()),
                self.from_json_closure(err.as_deref())
            ),
            Type::Tuple(types) => {
                let items: Vec<String> = types
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| self.from_json(&format!("({expr}! as List)[{i}]"), ty))
                    .collect();
                if items.len() == 1 {
                    format!("({},)", items[0])
                } else {
                    format!("({})", items.join(", "))
                }
            }
            Type::Named(id) => {
                let def = self.world.type_def(*id);
                match &def.kind {
                    TypeDefKind::Alias(target) => self.from_json(expr, target),
                    _ => format!("{}.fromJson({expr})", type_name(&def.name)),
                }
            }
        }
    }

    fn to_json_closure(&self, ty: Option<&Type>) -> String {
        match ty {
            Some(ty) => format!("(e) => {}", self.to_json("e", ty)),
            None => "(_) => null".to_string(),
        }
    }

    fn from_json_closure(&self, ty: Option<&Type>) -> String {
        match ty {
            Some(ty) => format!("(e) => {}", self.from_json("e", ty)),
            None => "(_) {}".to_string(),
        }
    }
}
