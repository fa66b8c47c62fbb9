//! WIT type to Dart type mapping

use wit_dart_common::Int64Type;

use super::names::type_name;
use super::DartGen;
use crate::frontend::{Type, TypeDefKind};

impl DartGen<'_> {
    /// The Dart spelling of `ty`.
    pub(crate) fn dart_type(&self, ty: &Type) -> String {
        match ty {
            Type::Bool => "bool".to_string(),
            Type::S8 | Type::S16 | Type::S32 | Type::U8 | Type::U16 | Type::U32 => {
                "int".to_string()
            }
            Type::S64 | Type::U64 => self.int64().to_string(),
            Type::F32 | Type::F64 => "double".to_string(),
            Type::Char | Type::String => "String".to_string(),
            Type::List(inner) => match self.typed_list(inner) {
                Some(list) => list.to_string(),
                None => format!("List<{}>", self.dart_type(inner)),
            },
            Type::Option(inner) => {
                if self.config.use_null_for_option && !self.is_nullable(inner) {
                    format!("{}?", self.dart_type(inner))
                } else {
                    format!("Option<{}>", self.dart_type(inner))
                }
            }
            Type::Result { ok, err } => format!(
                "Result<{}, {}>",
                self.optional_type(ok.as_deref()),
                self.optional_type(err.as_deref())
            ),
            Type::Tuple(types) => {
                let items: Vec<String> = types.iter().map(|ty| self.dart_type(ty)).collect();
                if items.len() == 1 {
                    format!("({},)", items[0])
                } else {
                    format!("({})", items.join(", "))
                }
            }
            Type::Named(id) => type_name(&self.world.type_def(*id).name),
        }
    }

    /// `void` for absent result payloads and function results
    pub(crate) fn optional_type(&self, ty: Option<&Type>) -> String {
        match ty {
            Some(ty) => self.dart_type(ty),
            None => "void".to_string(),
        }
    }

    /// Whether the Dart type of `ty` admits `null`.
    pub(crate) fn is_nullable(&self, ty: &Type) -> bool {
        match ty {
            Type::Option(inner) => self.config.use_null_for_option && !self.is_nullable(inner),
            Type::Named(id) => match &self.world.type_def(*id).kind {
                TypeDefKind::Alias(target) => self.is_nullable(target),
                _ => false,
            },
            _ => false,
        }
    }

    /// The `dart:typed_data` list for lists of `element`, if any.
    pub(crate) fn typed_list(&self, element: &Type) -> Option<&'static str> {
        if !self.config.typed_number_lists {
            return None;
        }
        let native_int64 = self.config.int64_type == Int64Type::NativeFixed64;
        match element {
            Type::U8 => Some("Uint8List"),
            Type::S8 => Some("Int8List"),
            Type::U16 => Some("Uint16List"),
            Type::S16 => Some("Int16List"),
            Type::U32 => Some("Uint32List"),
            Type::S32 => Some("Int32List"),
            Type::U64 if native_int64 => Some("Uint64List"),
            Type::S64 if native_int64 => Some("Int64List"),
            Type::F32 => Some("Float32List"),
            Type::F64 => Some("Float64List"),
            _ => None,
        }
    }

    fn int64(&self) -> &'static str {
        match self.config.int64_type {
            Int64Type::NativeFixed64 => "int",
            Int64Type::ArbitraryPrecision => "BigInt",
        }
    }
}
