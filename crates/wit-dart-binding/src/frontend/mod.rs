//! WIT frontend - parse WIT documents and resolve them into a world model

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod resolve;

pub use errors::SyntaxError;
pub use parser::parse_document;
pub use resolve::{
    resolve_world, Case, EnumCase, Field, Function, Type, TypeDef, TypeDefKind, TypeId, World,
    WorldItem,
};
