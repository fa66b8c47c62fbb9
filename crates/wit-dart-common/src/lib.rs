//! Shared building blocks for wit-dart
//!
//! - `config`: the immutable generator configuration and its input source
//! - `vfs`: filesystem abstraction over the OS and a sandboxed in-memory tree
//! - `resolver`: turns an input source into the documents handed to the parser
//! - `codegen`: indentation-aware source writer used by the Dart backend

pub mod codegen;
pub mod config;
pub mod resolver;
pub mod vfs;

pub use config::{GeneratorConfig, InputSource, Int64Type, WitFile};
pub use resolver::{ExecutionContext, InputResolver, ResolveError, ResolvedInputs};
