//! WIT to Dart bindings
//!
//! - Frontend: lex, parse and resolve WIT documents into a [`frontend::World`]
//! - Backend: emit Dart source for a world under a [`GeneratorConfig`]
//! - [`generate`]: the orchestrator tying input resolution, frontend and
//!   backend together
//!
//! [`GeneratorConfig`]: wit_dart_common::GeneratorConfig

pub mod backend;
pub mod frontend;
pub mod generate;

pub use generate::{default_output_path, generate, GeneratedFile, GenerationError, Generator};
