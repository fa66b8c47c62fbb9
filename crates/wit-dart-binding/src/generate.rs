//! Generation orchestrator
//!
//! Resolve inputs, parse and resolve the world, emit Dart. Either the whole
//! file is produced or an error is returned.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use wit_dart_common::{
    ExecutionContext, GeneratorConfig, InputResolver, InputSource, ResolveError,
};

use crate::backend::generate_dart;
use crate::frontend::{resolve_world, SyntaxError};

/// Errors from a generation run
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// A generated Dart file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Where the caller should write `contents`
    pub path: String,
    pub contents: String,
}

/// Drives one or more generation runs within an execution context.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    resolver: InputResolver,
    output_path: Option<String>,
}

impl Generator {
    pub fn new(context: ExecutionContext) -> Self {
        Self {
            resolver: InputResolver::new(context),
            output_path: None,
        }
    }

    /// Declare where the output goes. `None` derives it from the input path.
    pub fn with_output_path(mut self, output_path: Option<String>) -> Self {
        self.output_path = output_path;
        self
    }

    pub fn generate(&self, config: &GeneratorConfig) -> Result<GeneratedFile, GenerationError> {
        let inputs = self.resolver.resolve(&config.inputs)?;
        debug!(
            root = %inputs.root.path,
            deps = inputs.deps.len(),
            "Resolved WIT inputs"
        );

        let world = resolve_world(&inputs)?;
        debug!(
            world = %world.name,
            types = world.types.len(),
            imports = world.imports.len(),
            exports = world.exports.len(),
            "Resolved world"
        );

        let contents = generate_dart(&world, config);
        let path = self.output_path(&config.inputs);
        info!(path = %path, world = %world.name, "Generated Dart bindings");

        Ok(GeneratedFile { path, contents })
    }

    /// The declared output path, else the input path with a `.dart`
    /// extension. A relative input is placed under the native `base_dir`.
    fn output_path(&self, inputs: &InputSource) -> String {
        if let Some(path) = &self.output_path {
            return path.clone();
        }
        let path = default_output_path(inputs);
        match (self.resolver.context(), inputs) {
            (
                ExecutionContext::Native {
                    base_dir: Some(base),
                },
                InputSource::FileSystemPaths { input_path },
            ) if input_path.is_relative() => base.join(&path).to_string_lossy().replace('\\', "/"),
            _ => path,
        }
    }
}

/// Generate with the native filesystem and the derived output path.
pub fn generate(config: &GeneratorConfig) -> Result<GeneratedFile, GenerationError> {
    Generator::default().generate(config)
}

/// The declared input path with a `.dart` extension.
pub fn default_output_path(inputs: &InputSource) -> String {
    let input = match inputs {
        InputSource::FileSystemPaths { input_path } => input_path.to_string_lossy().into_owned(),
        InputSource::InMemoryFiles { world_file, .. } => world_file.path.clone(),
    };
    Path::new(&input)
        .with_extension("dart")
        .to_string_lossy()
        .replace('\\', "/")
}
