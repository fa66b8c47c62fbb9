//! Configuration module
//!
//! The generator configuration model and loading it from `wit-dart.toml`
//! files or JSON documents handed over by a browser host.

pub mod model;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use self::model::*;

/// Errors from reading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// JSON syntax or schema error
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk shape of `wit-dart.toml`. Every toggle is optional and falls
/// back to the table selected by `default`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    input: PathBuf,
    #[serde(default = "default_true")]
    default: bool,
    json_serialization: Option<bool>,
    copy_with: Option<bool>,
    equality_and_hash_code: Option<bool>,
    to_string: Option<bool>,
    generate_docs: Option<bool>,
    use_null_for_option: Option<bool>,
    required_option: Option<bool>,
    typed_number_lists: Option<bool>,
    async_worker: Option<bool>,
    same_class_union: Option<bool>,
    int64_type: Option<Int64Type>,
    file_header: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ConfigFile {
    fn into_config(self, base_dir: &Path) -> GeneratorConfig {
        let input_path = if self.input.is_relative() {
            base_dir.join(&self.input)
        } else {
            self.input
        };
        let inputs = InputSource::FileSystemPaths { input_path };
        let base = if self.default {
            GeneratorConfig::new(inputs)
        } else {
            GeneratorConfig::all_disabled(inputs)
        };
        GeneratorConfig {
            json_serialization: self.json_serialization.unwrap_or(base.json_serialization),
            copy_with: self.copy_with.unwrap_or(base.copy_with),
            equality_and_hash_code: self
                .equality_and_hash_code
                .unwrap_or(base.equality_and_hash_code),
            to_string: self.to_string.unwrap_or(base.to_string),
            generate_docs: self.generate_docs.unwrap_or(base.generate_docs),
            use_null_for_option: self.use_null_for_option.unwrap_or(base.use_null_for_option),
            required_option: self.required_option.unwrap_or(base.required_option),
            typed_number_lists: self.typed_number_lists.unwrap_or(base.typed_number_lists),
            async_worker: self.async_worker.unwrap_or(base.async_worker),
            same_class_union: self.same_class_union.unwrap_or(base.same_class_union),
            int64_type: self.int64_type.unwrap_or(base.int64_type),
            file_header: self.file_header.or(base.file_header),
            inputs: base.inputs,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a `wit-dart.toml` file.
    ///
    /// A relative `input` is taken relative to the directory holding the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, base_dir).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse `wit-dart.toml` content, resolving a relative `input` against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.into_config(base_dir))
    }

    /// Parse a complete configuration serialized as JSON.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}
