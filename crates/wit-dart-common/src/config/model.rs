use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration driving the shape of the generated Dart bindings.
///
/// Two configs are equal iff every field, including the input source, is
/// equal. Identical configs over identical input text always produce
/// byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Where the WIT world and its dependency packages come from
    pub inputs: InputSource,
    /// Emit `toJson`/`fromJson` for generated types
    pub json_serialization: bool,
    /// Emit `copyWith` on records and variant cases
    pub copy_with: bool,
    /// Emit `operator ==` and `hashCode`
    pub equality_and_hash_code: bool,
    /// Emit `toString`
    pub to_string: bool,
    /// Carry WIT doc comments over as `///` comments
    pub generate_docs: bool,
    /// Map `option<T>` to `T?` instead of `Option<T>`
    pub use_null_for_option: bool,
    /// Make nullable record fields `required` constructor parameters
    pub required_option: bool,
    /// Map lists of numbers to `dart:typed_data` lists
    pub typed_number_lists: bool,
    /// Exported functions return futures and run through a worker
    pub async_worker: bool,
    /// Generate variant cases as subclasses of one sealed base class
    pub same_class_union: bool,
    /// Dart representation of `s64` and `u64`
    pub int64_type: Int64Type,
    /// Free text prepended verbatim to the generated file
    pub file_header: Option<String>,
}

impl GeneratorConfig {
    /// Configuration with the documented defaults.
    pub fn new(inputs: InputSource) -> Self {
        Self {
            inputs,
            json_serialization: false,
            copy_with: true,
            equality_and_hash_code: true,
            to_string: true,
            generate_docs: false,
            use_null_for_option: true,
            required_option: false,
            typed_number_lists: true,
            async_worker: false,
            same_class_union: true,
            int64_type: Int64Type::default(),
            file_header: None,
        }
    }

    /// Configuration where every boolean toggle is disabled.
    pub fn all_disabled(inputs: InputSource) -> Self {
        Self {
            inputs,
            json_serialization: false,
            copy_with: false,
            equality_and_hash_code: false,
            to_string: false,
            generate_docs: false,
            use_null_for_option: false,
            required_option: false,
            typed_number_lists: false,
            async_worker: false,
            same_class_union: false,
            int64_type: Int64Type::default(),
            file_header: None,
        }
    }
}

/// Representation of WIT's 64-bit integers in Dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Int64Type {
    /// Dart's native `int`
    #[default]
    NativeFixed64,
    /// `BigInt`
    ArbitraryPrecision,
}

/// Where the WIT text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InputSource {
    /// A root WIT file on a real or sandboxed filesystem. Dependency
    /// packages live under `deps/` next to it.
    FileSystemPaths {
        #[serde(rename = "input-path")]
        input_path: PathBuf,
    },
    /// WIT documents supplied directly; no filesystem access.
    InMemoryFiles {
        #[serde(rename = "world-file")]
        world_file: WitFile,
        #[serde(rename = "pkg-files", default)]
        pkg_files: Vec<WitFile>,
    },
}

impl InputSource {
    pub fn path(input_path: impl Into<PathBuf>) -> Self {
        InputSource::FileSystemPaths {
            input_path: input_path.into(),
        }
    }

    pub fn in_memory(world_file: WitFile, pkg_files: Vec<WitFile>) -> Self {
        InputSource::InMemoryFiles {
            world_file,
            pkg_files,
        }
    }
}

/// A WIT document: a logical path plus its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitFile {
    pub path: String,
    pub contents: String,
}

impl WitFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}
