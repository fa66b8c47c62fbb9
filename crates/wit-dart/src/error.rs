//! Error types for the wit-dart CLI

use miette::Diagnostic;
use thiserror::Error;
use wit_dart_binding::GenerationError;

use crate::args::ArgsError;

/// Errors reported to the user
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(
        code(wit_dart::args),
        help(
            "Usage: wit-dart generate <witInputPath> [<dartFilePath>] [--watch] [--no-default] [--<flag>[=true|false]]"
        )
    )]
    Args(#[from] ArgsError),

    #[error(transparent)]
    #[diagnostic(code(wit_dart::generate))]
    Generation(#[from] GenerationError),

    #[error("Failed to write {path}")]
    #[diagnostic(code(wit_dart::io))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to watch {path}")]
    #[diagnostic(code(wit_dart::watch))]
    Watch {
        path: String,
        #[source]
        source: notify::Error,
    },
}
