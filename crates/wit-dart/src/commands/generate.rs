//! Generate command

use std::path::Path;

use starbase::AppResult;
use tracing::info;
use wit_dart_binding::{GeneratedFile, Generator};
use wit_dart_common::vfs::{OsVfs, Vfs};
use wit_dart_common::ExecutionContext;

use crate::args::{parse_args, CliArgs};
use crate::commands::watch::watch;
use crate::error::CliError;

/// Run the generate command with its raw arguments
pub async fn run_generate(args: Vec<String>) -> AppResult {
    let args = parse_args(&args).map_err(CliError::from)?;
    if args.watch {
        watch(&args).await?;
        return Ok(None);
    }

    let file = generate_once(&args)?;
    println!("Generated {}", file.path);
    Ok(None)
}

/// Generate and write the Dart file once.
pub fn generate_once(args: &CliArgs) -> Result<GeneratedFile, CliError> {
    let file = Generator::new(ExecutionContext::native())
        .with_output_path(args.dart_file_path.clone())
        .generate(&args.config)?;

    OsVfs
        .write_from_string(Path::new(&file.path), &file.contents)
        .map_err(|source| CliError::Write {
            path: file.path.clone(),
            source,
        })?;
    info!(path = %file.path, bytes = file.contents.len(), "Wrote Dart bindings");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_once_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let wit = dir.path().join("app.wit");
        std::fs::write(&wit, "package a:b;\nworld app {\n  export run: func();\n}\n").unwrap();
        let out = dir.path().join("lib/src/app.dart");

        let args = parse_args(&[
            wit.to_string_lossy().into_owned(),
            out.to_string_lossy().into_owned(),
        ])
        .unwrap();
        let file = generate_once(&args).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), file.contents);
    }

    #[test]
    fn test_generate_once_reports_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        let wit = dir.path().join("app.wit");
        std::fs::write(&wit, "world app {\n  export run: func(\n}\n").unwrap();

        let args = parse_args(&[wit.to_string_lossy().into_owned()]).unwrap();
        let err = generate_once(&args).unwrap_err();
        assert!(matches!(err, CliError::Generation(_)));
        assert!(!dir.path().join("app.dart").exists());
    }
}
