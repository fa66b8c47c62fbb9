//! Positioned errors for WIT parsing and resolution

use thiserror::Error;

/// A WIT document failed to parse or does not resolve.
///
/// Displays as `<path>:<line>:<column>: <message>`, lines and columns
/// starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}:{line}:{column}: {message}")]
pub struct SyntaxError {
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl SyntaxError {
    /// Error at byte `offset` of `source`.
    pub fn at(path: &str, source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = span_to_line_column(source, offset);
        Self {
            path: path.to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// Convert byte offset to line/column
pub(crate) fn span_to_line_column(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 1;
    let mut col = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}
