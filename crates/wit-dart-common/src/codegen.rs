//! Shared Code Generation Utilities
//!
//! An indentation-aware text buffer plus comment helpers used when emitting
//! Dart source.

/// Indentation helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    level: usize,
    size: usize,
}

impl Indent {
    pub fn as_string(&self) -> String {
        " ".repeat(self.level * self.size)
    }

    pub fn increment(&mut self) {
        self.level += 1;
    }

    pub fn decrement(&mut self) {
        if self.level > 0 {
            self.level -= 1;
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self { level: 0, size: 2 }
    }
}

/// Line-oriented source buffer.
///
/// Every pushed line is prefixed with the current indentation; empty lines
/// stay empty so the output has no trailing whitespace.
#[derive(Debug, Default, Clone)]
pub struct Source {
    text: String,
    indent: Indent,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line (a newline is added).
    pub fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            self.text.push_str(&self.indent.as_string());
            self.text.push_str(line);
        }
        self.text.push('\n');
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Emit `header`, then run `body` one level deeper, then emit `footer`.
    pub fn nested(&mut self, header: impl AsRef<str>, footer: &str, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.indent.increment();
        body(self);
        self.indent.decrement();
        self.line(footer);
    }

    pub fn indent(&mut self) {
        self.indent.increment();
    }

    pub fn dedent(&mut self) {
        self.indent.decrement();
    }

    /// Append text verbatim, without indentation.
    pub fn push_raw(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Generate comment
pub fn comment(text: &str) -> String {
    format!("// {}", text)
}

/// Generate doc comment lines, one `///` line per input line.
pub fn doc_comment(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "///".to_string()
            } else {
                format!("/// {}", line)
            }
        })
        .collect()
}
