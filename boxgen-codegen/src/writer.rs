//! Source text builder.
//!
//! Emitters write through a [`CodeWriter`] that is passed down explicitly and
//! turned into the final text once. The layout matches what `gofmt` produces
//! for the generated constructs, so regenerated files diff cleanly.

/// Accumulates generated source lines.
#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    indent: usize,
}

impl CodeWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Writes a blank line, never two in a row and never at the start.
    pub fn blank(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    /// Increases the indentation by one tab.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decreases the indentation by one tab.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Writes `// ` comment lines.
    pub fn comment(&mut self, lines: &[String]) {
        for line in lines {
            self.line(&format!("// {line}"));
        }
    }

    /// Writes `header {`, the indented body, then `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(&format!("{header} {{"));
        self.indent();
        body(self);
        self.dedent();
        self.line("}");
    }

    /// Writes rows whose right-hand sides start in the same column.
    ///
    /// Each row is `left`, padding, one space, `right`; this is the alignment
    /// `gofmt` applies to consecutive one-line declarations.
    pub fn aligned(&mut self, rows: &[(String, String)]) {
        let width = rows
            .iter()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        for (left, right) in rows {
            let pad = width - left.chars().count();
            self.line(&format!("{left}{} {right}", " ".repeat(pad)));
        }
    }

    /// Returns the text, ending in exactly one newline.
    #[must_use]
    pub fn finish(mut self) -> String {
        let trimmed = self.output.trim_end_matches('\n').len();
        self.output.truncate(trimmed);
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
    }
}
