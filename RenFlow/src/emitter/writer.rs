//! Indented line buffer for script output

/// One output line at an absolute indentation level
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub level: usize,
    pub text: String,
    /// Ends with `:` and needs at least one deeper line after it
    pub opens_block: bool,
}

impl Line {
    pub(crate) fn text(level: usize, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            opens_block: false,
        }
    }

    pub(crate) fn block(level: usize, header: impl Into<String>) -> Self {
        Self {
            level,
            text: header.into(),
            opens_block: true,
        }
    }
}

/// Renders lines with a fixed indent width
///
/// A block header without any deeper line after it gets a `pass` body, so the
/// output always parses.
#[derive(Debug, Clone)]
pub(crate) struct ScriptWriter {
    indent_width: usize,
    output: String,
}

impl ScriptWriter {
    pub(crate) fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            output: String::new(),
        }
    }

    pub(crate) fn write_lines(&mut self, lines: &[Line]) {
        for (i, line) in lines.iter().enumerate() {
            self.write_line(line.level, &line.text);

            let has_body = lines.get(i + 1).is_some_and(|next| next.level > line.level);
            if line.opens_block && !has_body {
                self.write_line(line.level + 1, "pass");
            }
        }
    }

    fn write_line(&mut self, level: usize, text: &str) {
        for _ in 0..level * self.indent_width {
            self.output.push(' ');
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.output
    }
}
