//! Indentation-managed text sink.

const INDENT: &str = "    ";

/// Accumulates output lines at a tracked indentation depth (4 spaces per
/// level). Every line ends with `\n`; output for the same call sequence is
/// byte-identical.
#[derive(Debug, Default)]
pub struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    #[must_use]
    pub fn new() -> Self {
        Writer::default()
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write `{` and step in.
    pub fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// Step out and write `}`.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_indents_four_spaces_per_level() {
        let mut w = Writer::new();
        w.line("a");
        w.open();
        w.line("b");
        w.open();
        w.line("c");
        w.close();
        w.close();
        assert_eq!(w.finish(), "a\n{\n    b\n    {\n        c\n    }\n}\n");
    }

    #[test]
    fn close_below_zero_stays_flush() {
        let mut w = Writer::new();
        w.close();
        assert_eq!(w.finish(), "}\n");
    }
}
