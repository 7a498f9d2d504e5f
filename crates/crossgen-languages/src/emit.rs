//! Emission instructions and the sinks that render them.
//!
//! Writers produce a flat list of [`Emit`] values; a [`RenderSink`] decides
//! how they become text. [`TextSink`] is the reference sink: four-space
//! indentation, `\n` line endings, nothing else.

/// One write instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// Text appended to the current line. Embedded newlines continue at
    /// the current indentation.
    Text(String),
    /// End the current line.
    Line,
    /// `header` on its own line, `body` one level deeper, then `footer`.
    /// An empty header or footer writes no line.
    Block {
        header: String,
        body: Vec<Emit>,
        footer: String,
    },
}

impl Emit {
    pub fn text(text: impl Into<String>) -> Self {
        Emit::Text(text.into())
    }

    pub fn block(header: impl Into<String>, body: Vec<Emit>, footer: impl Into<String>) -> Self {
        Emit::Block {
            header: header.into(),
            body,
            footer: footer.into(),
        }
    }

    /// A complete line of text.
    pub fn line(text: impl Into<String>) -> Vec<Emit> {
        vec![Emit::Text(text.into()), Emit::Line]
    }
}

/// Receives primitive write operations.
pub trait RenderSink {
    fn text(&mut self, text: &str);
    fn line(&mut self);
    fn indent(&mut self);
    fn dedent(&mut self);

    fn render(&mut self, emits: &[Emit]) {
        for emit in emits {
            match emit {
                Emit::Text(text) => self.text(text),
                Emit::Line => self.line(),
                Emit::Block {
                    header,
                    body,
                    footer,
                } => {
                    if !header.is_empty() {
                        self.text(header);
                        self.line();
                    }
                    self.indent();
                    self.render(body);
                    self.dedent();
                    if !footer.is_empty() {
                        self.text(footer);
                        self.line();
                    }
                }
            }
        }
    }
}

/// Renders to a string with four-space indentation.
#[derive(Debug, Default)]
pub struct TextSink {
    output: String,
    indent: usize,
    at_line_start: bool,
}

impl TextSink {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write_segment(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
            self.at_line_start = false;
        }
        self.output.push_str(segment);
    }
}

impl RenderSink for TextSink {
    fn text(&mut self, text: &str) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            self.write_segment(first);
        }
        for segment in segments {
            self.line();
            self.write_segment(segment);
        }
    }

    fn line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }
}

/// Render instructions to a string through a fresh [`TextSink`].
pub fn render(emits: &[Emit]) -> String {
    let mut sink = TextSink::new();
    sink.render(emits);
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_indent_their_body() {
        let emits = vec![Emit::block(
            "class A {",
            vec![
                Emit::block("void f() {", Emit::line("return;"), "}"),
                Emit::Line,
            ],
            "}",
        )];
        insta::assert_snapshot!(render(&emits), @r###"
        class A {
            void f() {
                return;
            }

        }
        "###);
    }

    #[test]
    fn embedded_newlines_keep_indentation() {
        let emits = vec![Emit::block(
            "run {",
            vec![Emit::text("f({\n    g()\n})"), Emit::Line],
            "}",
        )];
        assert_eq!(render(&emits), "run {\n    f({\n        g()\n    })\n}\n");
    }

    #[test]
    fn empty_header_and_footer_write_nothing() {
        let emits = vec![
            Emit::block("if (a) {", Emit::line("f();"), ""),
            Emit::block("} else {", Emit::line("g();"), "}"),
        ];
        assert_eq!(render(&emits), "if (a) {\n    f();\n} else {\n    g();\n}\n");
    }
}
