//! Append-only output buffer.

/// Accumulated HTML output for one conversion.
///
/// Lines are appended in order and never revisited. The wrapper element is
/// only applied by [`Document::finish`].
#[derive(Debug, Default, Clone)]
pub struct Document {
    body: String,
    lines: usize,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one markup line followed by a newline.
    pub fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
        self.lines += 1;
    }

    /// Append markup without a trailing newline.
    pub fn push_raw(&mut self, markup: &str) {
        self.body.push_str(markup);
    }

    /// Number of lines appended through [`Document::push_line`].
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body markup without the wrapper.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Finalize into a single string, wrapped in `<tag>` ... `</tag>` when a
    /// tag is given.
    pub fn finish(self, wrapper: Option<&str>) -> String {
        match wrapper {
            Some(tag) => {
                let mut html = String::with_capacity(self.body.len() + 2 * tag.len() + 6);
                html.push('<');
                html.push_str(tag);
                html.push_str(">\n");
                html.push_str(&self.body);
                html.push_str("</");
                html.push_str(tag);
                html.push_str(">\n");
                html
            }
            None => self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_newline_terminated() {
        let mut doc = Document::new();
        doc.push_raw("<pre><code>");
        doc.push_line("x");
        assert_eq!(doc.body(), "<pre><code>x\n");
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn wrapper_surrounds_body() {
        let mut doc = Document::new();
        doc.push_line("<p>hi</p>");
        assert_eq!(doc.finish(Some("div")), "<div>\n<p>hi</p>\n</div>\n");
    }

    #[test]
    fn empty_document_without_wrapper() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.finish(None), "");
    }
}
