//! Block classification across lines.
//!
//! The classifier carries a single [`ScanMode`] from one line to the next and
//! decides, per line, whether it continues, closes, or opens a fenced code
//! block or a list. Anything else is inline-transformed and rendered as a
//! heading, raw markup, or a paragraph.

use crate::document::Document;
use crate::error::{BlockKind, ParseDiagnostics, ParseWarning, SourceLocation};
use crate::inline::transform_inline;
use crate::options::RenderOptions;
use once_cell::sync::Lazy;
use regex::Regex;

const FENCE: &str = "```";
const BULLET: &str = "- ";

/// `1. item`, with optional leading whitespace. The numeral is discarded.
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.*)$").unwrap());

/// Block mode carried between lines. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Not inside any block.
    #[default]
    Normal,
    /// Between an opening and closing fence.
    InCodeBlock,
    /// Inside a run of `- ` items.
    InUnorderedList,
    /// Inside a run of numbered items.
    InOrderedList,
}

impl ScanMode {
    /// Block kind for the non-normal modes.
    pub fn block_kind(self) -> Option<BlockKind> {
        match self {
            ScanMode::Normal => None,
            ScanMode::InCodeBlock => Some(BlockKind::CodeFence),
            ScanMode::InUnorderedList => Some(BlockKind::UnorderedList),
            ScanMode::InOrderedList => Some(BlockKind::OrderedList),
        }
    }

    fn closing_tag(self) -> Option<&'static str> {
        match self {
            ScanMode::Normal => None,
            ScanMode::InCodeBlock => Some("</code></pre>"),
            ScanMode::InUnorderedList => Some("</ul>"),
            ScanMode::InOrderedList => Some("</ol>"),
        }
    }
}

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOutcome {
    /// Mode before the line was read.
    pub previous: ScanMode,
    /// Mode to carry into the next line.
    pub next: ScanMode,
    /// Block closed by this line, if any. A list closed this way does not
    /// consume the line; it is classified again in normal mode.
    pub closed: Option<BlockKind>,
}

/// Stateful line classifier for one conversion.
#[derive(Debug)]
pub struct BlockClassifier {
    options: RenderOptions,
    mode: ScanMode,
    line_number: usize,
    opened_at: usize,
    diagnostics: ParseDiagnostics,
}

impl BlockClassifier {
    /// Create a classifier in [`ScanMode::Normal`].
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            mode: ScanMode::Normal,
            line_number: 0,
            opened_at: 0,
            diagnostics: ParseDiagnostics::new(),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Process one line, appending its markup to `doc`.
    pub fn process_line(&mut self, line: &str, doc: &mut Document) -> LineOutcome {
        self.line_number += 1;
        let previous = self.mode;
        let mut closed = None;

        loop {
            match self.mode {
                ScanMode::InCodeBlock => {
                    if line.starts_with(FENCE) {
                        doc.push_line("</code></pre>");
                        closed = Some(BlockKind::CodeFence);
                        self.transition(ScanMode::Normal);
                    } else {
                        doc.push_line(line);
                    }
                    break;
                }
                ScanMode::InUnorderedList => {
                    if let Some(content) = unordered_item(line) {
                        self.push_item(content, doc);
                        break;
                    }
                    doc.push_line("</ul>");
                    closed = Some(BlockKind::UnorderedList);
                    self.transition(ScanMode::Normal);
                }
                ScanMode::InOrderedList => {
                    if let Some(content) = ordered_item(line) {
                        self.push_item(content, doc);
                        break;
                    }
                    doc.push_line("</ol>");
                    closed = Some(BlockKind::OrderedList);
                    self.transition(ScanMode::Normal);
                }
                ScanMode::Normal => {
                    self.process_normal(line, doc);
                    break;
                }
            }
        }

        LineOutcome {
            previous,
            next: self.mode,
            closed,
        }
    }

    /// End of input. Closes or reports any block still open and returns the
    /// collected diagnostics.
    pub fn finish(mut self, doc: &mut Document) -> ParseDiagnostics {
        if let (Some(kind), Some(tag)) = (self.mode.block_kind(), self.mode.closing_tag()) {
            let closed = self.options.close_open_blocks;
            if closed {
                doc.push_line(tag);
            }
            let warning = ParseWarning::UnclosedBlock {
                kind,
                location: SourceLocation::new(self.opened_at),
                closed,
            };
            log::debug!("{}", warning);
            self.diagnostics.add_warning(warning);
            self.mode = ScanMode::Normal;
        }
        self.diagnostics
    }

    fn process_normal(&mut self, line: &str, doc: &mut Document) {
        if let Some(info) = line.strip_prefix(FENCE) {
            doc.push_raw(&self.code_open_tag(info));
            self.open(ScanMode::InCodeBlock);
        } else if let Some(content) = unordered_item(line) {
            doc.push_line("<ul>");
            self.open(ScanMode::InUnorderedList);
            self.push_item(content, doc);
        } else if let Some(content) = ordered_item(line) {
            doc.push_line("<ol>");
            self.open(ScanMode::InOrderedList);
            self.push_item(content, doc);
        } else if let Some(markup) = render_plain(line) {
            doc.push_line(&markup);
        }
    }

    fn code_open_tag(&self, info: &str) -> String {
        let lang = info
            .trim_start_matches('`')
            .split_whitespace()
            .next()
            .filter(|_| self.options.fence_language_class);
        match lang {
            Some(lang) => format!(r#"<pre><code class="language-{}">"#, lang),
            None => "<pre><code>".to_string(),
        }
    }

    fn push_item(&self, content: &str, doc: &mut Document) {
        if self.options.inline_list_items {
            doc.push_line(&render_list_item(&transform_inline(content)));
        } else {
            doc.push_line(&render_list_item(content));
        }
    }

    fn open(&mut self, mode: ScanMode) {
        self.opened_at = self.line_number;
        self.transition(mode);
    }

    fn transition(&mut self, next: ScanMode) {
        log::trace!("line {}: {:?} -> {:?}", self.line_number, self.mode, next);
        self.mode = next;
    }
}

/// Content of a `- ` item, if `line` is one.
pub fn unordered_item(line: &str) -> Option<&str> {
    line.strip_prefix(BULLET)
}

/// Content of a numbered item, if `line` is one.
pub fn ordered_item(line: &str) -> Option<&str> {
    ORDERED_ITEM
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Render a non-block line: heading, raw markup, or paragraph. Empty lines
/// render nothing.
pub fn render_plain(line: &str) -> Option<String> {
    let line = transform_inline(line);
    if line.starts_with('#') {
        Some(render_heading(&line))
    } else if line.starts_with('<') {
        Some(line)
    } else if !line.is_empty() {
        Some(render_paragraph(&line))
    } else {
        None
    }
}

/// `<hN>` where N counts every `#` in the first space-delimited token.
pub fn render_heading(line: &str) -> String {
    let marker = line.split(' ').next().unwrap_or_default();
    let level = marker.matches('#').count();
    let rest = line
        .char_indices()
        .nth(level)
        .map_or("", |(offset, _)| &line[offset..]);
    let content = rest.trim();
    format!("<h{level}>{content}</h{level}>")
}

/// Wrap `line` in `<p>`.
pub fn render_paragraph(line: &str) -> String {
    format!("<p>{}</p>", line)
}

/// Wrap `content` in `<li>`.
pub fn render_list_item(content: &str) -> String {
    format!("<li>{}</li>", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str], options: RenderOptions) -> (String, ParseDiagnostics) {
        let mut classifier = BlockClassifier::new(options);
        let mut doc = Document::new();
        for line in lines {
            classifier.process_line(line, &mut doc);
        }
        let diagnostics = classifier.finish(&mut doc);
        (doc.finish(None), diagnostics)
    }

    fn render(lines: &[&str]) -> String {
        run(lines, RenderOptions::default()).0
    }

    #[test]
    fn heading_levels() {
        assert_eq!(render(&["### Title"]), "<h3>Title</h3>\n");
        assert_eq!(render(&["# One"]), "<h1>One</h1>\n");
    }

    #[test]
    fn heading_counts_hashes_in_first_token() {
        assert_eq!(render_heading("##x rest"), "<h2>x rest</h2>");
        assert_eq!(render_heading("#-# t"), "<h2># t</h2>");
        assert_eq!(render_heading("#"), "<h1></h1>");
    }

    #[test]
    fn heading_with_multibyte_marker_does_not_panic() {
        assert_eq!(render_heading("#é# x"), "<h2># x</h2>");
    }

    #[test]
    fn plain_line_is_paragraph() {
        assert_eq!(render(&["plain text"]), "<p>plain text</p>\n");
    }

    #[test]
    fn empty_line_renders_nothing() {
        assert_eq!(render(&["", "a", ""]), "<p>a</p>\n");
    }

    #[test]
    fn markup_line_passes_through() {
        assert_eq!(render(&["![alt](src)"]), "<img src=\"src\" alt=\"alt\">\n");
        assert_eq!(render(&["<hr>"]), "<hr>\n");
    }

    #[test]
    fn line_that_becomes_markup_is_not_a_paragraph() {
        assert_eq!(render(&["[a](b)"]), "<a href=\"b\">a</a>\n");
        assert_eq!(render(&["`c`"]), "<code>c</code>\n");
        assert_eq!(render(&["**b** text"]), "<strong>b</strong> text\n");
        assert_eq!(render(&["*i*"]), "<em>i</em>\n");
        assert_eq!(
            render(&["see [a](b)"]),
            "<p>see <a href=\"b\">a</a></p>\n"
        );
    }

    #[test]
    fn code_fence_is_verbatim() {
        assert_eq!(
            render(&["```", "foo()", "```"]),
            "<pre><code>foo()\n</code></pre>\n"
        );
        assert_eq!(
            render(&["```", "**not bold** - x", "# nope", "```"]),
            "<pre><code>**not bold** - x\n# nope\n</code></pre>\n"
        );
    }

    #[test]
    fn fence_info_string_is_dropped_by_default() {
        assert_eq!(
            render(&["```rust", "fn x() {}", "```"]),
            "<pre><code>fn x() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn fence_language_class_opt_in() {
        let options = RenderOptions {
            fence_language_class: true,
            ..RenderOptions::default()
        };
        let (html, _) = run(&["```rust", "x", "```"], options);
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">x\n</code></pre>\n"
        );
    }

    #[test]
    fn unordered_list_closes_and_reclassifies() {
        assert_eq!(
            render(&["- a", "- b", "# After"]),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<h1>After</h1>\n"
        );
    }

    #[test]
    fn list_closed_by_blank_line() {
        assert_eq!(render(&["- a", ""]), "<ul>\n<li>a</li>\n</ul>\n");
    }

    #[test]
    fn ordered_list_discards_numerals() {
        assert_eq!(
            render(&["5. x", "1. x", "text"]),
            "<ol>\n<li>x</li>\n<li>x</li>\n</ol>\n<p>text</p>\n"
        );
        assert_eq!(ordered_item("  12.   item"), Some("item"));
        assert_eq!(ordered_item("1.item"), None);
        assert_eq!(ordered_item("a. item"), None);
    }

    #[test]
    fn list_directly_followed_by_other_list() {
        assert_eq!(
            render(&["- a", "1. b", "x"]),
            "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>\n<p>x</p>\n"
        );
    }

    #[test]
    fn list_followed_by_fence_opens_code_block() {
        assert_eq!(
            render(&["- a", "```", "code", "```"]),
            "<ul>\n<li>a</li>\n</ul>\n<pre><code>code\n</code></pre>\n"
        );
    }

    #[test]
    fn list_items_skip_inline_by_default() {
        assert_eq!(
            render(&["- **a**", "1. [b](c)", "x"]),
            "<ul>\n<li>**a**</li>\n</ul>\n<ol>\n<li>[b](c)</li>\n</ol>\n<p>x</p>\n"
        );
    }

    #[test]
    fn list_items_inline_opt_in() {
        let options = RenderOptions {
            inline_list_items: true,
            ..RenderOptions::default()
        };
        let (html, _) = run(&["- **a**", "x"], options);
        assert_eq!(html, "<ul>\n<li><strong>a</strong></li>\n</ul>\n<p>x</p>\n");
    }

    #[test]
    fn open_blocks_closed_at_end_by_default() {
        let (html, diagnostics) = run(&["intro", "- a"], RenderOptions::default());
        assert_eq!(html, "<p>intro</p>\n<ul>\n<li>a</li>\n</ul>\n");
        assert_eq!(
            diagnostics.warnings,
            vec![ParseWarning::UnclosedBlock {
                kind: BlockKind::UnorderedList,
                location: SourceLocation::new(2),
                closed: true,
            }]
        );
    }

    #[test]
    fn legacy_leaves_blocks_open() {
        let (html, diagnostics) = run(&["```", "x"], RenderOptions::legacy());
        assert_eq!(html, "<pre><code>x\n");
        assert!(matches!(
            diagnostics.warnings.as_slice(),
            [ParseWarning::UnclosedBlock {
                kind: BlockKind::CodeFence,
                closed: false,
                ..
            }]
        ));
    }

    #[test]
    fn closed_document_has_no_diagnostics() {
        let (_, diagnostics) = run(&["- a", "", "```", "```"], RenderOptions::default());
        assert!(!diagnostics.has_warnings());
    }

    #[test]
    fn outcomes_report_transitions() {
        let mut classifier = BlockClassifier::new(RenderOptions::default());
        let mut doc = Document::new();

        let open = classifier.process_line("- a", &mut doc);
        assert_eq!(open.previous, ScanMode::Normal);
        assert_eq!(open.next, ScanMode::InUnorderedList);
        assert_eq!(open.closed, None);

        let close = classifier.process_line("```", &mut doc);
        assert_eq!(close.previous, ScanMode::InUnorderedList);
        assert_eq!(close.closed, Some(BlockKind::UnorderedList));
        assert_eq!(close.next, ScanMode::InCodeBlock);
        assert_eq!(classifier.mode(), ScanMode::InCodeBlock);

        let end = classifier.process_line("```", &mut doc);
        assert_eq!(end.closed, Some(BlockKind::CodeFence));
        assert_eq!(end.next, ScanMode::Normal);
    }

    #[test]
    fn each_line_rendered_once() {
        // A list-terminating line is re-classified, never emitted twice.
        let html = render(&["- a", "para", "- b", "para"]);
        assert_eq!(html.matches("<p>para</p>").count(), 2);
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
    }
}
