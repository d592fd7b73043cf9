//! Inline rewriting: links, inline code, emphasis, and images.
//!
//! Each pass is a pure substitution over one line. [`transform_inline`] runs
//! them in a fixed order, feeding each pass the output of the previous one.
//! The order is load-bearing: bold must consume `**`/`__` pairs before the
//! italic pass sees single markers, and the link pass must skip `![..](..)`
//! so the image pass can claim it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// `[label](target)` with an optional leading `!` so images can be skipped.
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[(.*?)\]\((.*?)\)").unwrap());

static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

static BOLD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());

static ITALIC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());

static IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

/// A single substitution pass.
pub type InlinePass = for<'a> fn(&'a str) -> Cow<'a, str>;

/// The passes in application order.
pub const INLINE_PASSES: [InlinePass; 5] = [links, inline_code, bold, italic, images];

/// Apply every inline pass to `line`, in order.
///
/// Never fails: text that matches no pattern comes back unchanged.
pub fn transform_inline(line: &str) -> String {
    let mut current = line.to_string();
    for pass in INLINE_PASSES {
        let rewritten = match pass(&current) {
            Cow::Borrowed(_) => None,
            Cow::Owned(next) => Some(next),
        };
        if let Some(next) = rewritten {
            current = next;
        }
    }
    current
}

/// Rewrite `[label](target)` to an anchor. Image syntax is left untouched.
pub fn links(line: &str) -> Cow<'_, str> {
    LINK_PATTERN.replace_all(line, |caps: &Captures| {
        if &caps[1] == "!" {
            return caps[0].to_string();
        }
        format!(r#"<a href="{}">{}</a>"#, &caps[3], &caps[2])
    })
}

/// Rewrite `` `code` `` to `<code>code</code>`.
pub fn inline_code(line: &str) -> Cow<'_, str> {
    CODE_PATTERN.replace_all(line, "<code>${1}</code>")
}

/// Rewrite `**text**` and `__text__` to `<strong>text</strong>`.
pub fn bold(line: &str) -> Cow<'_, str> {
    // Only one of the two groups participates in any match.
    BOLD_PATTERN.replace_all(line, "<strong>${1}${2}</strong>")
}

/// Rewrite `*text*` and `_text_` to `<em>text</em>`.
pub fn italic(line: &str) -> Cow<'_, str> {
    ITALIC_PATTERN.replace_all(line, "<em>${1}${2}</em>")
}

/// Rewrite `![alt](src)` to an `<img>` tag.
pub fn images(line: &str) -> Cow<'_, str> {
    IMAGE_PATTERN.replace_all(line, r#"<img src="${2}" alt="${1}">"#)
}
