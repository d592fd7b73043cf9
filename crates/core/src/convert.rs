//! Conversion driver: feeds lines through the classifier into a document.

use crate::block::{BlockClassifier, ScanMode};
use crate::document::Document;
use crate::error::{MdlineError, ParseDiagnostics};
use crate::options::RenderOptions;
use std::borrow::Cow;
use std::io::BufRead;

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// Finished HTML, wrapper included.
    pub html: String,
    /// Non-fatal warnings collected along the way.
    pub diagnostics: ParseDiagnostics,
}

/// Single-use converter owning the scan state and output buffer.
#[derive(Debug)]
pub struct Converter {
    wrapper: Option<String>,
    classifier: BlockClassifier,
    document: Document,
}

impl Converter {
    /// Start a conversion with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            wrapper: options.wrapper_tag().map(str::to_string),
            classifier: BlockClassifier::new(options),
            document: Document::new(),
        }
    }

    /// Feed the next input line (without its newline).
    pub fn push_line(&mut self, line: &str) {
        self.classifier.process_line(line, &mut self.document);
    }

    /// Current block mode.
    pub fn mode(&self) -> ScanMode {
        self.classifier.mode()
    }

    /// Close out the input and produce the finished document.
    pub fn finish(mut self) -> ConversionOutput {
        let diagnostics = self.classifier.finish(&mut self.document);
        log::debug!(
            "converted document: {} output lines, {} warnings",
            self.document.line_count(),
            diagnostics.warnings.len()
        );
        ConversionOutput {
            html: self.document.finish(self.wrapper.as_deref()),
            diagnostics,
        }
    }
}

/// Convert a whole markdown string with default options.
pub fn convert(input: &str) -> String {
    convert_with_options(input, RenderOptions::default()).html
}

/// Convert a whole markdown string.
///
/// Lines end at `\n` or `\r\n`; the terminator is not part of the line.
pub fn convert_with_options(input: &str, options: RenderOptions) -> ConversionOutput {
    convert_lines(input.lines(), options)
}

/// Convert an ordered sequence of lines.
pub fn convert_lines<'a, I>(lines: I, options: RenderOptions) -> ConversionOutput
where
    I: IntoIterator<Item = &'a str>,
{
    let mut converter = Converter::new(options);
    for line in lines {
        converter.push_line(line);
    }
    converter.finish()
}

/// Convert raw file contents, which must be UTF-8.
pub fn convert_bytes(
    bytes: Vec<u8>,
    options: RenderOptions,
) -> Result<ConversionOutput, MdlineError> {
    let text = String::from_utf8(bytes)?;
    Ok(convert_with_options(&text, options))
}

/// Convert lines read from `reader`. Fails only if reading fails.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
pub fn convert_reader<R: BufRead>(
    mut reader: R,
    options: RenderOptions,
) -> Result<ConversionOutput, MdlineError> {
    let mut converter = Converter::new(options);
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let line = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = line {
            log::debug!("line {}: replaced invalid UTF-8", line_number);
        }
        converter.push_line(&line);
    }
    Ok(converter.finish())
}
