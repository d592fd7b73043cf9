#![deny(missing_docs)]
//! mdline core: line-oriented Markdown to HTML conversion.
//!
//! A [`BlockClassifier`] walks the input one line at a time, tracking fenced
//! code and list blocks, and hands everything else to the inline passes in
//! [`inline`].

/// Block classification and the scan state machine.
pub mod block;
/// Conversion entry points.
pub mod convert;
/// Append-only output buffer.
pub mod document;
/// Core error and diagnostic types.
pub mod error;
/// Inline substitution passes.
pub mod inline;
/// Render options.
pub mod options;

pub use block::{BlockClassifier, LineOutcome, ScanMode};
pub use convert::{
    ConversionOutput, Converter, convert, convert_bytes, convert_lines, convert_reader,
    convert_with_options,
};
pub use document::Document;
pub use error::{BlockKind, MdlineError, ParseDiagnostics, ParseWarning, SourceLocation};
pub use inline::transform_inline;
pub use options::RenderOptions;
