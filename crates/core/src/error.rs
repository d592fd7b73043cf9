use thiserror::Error;

/// Source location information for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize) -> Self {
        Self { file: None, line }
    }

    /// Create a source location with file information
    pub fn with_file(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}", file, self.line)
        } else {
            write!(f, "line {}", self.line)
        }
    }
}

/// Errors that can occur while converting a document.
///
/// Content itself never fails to convert; only the boundaries do.
#[derive(Debug, Error)]
pub enum MdlineError {
    /// IO error while reading input lines.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// UTF-8 encoding error.
    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
    /// Render options could not be deserialized.
    #[error("Invalid render options: {0}")]
    ConfigError(#[from] serde_json::Error),
}

/// Kind of multi-line block tracked by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Fenced code block.
    CodeFence,
    /// `- ` list.
    UnorderedList,
    /// `1. ` list.
    OrderedList,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BlockKind::CodeFence => "code fence",
            BlockKind::UnorderedList => "unordered list",
            BlockKind::OrderedList => "ordered list",
        };
        f.write_str(name)
    }
}

/// Non-fatal warnings that don't prevent rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A block was still open when the input ended.
    UnclosedBlock {
        /// Which block was left open
        kind: BlockKind,
        /// Line that opened the block
        location: SourceLocation,
        /// Whether a closing tag was emitted for it
        closed: bool,
    },
}

impl ParseWarning {
    /// Get the location of this warning
    pub fn location(&self) -> &SourceLocation {
        match self {
            ParseWarning::UnclosedBlock { location, .. } => location,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedBlock {
                kind,
                location,
                closed,
            } => {
                let action = if *closed {
                    "closed at end of input"
                } else {
                    "left open"
                };
                write!(f, "Unclosed {} opened at {}: {}", kind, location, action)
            }
        }
    }
}

/// Collection of non-fatal diagnostics produced by a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ParseWarning>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Attach a file name to every recorded location.
    pub fn with_file(mut self, file: &str) -> Self {
        for warning in &mut self.warnings {
            match warning {
                ParseWarning::UnclosedBlock { location, .. } => {
                    *location = SourceLocation::with_file(file, location.line);
                }
            }
        }
        self
    }
}
