use mdline_core::MdlineError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// No input path on the command line.
    #[error("No markdown file provided.")]
    MissingInput,
    /// Input does not carry the `.md` extension.
    #[error("Provide a markdown file: {} does not end in .md", path.display())]
    NotMarkdown { path: PathBuf },
    /// Input or config file could not be opened or read.
    #[error("Failed to open file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Input was opened but could not be converted.
    #[error("Failed to convert {}: {source}", path.display())]
    Convert { path: PathBuf, source: MdlineError },
    /// Config file contents are not valid render options.
    #[error("Failed to load config {}: {source}", path.display())]
    Config { path: PathBuf, source: MdlineError },
    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    /// Invocation mistakes are reported without ever touching the input.
    pub fn is_invocation_error(&self) -> bool {
        matches!(self, CliError::MissingInput | CliError::NotMarkdown { .. })
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_invocation_error() { 2 } else { 1 }
    }
}
