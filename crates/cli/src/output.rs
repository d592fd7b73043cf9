//! Input validation and output file placement.

use crate::error::CliError;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory outputs land in unless `--out-dir` says otherwise.
pub const DEFAULT_OUT_DIR: &str = "out";

const MARKDOWN_EXTENSION: &str = "md";

/// Base name of a `.md` input, used to name the output.
pub fn markdown_stem(path: &Path) -> Result<String, CliError> {
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext == MARKDOWN_EXTENSION);
    let stem = path.file_stem().and_then(|stem| stem.to_str());
    match stem {
        Some(stem) if is_markdown => Ok(stem.to_string()),
        _ => Err(CliError::NotMarkdown {
            path: path.to_path_buf(),
        }),
    }
}

/// `NAME.html`, falling back to the input's base name.
pub fn output_file_name(stem: &str, name: Option<&str>) -> String {
    format!("{}.html", name.unwrap_or(stem))
}

/// Write `bytes` to `dir/file_name`, creating `dir` if absent.
pub fn write_output(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    fs::write(&path, bytes).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
