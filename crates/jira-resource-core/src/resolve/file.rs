//! `{text, file}` substitution

use crate::models::FileText;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

const FILE_PLACEHOLDER: &str = "$FILE";

/// Resolve a `{text, file}` composite relative to `base_dir`.
///
/// The file contents are used as-is; only the first `$FILE` in `text` is
/// replaced. Empty `text` yields the file contents.
pub fn substitute(base_dir: &Path, value: &FileText) -> Result<String> {
    let Some(file) = value.file.as_deref() else {
        return Ok(value.text.clone().unwrap_or_default());
    };

    let content = read(&file_path(base_dir, file))?;

    Ok(match value.text.as_deref().filter(|text| !text.is_empty()) {
        Some(text) => text.replacen(FILE_PLACEHOLDER, &content, 1),
        None => content,
    })
}

/// Files are always relative to the step's working directory, even when
/// written with a leading slash.
fn file_path(base_dir: &Path, file: &str) -> PathBuf {
    base_dir.join(file.trim_start_matches('/'))
}

fn read(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
