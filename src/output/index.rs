use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::discovery::PackageRecord;
use crate::error::IoError;

const INDEX_SUFFIX: &str = ".json";

/// Absolute destination for the index, with `.json` appended when the name
/// does not already end in it.
pub fn index_path(dest: &Path) -> Result<PathBuf, IoError> {
    let path = std::path::absolute(dest).map_err(|e| IoError::resolve_error(dest, e))?;
    if path.to_string_lossy().ends_with(INDEX_SUFFIX) {
        return Ok(path);
    }
    let mut name = OsString::from(path);
    name.push(INDEX_SUFFIX);
    Ok(PathBuf::from(name))
}

/// Renders records as a 2-space indented JSON array with a trailing newline.
pub fn render(records: &[PackageRecord]) -> Result<String, IoError> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Writes the index next to its final location and renames it into place,
/// creating parent directories as needed. Returns the path written.
pub fn write_index(records: &[PackageRecord], dest: &Path) -> Result<PathBuf, IoError> {
    let path = index_path(dest)?;
    let json = render(records)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| IoError::create_dir_error(parent, e))?;
    }

    let mut tmp_name = OsString::from(".");
    tmp_name.push(path.file_name().unwrap_or_default());
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, json).map_err(|e| IoError::write_error(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| IoError::write_error(&path, e))?;

    debug!(path = %path.display(), count = records.len(), "index written");
    Ok(path)
}
