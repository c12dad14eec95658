//! Loads LDIF input files into a single line sequence

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read every file in order and concatenate their lines.
///
/// `on_read` is called with the absolute path of each file just before it is
/// read. Loading stops at the first file that cannot be read; later files are
/// never opened.
pub fn load_files<P, F>(paths: &[P], mut on_read: F) -> Result<Vec<String>>
where
    P: AsRef<Path>,
    F: FnMut(&Path),
{
    let mut lines = Vec::new();

    for path in paths {
        let path = path.as_ref();
        on_read(&absolute(path));

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let before = lines.len();
        lines.extend(load_str(&content));
        tracing::debug!(path = %path.display(), lines = lines.len() - before, "loaded file");
    }

    Ok(lines)
}

/// Split in-memory LDIF text into owned lines
pub fn load_str(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
