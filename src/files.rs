//! Directory scanning and output location helpers

use std::fs;
use std::path::{Path, PathBuf};
use glob::{glob_with, MatchOptions, Pattern};
use crate::error::{Error, Result};

/// List every `*.pdf` file directly inside `dir`, sorted by path.
///
/// Matching is case-sensitive and skips dot-files. The sorted order is the
/// ordering contract for every multi-file combination.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::FileNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut paths = Vec::new();
    for entry in glob_with(&pattern, options).map_err(|e| Error::InvalidGlob(e.to_string()))? {
        match entry {
            Ok(path) if is_hidden(&path) => log::debug!("Skipping hidden file: {}", path.display()),
            Ok(path) if path.is_file() => paths.push(path),
            Ok(path) => log::debug!("Skipping non-file: {}", path.display()),
            Err(e) => log::warn!("Glob error in {}: {}", dir.display(), e),
        }
    }

    paths.sort();
    Ok(paths)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Directory containing `path`, or `.` when it has none
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Resolve an optional subdirectory name against the parent of `source`
pub fn sibling_dir(source: &Path, name: Option<&str>) -> PathBuf {
    let parent = parent_dir(source);
    match name {
        Some(name) => parent.join(name),
        None => parent,
    }
}

/// Create `dir` (and its parents) unless it already exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
        log::info!("Created: {}", dir.display());
    }
    Ok(())
}
