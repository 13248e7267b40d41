//! Resolution of include targets to concrete file paths.

use std::path::{Path, PathBuf};

use crate::util::Fallible;
use crate::NotFoundError;

/// Returns true if an include target contains glob metacharacters.
pub fn is_pattern(target: &str) -> bool {
    target.contains(|c| c == '*' || c == '?' || c == '[')
}

/// Resolves an include target against the directory of the including file.
///
/// A non-glob target resolves to exactly one existing file; when the target
/// has no extension and does not exist as written, the including file's
/// extension is tried as a fallback. A glob target expands to all matching
/// files, in the deterministic order of the `glob` crate; zero matches is
/// not an error.
pub fn resolve(base: &Path, target: &str) -> Fallible<Vec<PathBuf>> {
    if is_pattern(target) {
        expand_glob(base, target)
    } else {
        Ok(vec![resolve_single(base, target)?])
    }
}

/// Normalizes a path for use as dedup key and for display.
pub(crate) fn cleaned(path: &Path) -> PathBuf {
    PathBuf::from(path_clean::clean(
        &path.to_str().unwrap().replace("\\", "/"),
    ))
}

fn resolve_single(base: &Path, target: &str) -> Fallible<PathBuf> {
    let path = joined(base, target);
    if path.is_file() {
        return Ok(path);
    }

    if path.extension().is_none() {
        if let Some(ext) = base.extension() {
            let fallback = path.with_extension(ext);
            if fallback.is_file() {
                return Ok(fallback);
            }
        }
    }

    Err(Box::new(NotFoundError(path)))
}

fn expand_glob(base: &Path, pattern: &str) -> Fallible<Vec<PathBuf>> {
    let full_pattern = joined(base, pattern);
    let full_pattern = full_pattern
        .to_str()
        .ok_or_else(|| format!("Invalid glob pattern {:?}", pattern))?;

    let mut files = vec![];
    let paths = glob::glob(full_pattern)
        .map_err(|err| format!("Unable to process glob pattern \"{}\": {}", pattern, err))?;

    for path in paths {
        let path = path
            .map_err(|err| format!("Unable to process glob pattern \"{}\": {}", pattern, err))?;
        if path.is_file() {
            files.push(cleaned(&path));
        }
    }

    Ok(files)
}

fn joined(base: &Path, target: &str) -> PathBuf {
    let mut path = base
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    path.push(target);
    cleaned(&path)
}
