//! Filesystem access for reading sources and writing assembled output.

use std::fs;
use std::path::Path;

use log::info;

use crate::util::Fallible;

/// Reads a file to a string, with the path as error context.
pub fn read_file_string(path: &Path) -> Fallible<String> {
    fs::read_to_string(path)
        .map_err(|err| format!("Unable to read file \"{}\": {}", path.display(), err).into())
}

/// Returns true if the file is missing or its content differs.
pub fn file_differs(path: &Path, new_content: &str) -> bool {
    fs::read_to_string(path)
        .map(|content| content != new_content)
        .unwrap_or(true)
}

/// Writes an assembled file, skipping the write when content is unchanged.
pub fn write_assembled(path: &Path, content: &str) -> Fallible {
    if file_differs(path, content) {
        info!("  Writing file {}", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else {
        info!("  Skipping unchanged file {}", path.display());
    }

    Ok(())
}
