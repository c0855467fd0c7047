//! Call-site rendering.

use std::env;
use std::panic::Location;
use std::path::{Component, Path, PathBuf};

/// Render a call site as `path:line`.
pub fn file_line(location: &Location<'_>) -> String {
    format!("{}:{}", source_path(location.file()), location.line())
}

/// Shorten a source path for display.
///
/// Relative paths are kept. Absolute paths under the working directory
/// become relative to it; any other path is cut down to its last directory
/// and file name.
pub fn source_path(file: &str) -> String {
    let path = Path::new(file);
    if path.is_relative() {
        return file.to_string();
    }
    let relative = env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    relative
        .unwrap_or_else(|| last_dir_and_file(path))
        .display()
        .to_string()
}

fn last_dir_and_file(path: &Path) -> PathBuf {
    let mut tail: Vec<&std::ffi::OsStr> = path
        .components()
        .rev()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .take(2)
        .collect();
    tail.reverse();
    tail.into_iter().collect()
}
