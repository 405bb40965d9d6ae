//! Directory path normalization shared by all providers.

use std::path::{Component, Path, PathBuf};

/// Return a normalized absolute path for the provided directory string.
///
/// A leading `~` is expanded to the home directory and relative paths are
/// made absolute against the current directory. Symlinks are resolved when
/// the path exists; otherwise the lexically cleaned absolute path is returned.
pub fn normalize_directory_path(path: &str) -> String {
    let absolute = absolutize(expand_home(path));
    match std::fs::canonicalize(&absolute) {
        Ok(resolved) => resolved.to_string_lossy().into_owned(),
        Err(err) => {
            log::trace!("Could not resolve {:?}, keeping unresolved form: {}", absolute, err);
            clean_components(&absolute).to_string_lossy().into_owned()
        }
    }
}

/// Expand `~` and `~/...` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Drop `.` segments and fold `..` segments without touching the filesystem
fn clean_components(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
