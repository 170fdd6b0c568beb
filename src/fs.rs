//! Small filesystem helpers with path context on every error.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Returns true if the file at `path` begins with `content`.
pub fn file_starts_with(path: &Path, content: &str) -> Result<bool> {
    let existing = read_file(path)?;
    Ok(existing.starts_with(content))
}

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
    log::debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Resolves `file` against `cwd` unless it is already absolute.
///
/// `.` components are dropped so `./theme.sass` and `theme.sass` resolve to
/// the same path.
pub fn absolute_path(file: impl AsRef<Path>, cwd: &Path) -> PathBuf {
    let file = file.as_ref();
    let joined = if file.is_absolute() {
        file.to_path_buf()
    } else {
        cwd.join(file)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path() {
        let cwd = Path::new("/project");
        assert_eq!(
            absolute_path("./src/theme.sass", cwd),
            PathBuf::from("/project/src/theme.sass")
        );
        assert_eq!(absolute_path("/abs/x.sass", cwd), PathBuf::from("/abs/x.sass"));
    }

    #[test]
    fn test_write_creates_parents_and_prefix_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.sass");

        write_file(&path, "$primary: var(--primary);\n// rest").unwrap();
        assert!(exists(&path));
        assert!(file_starts_with(&path, "$primary: var(--primary);\n").unwrap());
        assert!(!file_starts_with(&path, "$link").unwrap());
    }

    #[test]
    fn test_missing_file_error_has_path() {
        let err = read_file(Path::new("/definitely/not/here.css")).unwrap_err();
        assert!(err.to_string().starts_with("/definitely/not/here.css"));
    }
}
