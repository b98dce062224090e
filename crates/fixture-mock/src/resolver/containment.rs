//! Keeps resolved fixture paths inside the fixtures root.

use crate::error::FixtureError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `root` and normalize `.` and `..` lexically.
///
/// `root` must already be canonical. Fails with `OutOfBounds` unless the
/// result lies strictly below `root`, or if `relative` is absolute.
pub fn normalize_within(root: &Path, relative: &Path) -> Result<PathBuf, FixtureError> {
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(FixtureError::OutOfBounds {
                    path: relative.to_path_buf(),
                });
            }
        }
    }

    ensure_within(root, resolved)
}

/// Resolve symlinks of an existing fixture and re-check containment.
pub fn canonicalize_within(root: &Path, existing: &Path) -> Result<PathBuf, FixtureError> {
    let canonical = fs::canonicalize(existing).map_err(|source| FixtureError::Io {
        path: existing.to_path_buf(),
        source,
    })?;

    ensure_within(root, canonical)
}

fn ensure_within(root: &Path, path: PathBuf) -> Result<PathBuf, FixtureError> {
    if path != root && path.starts_with(root) {
        Ok(path)
    } else {
        Err(FixtureError::OutOfBounds { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_relative_path_stays_inside() {
        let root = Path::new("/srv/fixtures");
        let path = normalize_within(root, Path::new("example.com/api/articles.mock")).unwrap();
        assert_eq!(path, Path::new("/srv/fixtures/example.com/api/articles.mock"));
    }

    #[test]
    fn test_dot_segments_inside_root_are_allowed() {
        let root = Path::new("/srv/fixtures");
        let path =
            normalize_within(root, Path::new("example.com/./api/../api/articles.mock")).unwrap();
        assert_eq!(path, Path::new("/srv/fixtures/example.com/api/articles.mock"));
    }

    #[test]
    fn test_escaping_root_is_out_of_bounds() {
        let root = Path::new("/srv/fixtures");
        let err = normalize_within(root, Path::new("example.com/../../out-of-bounds.mock"))
            .unwrap_err();

        assert!(err.is_out_of_bounds());
        assert!(err.to_string().contains("/srv/out-of-bounds.mock"));
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_out_of_bounds() {
        let root = Path::new("/srv/fixtures");
        let err =
            normalize_within(root, Path::new("../fixtures-secret/data.mock")).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_root_itself_is_out_of_bounds() {
        let root = Path::new("/srv/fixtures");
        let err = normalize_within(root, Path::new("example.com/..")).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_absolute_relative_path_is_out_of_bounds() {
        let root = Path::new("/srv/fixtures");
        let err = normalize_within(root, Path::new("/etc/passwd.mock")).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_canonicalize_within_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        let err = canonicalize_within(&root, &root.join("missing.mock")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
