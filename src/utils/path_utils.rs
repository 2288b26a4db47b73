//! Filesystem path helpers for reference resolution

use std::path::{Component, Path, PathBuf};

/// Join a raw `src` reference under `root`, the way a web server would
///
/// Leading separators are stripped so `/icons/a.svg` still resolves inside
/// `root` instead of replacing it. The joined path is then normalised
/// lexically (see [`normalize_path`]).
#[must_use]
pub fn resolve_under_root(root: &Path, reference: &str) -> PathBuf {
    let relative = reference.trim_start_matches(['/', '\\']);
    normalize_path(&root.join(relative))
}

/// Make `path` absolute against the current working directory
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize_path(path))
    } else {
        Ok(normalize_path(&std::env::current_dir()?.join(path)))
    }
}

/// Resolve `.` and `..` components without touching the filesystem
///
/// `..` at the root stays at the root, matching how absolute paths are
/// resolved by the host. Symlinks are not followed.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_removes_dot_segments() {
        let path = Path::new("/site/./icons/../img/logo.svg");
        assert_eq!(normalize_path(path), PathBuf::from("/site/img/logo.svg"));
    }

    #[test]
    fn test_parent_dir_does_not_escape_filesystem_root() {
        let path = Path::new("/../../etc/hosts");
        assert_eq!(normalize_path(path), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_leading_slash_stays_under_root() {
        let resolved = resolve_under_root(Path::new("/srv/www"), "/icons/github.svg");
        assert_eq!(resolved, PathBuf::from("/srv/www/icons/github.svg"));
    }

    #[test]
    fn test_relative_reference_can_leave_root() {
        // Traversal outside root is the caller's concern, not ours
        let resolved = resolve_under_root(Path::new("/srv/www"), "../shared/a.svg");
        assert_eq!(resolved, PathBuf::from("/srv/shared/a.svg"));
    }

    #[test]
    fn test_absolutize_relative_path() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = absolutize(Path::new("fixtures/../assets")).unwrap();
        assert_eq!(resolved, normalize_path(&cwd.join("assets")));
    }
}
