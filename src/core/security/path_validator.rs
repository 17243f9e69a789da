use std::io;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Path '{path}' refers to the root directory itself")]
    RootItself { path: PathBuf },

    #[error("Root directory '{root}' is not usable: {error}")]
    InvalidRoot { root: PathBuf, error: io::Error },
}

/// Confines user-supplied names to a single root directory.
///
/// Resolution is purely lexical: `.` and `..` segments are folded without
/// touching the filesystem, and the result must be a strict descendant of
/// the root. A name that resolves to the root itself is rejected.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard for `root`.
    ///
    /// A relative root is made absolute against the current directory and
    /// lexically cleaned. Callers that want symlinks in the root resolved
    /// should canonicalize it first.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, PathSecurityError> {
        let root = root.as_ref();
        let absolute = std::path::absolute(root).map_err(|e| PathSecurityError::InvalidRoot {
            root: root.to_path_buf(),
            error: e,
        })?;

        Ok(Self {
            root: clean(&absolute),
        })
    }

    /// The absolute root directory all resolutions are confined to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` against the root.
    ///
    /// Absolute names are treated as relative to the root, so `/etc/passwd`
    /// becomes `<root>/etc/passwd`. Any `..` that climbs out of the root makes
    /// the resolution fail.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let guard = PathGuard::new("/srv/cia")?;
    /// assert_eq!(guard.resolve("game.cia")?, PathBuf::from("/srv/cia/game.cia"));
    /// assert!(guard.resolve("../etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, name: &str) -> Result<PathBuf, PathSecurityError> {
        let joined = self.root.join(strip_root(Path::new(name)));
        let candidate = clean(&joined);

        if candidate == self.root {
            return Err(PathSecurityError::RootItself { path: candidate });
        }

        // Component-wise prefix check, equivalent to comparing with a
        // trailing separator appended to both sides.
        if !candidate.starts_with(&self.root) {
            return Err(PathSecurityError::OutsideRootDirectory {
                path: candidate,
                root: self.root.clone(),
            });
        }

        Ok(candidate)
    }
}

/// Drop any prefix or root component so the path joins under the root.
fn strip_root(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}

/// Lexically fold `.` and `..` segments.
///
/// `..` at the filesystem root stays at the root, matching how the kernel
/// treats `/..`.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }

    out
}
