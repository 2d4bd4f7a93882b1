use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::walker::is_test_dir_name;

/// Manifest whose presence marks a directory as a ROS package.
pub const MANIFEST_FILE: &str = "package.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRoot {
    pub path: PathBuf,
    pub name: String,
}

impl PackageRoot {
    /// Returns a package root if `dir` holds a manifest file and ends in a
    /// normal name component.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        if !dir.join(MANIFEST_FILE).is_file() {
            return None;
        }
        let Some(name) = dir.file_name() else {
            debug!(path = %dir.display(), "package directory has no name");
            return None;
        };
        let name = name.to_string_lossy().into_owned();
        Some(Self {
            path: dir.to_path_buf(),
            name,
        })
    }

    pub fn parent_is_test_dir(&self) -> bool {
        self.path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(is_test_dir_name)
    }

    /// True when any segment of the path below `search_root` is a test
    /// directory name.
    pub fn has_test_segment(&self, search_root: &Path) -> bool {
        let Ok(relative) = self.path.strip_prefix(search_root) else {
            return false;
        };
        relative.components().any(|c| match c {
            Component::Normal(name) => is_test_dir_name(name),
            _ => false,
        })
    }

    pub fn is_excluded(&self, search_root: &Path) -> bool {
        self.parent_is_test_dir() || self.has_test_segment(search_root)
    }

    /// True if the package root holds a regular file named `README` or
    /// `README.<ext>`, ignoring case. Unreadable directories count as having
    /// no README.
    pub fn has_readme(&self) -> bool {
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "cannot list package directory");
                return false;
            }
        };

        entries.flatten().any(|entry| {
            let name = entry.file_name().to_string_lossy().to_uppercase();
            (name == "README" || name.starts_with("README.")) && entry.path().is_file()
        })
    }
}
