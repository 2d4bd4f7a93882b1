use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::discovery::PackageRecord;
use crate::error::IoError;

/// First free name in `links_dir` for `base`: `base`, then `base_1`,
/// `base_2`, ... Anything already present counts as taken, including
/// dangling symlinks.
pub fn link_name(links_dir: &Path, base: &str) -> PathBuf {
    let candidate = links_dir.join(base);
    if !exists_no_follow(&candidate) {
        return candidate;
    }
    (1..)
        .map(|n| links_dir.join(format!("{base}_{n}")))
        .find(|candidate| !exists_no_follow(candidate))
        .unwrap_or(candidate)
}

fn exists_no_follow(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// A directory of symlinks, one per admitted package.
#[derive(Debug)]
pub struct LinkFarm {
    dir: PathBuf,
}

impl LinkFarm {
    /// Resolves `dir` to an absolute path and creates it if missing.
    pub fn create(dir: &Path) -> Result<Self, IoError> {
        let dir = std::path::absolute(dir).map_err(|e| IoError::resolve_error(dir, e))?;
        fs::create_dir_all(&dir).map_err(|e| IoError::create_dir_error(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Links `record.package_dir` under a collision-free name and returns the
    /// link path.
    pub fn link(&self, record: &PackageRecord) -> Result<PathBuf, IoError> {
        let link = link_name(&self.dir, &record.package);
        symlink_dir(&record.package_dir, &link)
            .map_err(|e| IoError::link_error(&link, &record.package_dir, e))?;
        debug!(link = %link.display(), target = %record.package_dir.display(), "link created");
        Ok(link)
    }
}
