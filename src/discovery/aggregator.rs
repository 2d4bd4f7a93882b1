use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

use super::package::PackageRoot;
use super::walker::{self, Walk};
use crate::detection::NodeClassifier;
use crate::error::IoError;

/// Condition a package must satisfy to be admitted.
#[derive(Debug, Clone, Copy)]
pub enum Criterion<'a> {
    /// At least one source file defines a node. Every matching file is
    /// recorded.
    DefinesNode(&'a NodeClassifier),
    /// The package root has no README file.
    MissingReadme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub package: String,
    pub package_dir: PathBuf,
    pub node_files: Vec<String>,
}

/// Lazily yields admitted packages under a search root in walk order.
/// Dropping the scan abandons the rest of the traversal.
pub struct PackageScan<'a> {
    search_root: PathBuf,
    walk: Walk,
    criterion: Criterion<'a>,
    limit: Option<usize>,
    emitted: usize,
}

/// Starts a scan of `search_root`. The root is made absolute and `.`/`..`
/// are folded lexically (symlinks are not resolved), so every record carries
/// a clean absolute `package_dir`.
pub fn aggregate<'a>(
    search_root: &Path,
    criterion: Criterion<'a>,
    limit: Option<usize>,
) -> Result<PackageScan<'a>, IoError> {
    let search_root = std::path::absolute(search_root)
        .map(|p| normalize(&p))
        .map_err(|e| IoError::resolve_error(search_root, e))?;
    debug!(root = %search_root.display(), ?limit, "scanning for packages");

    Ok(PackageScan {
        walk: Walk::new(&search_root),
        search_root,
        criterion,
        limit,
        emitted: 0,
    })
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

impl PackageScan<'_> {
    pub fn search_root(&self) -> &Path {
        &self.search_root
    }
}

impl Iterator for PackageScan<'_> {
    type Item = PackageRecord;

    fn next(&mut self) -> Option<PackageRecord> {
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            return None;
        }

        for entry in self.walk.by_ref() {
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(package) = PackageRoot::from_dir(entry.path()) else {
                continue;
            };
            if package.is_excluded(&self.search_root) {
                debug!(package = %package.path.display(), "skipping package under test directory");
                continue;
            }
            if let Some(record) = evaluate(self.criterion, package) {
                self.emitted += 1;
                return Some(record);
            }
        }
        None
    }
}

fn evaluate(criterion: Criterion<'_>, package: PackageRoot) -> Option<PackageRecord> {
    let node_files = match criterion {
        Criterion::DefinesNode(classifier) => {
            let files = matching_files(classifier, &package.path);
            if files.is_empty() {
                trace!(package = %package.name, "no node definitions");
                return None;
            }
            files
        }
        Criterion::MissingReadme => {
            if package.has_readme() {
                trace!(package = %package.name, "README present");
                return None;
            }
            Vec::new()
        }
    };

    Some(PackageRecord {
        package: package.name,
        package_dir: package.path,
        node_files,
    })
}

/// Relative paths of every file under `package_dir` that defines a node.
pub fn matching_files(classifier: &NodeClassifier, package_dir: &Path) -> Vec<String> {
    walker::source_files(package_dir)
        .filter_map(|path| {
            let rule = classifier.rule_for_file(&path)?;
            let relative = path.strip_prefix(package_dir).ok()?;
            debug!(file = %path.display(), rule = %rule.name, "node definition found");
            Some(relative.to_string_lossy().into_owned())
        })
        .collect()
}
