use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, FilterEntry, WalkDir};

const TEST_DIR_NAMES: &[&str] = &["test", "tests"];

/// True for `test`/`tests` in any letter case. Partial matches such as
/// `testing` or `test_utils` are not test directories.
pub fn is_test_dir_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy().to_lowercase();
    TEST_DIR_NAMES.contains(&name.as_str())
}

fn keep_entry(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !(entry.file_type().is_dir() && is_test_dir_name(entry.file_name()))
}

// Entries reach the comparator before links are followed, so a link to a
// directory has to be resolved here to sort with the other directories.
fn is_dir_followed(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
    } else {
        entry.file_type().is_dir()
    }
}

// Files before subdirectories, each group by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    is_dir_followed(a)
        .cmp(&is_dir_followed(b))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Depth-first, symlink-following traversal that never descends into test
/// directories. Entries that cannot be read are logged and skipped.
pub struct Walk {
    inner: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl Walk {
    pub fn new(root: &Path) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(true)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(keep_entry as fn(&DirEntry) -> bool);
        Self { inner }
    }
}

impl Iterator for Walk {
    type Item = DirEntry;

    fn next(&mut self) -> Option<DirEntry> {
        loop {
            match self.inner.next()? {
                Ok(entry) => return Some(entry),
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!(path = %path, error = %e, "skipping unreadable entry");
                }
            }
        }
    }
}

/// Regular files beneath `root`, test directories pruned.
pub fn source_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    Walk::new(root)
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
}
