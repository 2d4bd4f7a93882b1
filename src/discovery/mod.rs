pub mod aggregator;
pub mod package;
pub mod walker;

pub use aggregator::{aggregate, Criterion, PackageRecord, PackageScan};
pub use package::{PackageRoot, MANIFEST_FILE};
pub use walker::{is_test_dir_name, Walk};
