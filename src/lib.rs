/// ROS Node Audit
///
/// Walks a ROS workspace, finds packages (directories holding a
/// `package.xml`) and classifies their Python and C++ sources with regex
/// heuristics to tell which packages define ROS 2 nodes. Results are written
/// as a JSON index or as a directory of symlinks.
pub mod cli;
pub mod commands;
pub mod detection;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;

pub use detection::{LanguageFamily, NodeClassifier, PatternCatalog};
pub use discovery::{aggregate, Criterion, PackageRecord};
