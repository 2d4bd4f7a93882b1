pub mod catalog;
pub mod classifier;
pub mod family;
pub mod rules_file;

pub use catalog::{DetectionRule, PatternCatalog};
pub use classifier::NodeClassifier;
pub use family::LanguageFamily;
pub use rules_file::RulesFile;
