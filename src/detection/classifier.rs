use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use super::{DetectionRule, LanguageFamily, PatternCatalog};

/// Decides whether a source file defines a ROS 2 node.
#[derive(Debug, Clone)]
pub struct NodeClassifier {
    catalog: PatternCatalog,
}

impl NodeClassifier {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    /// First rule of the file's family that matches anywhere in `content`.
    pub fn matching_rule(&self, path: &Path, content: &str) -> Option<&DetectionRule> {
        let family = LanguageFamily::from_path(path)?;
        self.catalog
            .rules_for(family)
            .find(|rule| rule.is_match(content))
    }

    pub fn classify(&self, path: &Path, content: &str) -> bool {
        self.matching_rule(path, content).is_some()
    }

    /// Reads `path` and returns the first matching rule. Unreadable files and
    /// unclassifiable extensions never match.
    pub fn rule_for_file(&self, path: &Path) -> Option<&DetectionRule> {
        LanguageFamily::from_path(path)?;

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "unreadable file, treating as no match");
                return None;
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        let rule = self.matching_rule(path, &content);
        if let Some(rule) = rule {
            trace!(path = %path.display(), rule = %rule.name, "node definition matched");
        }
        rule
    }

    pub fn classify_file(&self, path: &Path) -> bool {
        self.rule_for_file(path).is_some()
    }
}
