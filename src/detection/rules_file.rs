use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use super::{DetectionRule, LanguageFamily, PatternCatalog};
use crate::error::RulesError;

/// Extra detection patterns supplied with `--rules`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    #[serde(default)]
    pub python: Vec<String>,
    #[serde(default)]
    pub cpp: Vec<String>,
}

impl RulesFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let path = path.as_ref();
        trace!(path = %path.display(), "loading rules file");

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content = fs::read_to_string(path)
            .map_err(|e| RulesError::rules_file_read_error(path, e.to_string()))?;

        match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .map_err(|e| RulesError::rules_parse_error(path, e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| RulesError::rules_parse_error(path, e.to_string())),
            "" => Err(RulesError::unsupported_format("<none>")),
            other => Err(RulesError::unsupported_format(other)),
        }
    }

    fn patterns(&self, family: LanguageFamily) -> &[String] {
        match family {
            LanguageFamily::Python => &self.python,
            LanguageFamily::Cpp => &self.cpp,
        }
    }

    /// Compiles every pattern and appends it to `catalog` after the rules
    /// already present.
    pub fn apply(&self, catalog: &mut PatternCatalog) -> Result<(), RulesError> {
        for family in LanguageFamily::ALL {
            for (index, pattern) in self.patterns(family).iter().enumerate() {
                let name = format!("{family}-custom-{index}");
                catalog.push(DetectionRule::new(family, name, pattern)?);
            }
        }
        debug!(
            python = self.python.len(),
            cpp = self.cpp.len(),
            "applied custom detection rules"
        );
        Ok(())
    }
}
