use regex::Regex;
use tracing::debug;

use super::LanguageFamily;
use crate::error::RulesError;

// class Talker(Node): / class Talker(rclpy.node.Node, Mixin):
const PY_NODE_CLASS: &str =
    r"class\s+\w+\s*\(\s*(?:\w+\s*\.\s*)*(?:Node|LifecycleNode)\s*[,)]";

const PY_CREATE_NODE: &str = r"\brclpy\s*\.\s*create_node\s*\(";

// class Talker : public rclcpp::Node / , public rclcpp_lifecycle::LifecycleNode
const CPP_NODE_INHERIT: &str =
    r"[:,]\s*public\s+rclcpp(?:_lifecycle)?\s*::\s*(?:Node|LifecycleNode)\b";

const CPP_NODE_CONSTRUCT: &str = concat!(
    r"(?:std\s*::\s*make_shared\s*<\s*rclcpp(?:_lifecycle)?\s*::\s*(?:Node|LifecycleNode)\s*>",
    r"|\brclcpp(?:_lifecycle)?\s*::\s*(?:Node|LifecycleNode)\s*::\s*make_shared\s*\(",
    r"|\bnew\s+rclcpp(?:_lifecycle)?\s*::\s*(?:Node|LifecycleNode)\s*\()",
);

const BUILTIN_RULES: &[(LanguageFamily, &str, &str)] = &[
    (LanguageFamily::Python, "py-node-class", PY_NODE_CLASS),
    (LanguageFamily::Python, "py-create-node", PY_CREATE_NODE),
    (LanguageFamily::Cpp, "cpp-node-inherit", CPP_NODE_INHERIT),
    (LanguageFamily::Cpp, "cpp-node-construct", CPP_NODE_CONSTRUCT),
];

/// A compiled pattern whose match implies a node definition in files of
/// `family`.
#[derive(Debug, Clone)]
pub struct DetectionRule {
    pub family: LanguageFamily,
    pub name: String,
    pattern: Regex,
}

impl DetectionRule {
    pub fn new(
        family: LanguageFamily,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, RulesError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| RulesError::invalid_pattern(family.as_str(), pattern, e.to_string()))?;
        Ok(Self {
            family,
            name: name.into(),
            pattern,
        })
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

/// Ordered detection rules for every language family. Built-in rules come
/// first, custom rules are appended in the order they were added.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    rules: Vec<DetectionRule>,
}

impl PatternCatalog {
    pub fn builtin() -> Result<Self, RulesError> {
        let rules = BUILTIN_RULES
            .iter()
            .map(|&(family, name, pattern)| DetectionRule::new(family, name, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = rules.len(), "compiled built-in detection rules");
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: DetectionRule) {
        self.rules.push(rule);
    }

    /// Rules that apply to `family`, in catalog order.
    pub fn rules_for(&self, family: LanguageFamily) -> impl Iterator<Item = &DetectionRule> {
        self.rules.iter().filter(move |r| r.family == family)
    }
}
