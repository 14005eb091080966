// src/rules/naming.rs

use crate::registry::TaskName;

/// Case-sensitive predicate over a task name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// Name starts with `prefix` and ends with `suffix`.
    PrefixSuffix { prefix: String, suffix: String },
    Exact(String),
}

impl NamePattern {
    pub fn prefix_suffix(prefix: &str, suffix: &str) -> Self {
        NamePattern::PrefixSuffix {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn exact(name: &str) -> Self {
        NamePattern::Exact(name.to_string())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::PrefixSuffix { prefix, suffix } => {
                name.starts_with(prefix.as_str()) && name.ends_with(suffix.as_str())
            }
            NamePattern::Exact(expected) => name == expected,
        }
    }
}

/// When a task name matches `pattern`, the task depends on every `targets`
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRule {
    id: &'static str,
    pattern: NamePattern,
    targets: Vec<TaskName>,
}

impl NamingRule {
    pub fn new<I, S>(id: &'static str, pattern: NamePattern, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            pattern,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    pub fn targets(&self) -> &[TaskName] {
        &self.targets
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches(name)
    }
}
