// src/rules/engine.rs

use tracing::{debug, info, warn};

use crate::errors::{RelkitError, Result};
use crate::plugin::{
    GENERATE_GENERIC_CHANGELOG, GENERATE_PROJECT_CHANGELOG, TAG_PROJECT, VERIFY_BUILD_SERVER,
    VERIFY_NO_STAGE_URL, VERIFY_VERSION_CONTROL,
};
use crate::registry::TaskRegistry;
use crate::rules::naming::{NamePattern, NamingRule};

/// Rule id of the pre-release build-config bundle.
pub const RELEASE_BUILD_CONFIG_RULE: &str = "release-build-config";
/// Rule id of the dev pre-build changelog hook.
pub const DEV_PRE_BUILD_RULE: &str = "dev-pre-build";

/// Evaluates every rule against every task name it is shown.
///
/// Evaluation is idempotent: replaying a task adds no new edges, because the
/// registry stores edges as sets.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<NamingRule>,
}

impl RuleEngine {
    pub fn new(rules: Vec<NamingRule>) -> Self {
        Self { rules }
    }

    /// The release rules. With `ignore_checks` the build-config bundle is
    /// left out entirely.
    pub fn release_rules(ignore_checks: bool) -> Self {
        let mut rules = Vec::with_capacity(2);

        if ignore_checks {
            warn!("ignoreChecks is set; release build configs will not be gated by verification");
        } else {
            rules.push(NamingRule::new(
                RELEASE_BUILD_CONFIG_RULE,
                NamePattern::prefix_suffix("generate", "ReleaseBuildConfig"),
                [
                    TAG_PROJECT,
                    GENERATE_PROJECT_CHANGELOG,
                    VERIFY_BUILD_SERVER,
                    VERIFY_VERSION_CONTROL,
                    VERIFY_NO_STAGE_URL,
                ],
            ));
        }

        rules.push(NamingRule::new(
            DEV_PRE_BUILD_RULE,
            NamePattern::exact("preDevReleaseBuild"),
            [GENERATE_GENERIC_CHANGELOG],
        ));

        Self { rules }
    }

    pub fn rules(&self) -> &[NamingRule] {
        &self.rules
    }

    /// Apply every matching rule to `name`. Returns the number of edges that
    /// were newly added.
    pub fn on_task_registered(&self, registry: &mut TaskRegistry, name: &str) -> Result<usize> {
        let mut added = 0;

        for rule in self.rules.iter().filter(|rule| rule.matches(name)) {
            let new_edges = registry.depends_on(name, rule.targets())?;
            if new_edges > 0 {
                info!(
                    task = %name,
                    rule = rule.id(),
                    targets = ?rule.targets(),
                    "rule matched; added dependencies"
                );
            } else {
                debug!(task = %name, rule = rule.id(), "rule matched; edges already present");
            }
            added += new_edges;
        }

        Ok(added)
    }

    /// Check that every rule target is registered, then subscribe to the
    /// registry. Existing tasks are replayed through the rules.
    pub fn install(self, registry: &mut TaskRegistry) -> Result<()> {
        for rule in &self.rules {
            for target in rule.targets() {
                if !registry.contains(target) {
                    return Err(RelkitError::TaskNotFound(format!(
                        "'{target}' (target of rule '{}') must be registered before the rule engine is installed",
                        rule.id()
                    )));
                }
            }
        }

        debug!(rules = self.rules.len(), "installing rule engine");
        registry.subscribe(Box::new(move |reg: &mut TaskRegistry, name: &str| {
            self.on_task_registered(reg, name).map(|_| ())
        }))
    }
}
