use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use crate::model::ident::Scope;
use crate::model::item::TestItem;
use crate::model::phase::PhaseReport;
use crate::registry::status::DepStatus;

/// Signal that the current test must not run because a dependency is unmet.
///
/// Not a failure: expected control flow that the host maps onto its own
/// skip mechanism, carrying the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub reason: String,
}

impl Skip {
    pub fn unmet(item: &str, dependency: &str) -> Self {
        Self {
            reason: format!("{item} depends on {dependency}"),
        }
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for Skip {}

/// Per-scope registry mapping canonical test name to its recorded phase
/// outcomes. One manager exists per (container, scope) pair and accumulates
/// state for the whole run.
#[derive(Debug)]
pub struct DependencyManager {
    scope: Scope,
    results: HashMap<String, DepStatus>,
}

impl DependencyManager {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            results: HashMap::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Record one phase outcome for `item` under its canonical name at this
    /// manager's scope, or under `name` when the declaration named the test
    /// explicitly.
    pub fn add_result(&mut self, item: &TestItem, name: Option<&str>, report: &PhaseReport) {
        let key = match name {
            Some(explicit) => explicit.to_owned(),
            None => item.id.canonical(self.scope),
        };
        debug!(
            phase = %report.phase,
            name = %key,
            outcome = %report.outcome,
            scope = %self.scope,
            "register result"
        );
        self.results
            .entry(key)
            .or_default()
            .record(report.phase, report.outcome);
    }

    /// Check each name in `depends` against the registry, in order.
    ///
    /// A registered, fully successful dependency passes. A registered but
    /// unsuccessful one skips the current item immediately. An unregistered
    /// name skips unless `ignore_unknown` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Skip`] naming the item and the first unmet dependency.
    pub fn check_depend(
        &self,
        depends: &[String],
        item: &TestItem,
        ignore_unknown: bool,
    ) -> Result<(), Skip> {
        debug!(item = %item.name(), scope = %self.scope, "check dependencies");
        for dep in depends {
            match self.results.get(dep) {
                Some(status) if status.is_success() => {
                    debug!(dependency = %dep, "succeeded");
                    continue;
                }
                Some(status) => {
                    debug!(dependency = %dep, status = %status, "has not succeeded");
                }
                None => {
                    debug!(dependency = %dep, "unknown");
                    if ignore_unknown {
                        continue;
                    }
                }
            }
            info!(item = %item.name(), dependency = %dep, "skipping");
            return Err(Skip::unmet(item.name(), dep));
        }
        Ok(())
    }

    /// Read-only status lookup by registered name.
    pub fn status(&self, name: &str) -> Option<&DepStatus> {
        self.results.get(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
