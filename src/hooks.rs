use tracing::debug;

use crate::config::Settings;
use crate::model::ident::Scope;
use crate::model::item::TestItem;
use crate::model::phase::PhaseReport;
use crate::registry::manager::Skip;
use crate::registry::scopes::ManagerRegistry;

/// The host-facing facade: owns the configuration and the per-scope manager
/// registry, and implements the hook points the host drives.
///
/// The host calls [`record_result`](Self::record_result) once per
/// (test, phase) as results become final, and
/// [`check_setup`](Self::check_setup) once per test before its body runs. A
/// test body may additionally call [`depends`](Self::depends) at any point.
pub struct DependencyTracker {
    settings: Settings,
    registry: ManagerRegistry,
}

impl DependencyTracker {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registry: ManagerRegistry::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read-only view of the manager registry, for introspection.
    pub fn registry(&self) -> &ManagerRegistry {
        &self.registry
    }

    /// Per-phase result callback. Registers the outcome with every
    /// scope-level manager whose container exists, under the closest mark's
    /// explicit name when one was declared. Items without a mark only
    /// register when `automark` is set.
    pub fn record_result(&mut self, item: &TestItem, report: &PhaseReport) {
        let mark = item.closest_mark();
        if mark.is_none() && !self.settings.automark {
            return;
        }
        let name = mark.and_then(|m| m.name.as_deref());
        for scope in Scope::ALL {
            if let Some(manager) = self.registry.get_manager(item, scope) {
                manager.add_result(item, name, report);
            }
        }
    }

    /// Pre-test gate. Checks the closest mark's dependency list at its
    /// declared scope; a missing container makes the check a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Skip`] when a dependency is unmet, for the host to map onto
    /// its skip mechanism.
    pub fn check_setup(&mut self, item: &TestItem) -> Result<(), Skip> {
        let Some(mark) = item.closest_mark() else {
            return Ok(());
        };
        if mark.depends.is_empty() {
            return Ok(());
        }
        let ignore_unknown = mark.ignore_unknown.unwrap_or(self.settings.ignore_unknown);
        match self.registry.get_manager(item, mark.scope) {
            Some(manager) => manager.check_depend(&mark.depends, item, ignore_unknown),
            None => {
                debug!(item = %item.name(), scope = %mark.scope, "no container at scope, skipping check");
                Ok(())
            }
        }
    }

    /// Runtime dependency check, callable from inside a running test. Same
    /// lookup and skip logic as the declarative form.
    ///
    /// # Errors
    ///
    /// Returns [`Skip`] when a dependency is unmet.
    pub fn depends(&mut self, item: &TestItem, names: &[String], scope: Scope) -> Result<(), Skip> {
        match self.registry.get_manager(item, scope) {
            Some(manager) => manager.check_depend(names, item, self.settings.ignore_unknown),
            None => Ok(()),
        }
    }

    /// Drop all accumulated results (between-runs lifecycle).
    pub fn reset(&mut self) {
        self.registry.reset();
    }
}
