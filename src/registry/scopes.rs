use std::collections::HashMap;

use crate::model::ident::{Scope, TestId};
use crate::model::item::TestItem;
use crate::registry::manager::DependencyManager;

/// Identity of the container node that owns a manager: the nearest enclosing
/// session, package directory, module file, or class for a given test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ContainerKey {
    Session,
    Package(String),
    Module(String),
    Class(String, String),
}

fn container_key(id: &TestId, scope: Scope) -> Option<ContainerKey> {
    match scope {
        Scope::Session => Some(ContainerKey::Session),
        Scope::Package => id
            .package_dir()
            .map(|dir| ContainerKey::Package(dir.to_owned())),
        Scope::Module => Some(ContainerKey::Module(id.file().to_owned())),
        Scope::Class => id
            .class_name()
            .map(|class| ContainerKey::Class(id.file().to_owned(), class.to_owned())),
    }
}

/// Side-table mapping (container, scope) to its dependency manager.
///
/// Replaces attaching manager state directly onto host tree nodes: lookups
/// are keyed by the container identity derived from the test's identifier,
/// so two lookups for the same container always reach the same accumulated
/// state.
#[derive(Debug, Default)]
pub struct ManagerRegistry {
    managers: HashMap<ContainerKey, DependencyManager>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The manager owned by `item`'s container at `scope`, created on first
    /// lookup. `None` when no such container exists (class scope for a test
    /// outside a class, package scope for a file with no directory); callers
    /// treat that as "dependency checking is a no-op".
    pub fn get_manager(&mut self, item: &TestItem, scope: Scope) -> Option<&mut DependencyManager> {
        let key = container_key(&item.id, scope)?;
        Some(
            self.managers
                .entry(key)
                .or_insert_with(|| DependencyManager::new(scope)),
        )
    }

    /// Read-only lookup that never creates a manager.
    pub fn manager(&self, item: &TestItem, scope: Scope) -> Option<&DependencyManager> {
        let key = container_key(&item.id, scope)?;
        self.managers.get(&key)
    }

    /// Drop all accumulated state (between-runs lifecycle).
    pub fn reset(&mut self) {
        self.managers.clear();
    }

    /// Number of managers created so far.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
