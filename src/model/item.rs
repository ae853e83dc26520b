use crate::model::ident::{Scope, TestId};

/// A dependency declaration attached to a test item, as the host parsed it
/// from the test's annotation.
///
/// Read-only input data: the static pass rewrites `depends` in place, but
/// nothing else in the crate mutates a mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyMark {
    /// Explicit registration name; defaults to the test's canonical name.
    pub name: Option<String>,
    /// Names of the tests this test depends on, adapted to `scope`.
    pub depends: Vec<String>,
    /// Scope at which `depends` is looked up. Defaults to module.
    pub scope: Scope,
    /// Opt-in to static transitive expansion by the resolver pass.
    pub collect: bool,
    /// Per-declaration override of the global ignore-unknown option.
    pub ignore_unknown: Option<bool>,
}

impl DependencyMark {
    pub fn new() -> Self {
        Self {
            name: None,
            depends: Vec::new(),
            scope: Scope::Module,
            collect: false,
            ignore_unknown: None,
        }
    }

    /// Set an explicit registration name.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Set the dependency name list.
    pub fn depends_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the lookup scope.
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Mark the declaration for static transitive expansion.
    pub fn collected(mut self) -> Self {
        self.collect = true;
        self
    }

    /// Override the global ignore-unknown option for this declaration.
    pub fn ignoring_unknown(mut self, ignore: bool) -> Self {
        self.ignore_unknown = Some(ignore);
        self
    }
}

impl Default for DependencyMark {
    fn default() -> Self {
        Self::new()
    }
}

/// A collected test item: its structured identity plus any dependency
/// declarations, closest declaration first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub id: TestId,
    pub marks: Vec<DependencyMark>,
}

impl TestItem {
    pub fn new(id: TestId) -> Self {
        Self {
            id,
            marks: Vec::new(),
        }
    }

    /// Attach a dependency declaration (kept in closest-first order).
    pub fn with_mark(mut self, mark: DependencyMark) -> Self {
        self.marks.push(mark);
        self
    }

    /// The concrete test name, including any parametrization postfix.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// The nearest dependency declaration, if any.
    pub fn closest_mark(&self) -> Option<&DependencyMark> {
        self.marks.first()
    }
}
