use std::fmt;
use std::str::FromStr;

/// Nesting level at which dependency names are resolved and results are
/// isolated. Outer scopes see more of the identifier; inner scopes less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Session,
    Package,
    Module,
    Class,
}

impl Scope {
    /// All scopes, outermost first.
    pub const ALL: [Scope; 4] = [Scope::Session, Scope::Package, Scope::Module, Scope::Class];

    /// The keyword form used by hosts ("session", "package", ...).
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Package => "package",
            Self::Module => "module",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An unrecognized scope keyword at the host string boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeParseError {
    pub keyword: String,
}

impl fmt::Display for ScopeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid scope '{}': expected session, package, module, or class",
            self.keyword
        )
    }
}

impl std::error::Error for ScopeParseError {}

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(Self::Session),
            "package" => Ok(Self::Package),
            "module" => Ok(Self::Module),
            "class" => Ok(Self::Class),
            other => Err(ScopeParseError {
                keyword: other.to_owned(),
            }),
        }
    }
}

/// Structured identity of a collected test, parsed once from the host's
/// node id (`path/to/file.py::Class::test_name[param]`).
///
/// Keeping the identifier structured avoids re-splitting the composite
/// string at every canonicalization and isolates the crate from
/// identifier-format drift across host versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestId {
    file: String,
    class: Option<String>,
    base: String,
    name: String,
}

/// A node-id string that does not fit the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentError {
    pub node_id: String,
    pub message: String,
}

impl fmt::Display for IdentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node id '{}': {}", self.node_id, self.message)
    }
}

impl std::error::Error for IdentError {}

impl TestId {
    /// Build an identifier from already-structured parts. The concrete name
    /// is `base` followed by `postfix`.
    pub fn new(file: &str, class: Option<&str>, base: &str, postfix: &str) -> Self {
        Self {
            file: file.to_owned(),
            class: class.map(str::to_owned),
            base: base.to_owned(),
            name: format!("{base}{postfix}"),
        }
    }

    /// Parse a host node id.
    ///
    /// Old hosts inserted an extra `::()` segment after the class to denote
    /// the class instance; it is stripped before splitting. The
    /// parametrization postfix is everything from the first `[` of the final
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError`] if the id has empty segments or more than one
    /// class segment.
    pub fn parse(node_id: &str) -> Result<Self, IdentError> {
        let normalized = node_id.replace("::()::", "::");
        let parts: Vec<&str> = normalized.split("::").collect();

        let (file, class, name) = match parts.as_slice() {
            [file, name] => (*file, None, *name),
            [file, class, name] => (*file, Some(*class), *name),
            _ => {
                return Err(IdentError {
                    node_id: node_id.to_owned(),
                    message: "expected 'file::name' or 'file::Class::name'".to_owned(),
                });
            }
        };

        if file.is_empty() || name.is_empty() || class.is_some_and(str::is_empty) {
            return Err(IdentError {
                node_id: node_id.to_owned(),
                message: "empty segment".to_owned(),
            });
        }

        let base = name.split('[').next().unwrap_or(name);
        Ok(Self {
            file: file.to_owned(),
            class: class.map(str::to_owned),
            base: base.to_owned(),
            name: name.to_owned(),
        })
    }

    /// The leading file-path segment.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The class segment, if the test lives inside a class.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// The declared base name, without any parametrization postfix.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The concrete test name, including any parametrization postfix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parametrization postfix (`"[1]"`), empty when not parameterized.
    pub fn postfix(&self) -> &str {
        self.name.strip_prefix(self.base.as_str()).unwrap_or("")
    }

    /// The full node id, reassembled.
    pub fn node_id(&self) -> String {
        match &self.class {
            Some(class) => format!("{}::{}::{}", self.file, class, self.name),
            None => format!("{}::{}", self.file, self.name),
        }
    }

    /// The registry key for this test at the given scope.
    ///
    /// Session and package scopes key by the full node id; module scope
    /// strips the file segment; class scope keeps only the test name.
    pub fn canonical(&self, scope: Scope) -> String {
        match scope {
            Scope::Session | Scope::Package => self.node_id(),
            Scope::Module => match &self.class {
                Some(class) => format!("{}::{}", class, self.name),
                None => self.name.clone(),
            },
            Scope::Class => self.name.clone(),
        }
    }

    /// The directory holding the file, or `None` when the file has no
    /// directory component (no package container exists for such a test).
    pub fn package_dir(&self) -> Option<&str> {
        self.file.rsplit_once('/').map(|(dir, _)| dir)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node_id())
    }
}
