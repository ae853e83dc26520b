use std::fmt;
use std::str::FromStr;

/// One of the three sub-steps of a single test's execution, as reported by
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Setup,
    Call,
    Teardown,
}

impl Phase {
    /// All phases, in execution order.
    pub const ALL: [Phase; 3] = [Phase::Setup, Phase::Call, Phase::Teardown];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Setup => 0,
            Self::Call => 1,
            Self::Teardown => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Call => write!(f, "call"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}

/// An unrecognized phase name at the host string boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseParseError {
    pub keyword: String,
}

impl fmt::Display for PhaseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid phase '{}': expected setup, call, or teardown",
            self.keyword
        )
    }
}

impl std::error::Error for PhaseParseError {}

impl FromStr for Phase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setup" => Ok(Self::Setup),
            "call" => Ok(Self::Call),
            "teardown" => Ok(Self::Teardown),
            other => Err(PhaseParseError {
                keyword: other.to_owned(),
            }),
        }
    }
}

/// Final outcome of one phase of one test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// An unrecognized outcome name at the host string boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeParseError {
    pub keyword: String,
}

impl fmt::Display for OutcomeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid outcome '{}': expected passed, failed, or skipped",
            self.keyword
        )
    }
}

impl std::error::Error for OutcomeParseError {}

impl FromStr for Outcome {
    type Err = OutcomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            other => Err(OutcomeParseError {
                keyword: other.to_owned(),
            }),
        }
    }
}

/// The host's per-phase result callback payload: which phase just finished
/// and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub outcome: Outcome,
}

impl PhaseReport {
    pub fn new(phase: Phase, outcome: Outcome) -> Self {
        Self { phase, outcome }
    }
}
