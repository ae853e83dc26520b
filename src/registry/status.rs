use std::fmt;

use crate::model::phase::{Outcome, Phase};

/// Recorded outcome of each execution phase for one registered test.
///
/// Created lazily on first registration; a rerun overwrites the phase it
/// reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepStatus {
    results: [Option<Outcome>; 3],
}

impl DepStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored outcome for `phase`.
    pub fn record(&mut self, phase: Phase, outcome: Outcome) {
        self.results[phase.index()] = Some(outcome);
    }

    /// The recorded outcome for `phase`, if the phase has run.
    pub fn outcome(&self, phase: Phase) -> Option<Outcome> {
        self.results[phase.index()]
    }

    /// `true` iff all three phases are recorded and all passed. A phase the
    /// test never reached (setup failed, so call never ran) counts against
    /// success.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| *r == Some(Outcome::Passed))
    }
}

impl fmt::Display for DepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status(")?;
        for (i, phase) in Phase::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.results[phase.index()] {
                Some(outcome) => write!(f, "{phase}: {outcome}")?,
                None => write!(f, "{phase}: unset")?,
            }
        }
        write!(f, ")")
    }
}
