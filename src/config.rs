/// Process-wide options, read once by the host at configuration time and
/// immutable for the remainder of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Register every test as a dependency producer, marked or not.
    pub automark: bool,
    /// Treat dependencies with unregistered names as satisfied.
    pub ignore_unknown: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_automark(mut self, automark: bool) -> Self {
        self.automark = automark;
        self
    }

    pub fn with_ignore_unknown(mut self, ignore_unknown: bool) -> Self {
        self.ignore_unknown = ignore_unknown;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let settings = Settings::new();
        assert!(!settings.automark);
        assert!(!settings.ignore_unknown);
    }

    #[test]
    fn builders_set_flags() {
        let settings = Settings::new().with_automark(true).with_ignore_unknown(true);
        assert!(settings.automark);
        assert!(settings.ignore_unknown);
    }
}
