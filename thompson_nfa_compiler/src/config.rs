/// The default bound on concurrently active non-split states.
pub const DEFAULT_STATE_LIMIT: usize = 200;

/// Token classes that are recognized but not emitted unless configured
/// otherwise.
pub const DEFAULT_DISCARD: &[&str] = &["WHITE", "NEWLINE"];

/// Configuration for a [`Matcher`](crate::Matcher) and
/// [`Scanner`](crate::Scanner).
///
/// ```
/// use thompson_nfa_compiler::Config;
///
/// let config = Config::new().state_limit(64).discard(["SPACE"]);
/// assert_eq!(config.get_state_limit(), 64);
/// assert!(config.is_discarded("SPACE"));
/// assert!(!config.is_discarded("WHITE"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    state_limit: usize,
    discard: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            state_limit: DEFAULT_STATE_LIMIT,
            discard: DEFAULT_DISCARD.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the maximum number of non-split states a state set may hold.
    ///
    /// A simulation that needs more reports
    /// [`Error::StateLimitExceeded`](crate::Error::StateLimitExceeded).
    pub fn state_limit(mut self, limit: usize) -> Self {
        self.state_limit = limit;
        self
    }

    /// Replace the set of token classes the scanner drops instead of
    /// emitting.
    pub fn discard<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discard = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn get_state_limit(&self) -> usize {
        self.state_limit
    }

    pub fn get_discard(&self) -> &[String] {
        &self.discard
    }

    pub fn is_discarded(&self, class: &str) -> bool {
        self.discard.iter().any(|c| c == class)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
