use crate::{
    config::Config,
    nfa::{ClassId, State, StateId, NFA},
    Error,
};

/// A bounded list of active non-split states.
///
/// Sets are filled by [`Matcher::start_set`] and [`Matcher::step`], which
/// keep them free of duplicates through the matcher's generation marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSet {
    ids: Vec<StateId>,
    limit: usize,
}

impl StateSet {
    /// Create an empty set that holds at most `limit` states
    pub fn new(limit: usize) -> Self {
        StateSet { ids: Vec::new(), limit }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Overwrite this set with the contents of `other`, reusing the
    /// allocation.
    pub fn copy_from(&mut self, other: &StateSet) {
        self.ids.clear();
        self.ids.extend_from_slice(&other.ids);
        self.limit = other.limit;
    }

    fn insert(&mut self, id: StateId) -> Result<(), Error> {
        if self.ids.len() >= self.limit {
            return Err(Error::StateLimitExceeded { limit: self.limit });
        }
        self.ids.push(id);
        Ok(())
    }
}

/// Outcome of matching a whole haystack against every token class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'n> {
    pub matched: bool,
    /// Classes whose match state was active at the end of the input, in
    /// declaration order
    pub classes: Vec<&'n str>,
}

/// Simulates a combined NFA one byte at a time.
///
/// The matcher owns the per-state visitation marks and the generation
/// counter, so several matchers can run over one shared [`NFA`] without
/// interfering with each other.
#[derive(Debug, Clone)]
pub struct Matcher<'n> {
    nfa: &'n NFA,
    config: Config,
    /// Per-state: the generation in which the state was last added
    marks: Vec<usize>,
    /// Current generation; bumped once per closure round
    generation: usize,
}

impl<'n> Matcher<'n> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'n NFA) -> Self {
        Self::with_config(nfa, Config::default())
    }

    pub fn with_config(nfa: &'n NFA, config: Config) -> Self {
        Self {
            nfa,
            config,
            marks: vec![0; nfa.len()],
            generation: 0,
        }
    }

    pub fn nfa(&self) -> &'n NFA {
        self.nfa
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// An empty state set bounded by this matcher's configured limit
    pub fn state_set(&self) -> StateSet {
        StateSet::new(self.config.get_state_limit())
    }

    /// Fill `set` with the epsilon closure of every class's entry state.
    pub fn start_set(&mut self, set: &mut StateSet) -> Result<(), Error> {
        set.clear();
        self.generation += 1;

        let nfa = self.nfa;
        for &start in nfa.starts() {
            self.closure(set, Some(start))?;
        }
        Ok(())
    }

    /// Consume `byte` from every state in `current`, writing the closure of
    /// the surviving transitions into `next`.
    pub fn step(&mut self, current: &StateSet, byte: u8, next: &mut StateSet) -> Result<(), Error> {
        next.clear();
        self.generation += 1;

        let nfa = self.nfa;
        for &id in current.as_slice() {
            let state = nfa.state(id);
            if let State::Range { next: out, .. } = *state {
                if state.accepts(byte) {
                    self.closure(next, out)?;
                }
            }
        }
        Ok(())
    }

    /// Add `state` and everything reachable from it through split states.
    ///
    /// Split states are followed but never stored. Only meaningful inside a
    /// round started by [`Matcher::start_set`] or [`Matcher::step`].
    fn closure(&mut self, set: &mut StateSet, state: Option<StateId>) -> Result<(), Error> {
        let id = match state {
            Some(id) if self.marks[id] != self.generation => id,
            _ => return Ok(()),
        };
        // Mark before recursing: star and plus loops lead back here.
        self.marks[id] = self.generation;

        let state = *self.nfa.state(id);
        match state {
            State::Split { out1, out2 } => {
                self.closure(set, out1)?;
                self.closure(set, out2)
            }
            State::Range { .. } | State::Match { .. } => set.insert(id),
        }
    }

    /// The class reported for `set`: of all active match states, the one
    /// declared first in the grammar.
    pub fn best_match(&self, set: &StateSet) -> Option<ClassId> {
        set.as_slice()
            .iter()
            .filter_map(|&id| match *self.nfa.state(id) {
                State::Match { class } => Some(class),
                _ => None,
            })
            .min()
    }

    /// Every class with an active match state in `set`, in declaration order
    pub fn matched_classes(&self, set: &StateSet) -> Vec<ClassId> {
        let mut classes: Vec<ClassId> = set
            .as_slice()
            .iter()
            .filter_map(|&id| match *self.nfa.state(id) {
                State::Match { class } => Some(class),
                _ => None,
            })
            .collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Check whether the entire haystack is matched by any token class.
    pub fn matches_whole(&mut self, haystack: &[u8]) -> Result<MatchResult<'n>, Error> {
        let mut current = self.state_set();
        let mut next = self.state_set();
        self.start_set(&mut current)?;

        for &byte in haystack {
            if current.is_empty() {
                break;
            }
            self.step(&current, byte, &mut next)?;
            std::mem::swap(&mut current, &mut next);
        }

        let nfa = self.nfa;
        let classes: Vec<&'n str> = self
            .matched_classes(&current)
            .into_iter()
            .map(|class| nfa.class_name(class))
            .collect();
        Ok(MatchResult {
            matched: !classes.is_empty(),
            classes,
        })
    }

    /// Check if the entire haystack matches some token class
    pub fn is_match(&mut self, haystack: &[u8]) -> Result<bool, Error> {
        Ok(self.matches_whole(haystack)?.matched)
    }
}
