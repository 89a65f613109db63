use std::fmt;

/// A state ID in the NFA
pub type StateId = usize;

/// A token class ID. Classes are numbered in declaration order, so a lower ID
/// means an earlier grammar line.
pub type ClassId = usize;

/// A Thompson NFA state over bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Consumes one byte in `start..=end`, then moves to `next`
    Range {
        start: u8,
        end: u8,
        next: Option<StateId>,
    },

    /// Split state with two epsilon transitions (no input consumed)
    Split {
        out1: Option<StateId>,
        out2: Option<StateId>,
    },

    /// Match state (accepting), tagged with the token class it recognizes
    Match { class: ClassId },
}

impl State {
    /// Returns true if this is a range state whose range contains `byte`
    pub fn accepts(&self, byte: u8) -> bool {
        match *self {
            State::Range { start, end, .. } => start <= byte && byte <= end,
            _ => false,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, State::Match { .. })
    }
}

/// Which transition field of a state a [`Slot`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// `next` of a range state, `out1` of a split state
    Primary,
    /// `out2` of a split state
    Secondary,
}

/// A dangling transition: a field of an existing state that has not been
/// given a destination yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub state: StateId,
    pub branch: Branch,
}

impl Slot {
    pub fn primary(state: StateId) -> Self {
        Slot { state, branch: Branch::Primary }
    }

    pub fn secondary(state: StateId) -> Self {
        Slot { state, branch: Branch::Secondary }
    }
}

/// Fragment of an NFA: an entry state plus the slots still waiting to be
/// connected to whatever comes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub out: Vec<Slot>,
}

/// A combined Thompson NFA: one sub-automaton per token class, all sharing a
/// single state arena and simulated in parallel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NFA {
    /// All states in the NFA
    pub(crate) states: Vec<State>,
    /// Entry state of each token class, in declaration order
    pub(crate) starts: Vec<StateId>,
    /// Token class names, indexed by `ClassId`
    pub(crate) classes: Vec<String>,
}

impl NFA {
    /// Create a new empty NFA
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states in the NFA
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this NFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Entry states of all token classes, in declaration order
    pub fn starts(&self) -> &[StateId] {
        &self.starts
    }

    /// Number of token classes
    pub fn class_len(&self) -> usize {
        self.classes.len()
    }

    /// Returns the name of a token class.
    ///
    /// # Panics
    ///
    /// Panics if `class` was not created by this NFA.
    pub fn class_name(&self, class: ClassId) -> &str {
        &self.classes[class]
    }

    /// Returns the first declared class with the given name.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes.iter().position(|c| c == name)
    }

    /// Add a new state and return its ID
    pub(crate) fn add_state(&mut self, state: State) -> StateId {
        let id = self.states.len();
        self.states.push(state);
        id
    }

    /// Create a range state with a dangling `next` transition
    pub(crate) fn range(&mut self, start: u8, end: u8) -> StateId {
        self.add_state(State::Range { start, end, next: None })
    }

    /// Create a split state whose first transition is `out1`
    pub(crate) fn split(&mut self, out1: StateId, out2: Option<StateId>) -> StateId {
        self.add_state(State::Split { out1: Some(out1), out2 })
    }

    /// Register a token class and create its match state
    pub(crate) fn match_state(&mut self, name: &str) -> (ClassId, StateId) {
        let class = self.classes.len();
        self.classes.push(name.to_string());
        (class, self.add_state(State::Match { class }))
    }

    /// Point a dangling slot at `to`
    pub(crate) fn patch(&mut self, slot: Slot, to: StateId) {
        match (&mut self.states[slot.state], slot.branch) {
            (State::Range { next, .. }, Branch::Primary) => *next = Some(to),
            (State::Split { out1, .. }, Branch::Primary) => *out1 = Some(to),
            (State::Split { out2, .. }, Branch::Secondary) => *out2 = Some(to),
            (state, branch) => {
                unreachable!("slot {:?} does not exist on {:?}", branch, state)
            }
        }
    }

    /// Point every slot of `out` at `to`
    pub(crate) fn connect(&mut self, out: &[Slot], to: StateId) {
        for &slot in out {
            self.patch(slot, to);
        }
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn target(id: Option<StateId>) -> String {
            id.map_or_else(|| "-".to_string(), |id| id.to_string())
        }

        for (class, &start) in self.starts.iter().enumerate() {
            writeln!(f, "start {}: {}", self.classes[class], start)?;
        }
        for (id, state) in self.states.iter().enumerate() {
            match *state {
                State::Range { start, end, next } if start == end => {
                    writeln!(f, "{:>4}: {:?} -> {}", id, start as char, target(next))?
                }
                State::Range { start, end, next } => writeln!(
                    f,
                    "{:>4}: {:?}-{:?} -> {}",
                    id,
                    start as char,
                    end as char,
                    target(next)
                )?,
                State::Split { out1, out2 } => writeln!(
                    f,
                    "{:>4}: SPLIT -> {}, {}",
                    id,
                    target(out1),
                    target(out2)
                )?,
                State::Match { class } => {
                    writeln!(f, "{:>4}: MATCH {}", id, self.classes[class])?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_primary_and_secondary() {
        let mut nfa = NFA::new();

        let a = nfa.range(b'a', b'a');
        let split = nfa.split(a, None);
        let (_, m) = nfa.match_state("A");

        nfa.patch(Slot::primary(a), split);
        nfa.patch(Slot::secondary(split), m);

        assert_eq!(
            nfa.state(a),
            &State::Range { start: b'a', end: b'a', next: Some(split) }
        );
        assert_eq!(
            nfa.state(split),
            &State::Split { out1: Some(a), out2: Some(m) }
        );
    }

    #[test]
    fn test_accepts_inclusive_range() {
        let state = State::Range { start: b'0', end: b'9', next: None };

        assert!(state.accepts(b'0'));
        assert!(state.accepts(b'9'));
        assert!(!state.accepts(b'a'));
        assert!(!State::Split { out1: None, out2: None }.accepts(b'0'));
        assert!(!State::Match { class: 0 }.accepts(b'0'));
    }

    #[test]
    fn test_class_lookup() {
        let mut nfa = NFA::new();
        nfa.match_state("NUM");
        nfa.match_state("ID");
        nfa.match_state("NUM");

        assert_eq!(nfa.class_len(), 3);
        assert_eq!(nfa.class_id("NUM"), Some(0));
        assert_eq!(nfa.class_id("ID"), Some(1));
        assert_eq!(nfa.class_id("WHITE"), None);
        assert_eq!(nfa.class_name(1), "ID");
    }
}
