use crate::{
    nfa::{Fragment, Slot, StateId, NFA},
    CompileError, CompileResult, Error,
};

/// Compiler that turns postfix regexes into one combined Thompson NFA.
///
/// Each call to [`Compiler::add_class`] compiles one token class and appends
/// its entry state to the automaton. Classes keep their declaration order,
/// which is what the scanner uses to break ties between equally long matches.
pub struct Compiler {
    nfa: NFA,
    frags: Vec<Fragment>,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self {
            nfa: NFA::new(),
            frags: Vec::new(),
        }
    }

    /// Compile every `(class, postfix regex)` pair, in order, into one NFA.
    pub fn build_many<I, N, R>(rules: I) -> Result<NFA, Error>
    where
        I: IntoIterator<Item = (N, R)>,
        N: AsRef<str>,
        R: AsRef<[u8]>,
    {
        let mut compiler = Compiler::new();
        for (class, regex) in rules {
            compiler.add_class(class.as_ref(), regex.as_ref())?;
        }
        Ok(compiler.finish())
    }

    /// Compile `regex` and terminate it with a match state for `class`.
    ///
    /// Returns the entry state of the new sub-automaton.
    pub fn add_class(&mut self, class: &str, regex: &[u8]) -> Result<StateId, Error> {
        #[cfg(feature = "logging")]
        let before = self.nfa.len();
        let fragment = self.compile_postfix(regex).map_err(|source| Error::Compile {
            class: class.to_string(),
            source,
        })?;

        let (_, match_state) = self.nfa.match_state(class);
        self.nfa.connect(&fragment.out, match_state);
        self.nfa.starts.push(fragment.start);

        debug!(
            "compiled class {} into {} states (entry {})",
            class,
            self.nfa.len() - before,
            fragment.start
        );
        Ok(fragment.start)
    }

    /// Finish building and return the combined NFA
    pub fn finish(self) -> NFA {
        debug!(
            "built NFA with {} classes and {} states",
            self.nfa.class_len(),
            self.nfa.len()
        );
        self.nfa
    }

    /// Compile one postfix regex into a fragment whose `out` slots are still
    /// dangling.
    ///
    /// States created before an error is detected stay in the arena but are
    /// unreachable from any entry state.
    pub fn compile_postfix(&mut self, regex: &[u8]) -> CompileResult<Fragment> {
        self.frags.clear();

        let mut offset = 0;
        while offset < regex.len() {
            let byte = regex[offset];
            match byte {
                b'.' => self.compile_concat(offset)?,
                b'|' => self.compile_union(offset)?,
                b'*' => self.compile_star(offset)?,
                b'+' => self.compile_plus(offset)?,
                b'?' => self.compile_question(offset)?,
                b'\\' => {
                    offset += 1;
                    let byte = escape(regex, offset)?;
                    self.compile_literal(byte, byte);
                }
                b'[' => {
                    let (start, end) = parse_range(regex, offset)?;
                    self.compile_literal(start, end);
                    offset += 4;
                }
                32..=255 => self.compile_literal(byte, byte),
                _ => return Err(CompileError::InvalidSymbol { symbol: byte, offset }),
            }
            offset += 1;
        }

        let remaining = self.frags.len();
        match self.frags.pop() {
            Some(fragment) if remaining == 1 => Ok(fragment),
            _ => Err(CompileError::UnbalancedStack { remaining }),
        }
    }

    /// Pop one operand for `operator`, failing if the stack is empty
    fn pop(&mut self, operator: u8, offset: usize) -> CompileResult<Fragment> {
        self.frags.pop().ok_or(CompileError::MissingOperand {
            operator: operator as char,
            offset,
        })
    }

    /// Pop two operands for `operator`, returning them in push order
    fn pop2(&mut self, operator: u8, offset: usize) -> CompileResult<(Fragment, Fragment)> {
        if self.frags.len() < 2 {
            return Err(CompileError::MissingOperand {
                operator: operator as char,
                offset,
            });
        }
        let e2 = self.pop(operator, offset)?;
        let e1 = self.pop(operator, offset)?;
        Ok((e1, e2))
    }

    /// A single range state with one dangling transition
    fn compile_literal(&mut self, start: u8, end: u8) {
        let state = self.nfa.range(start, end);
        self.frags.push(Fragment {
            start: state,
            out: vec![Slot::primary(state)],
        });
    }

    fn compile_concat(&mut self, offset: usize) -> CompileResult<()> {
        let (e1, e2) = self.pop2(b'.', offset)?;
        self.nfa.connect(&e1.out, e2.start);
        self.frags.push(Fragment {
            start: e1.start,
            out: e2.out,
        });
        Ok(())
    }

    fn compile_union(&mut self, offset: usize) -> CompileResult<()> {
        let (e1, e2) = self.pop2(b'|', offset)?;
        let split = self.nfa.split(e1.start, Some(e2.start));
        let mut out = e1.out;
        out.extend(e2.out);
        self.frags.push(Fragment { start: split, out });
        Ok(())
    }

    fn compile_star(&mut self, offset: usize) -> CompileResult<()> {
        let e = self.pop(b'*', offset)?;
        let split = self.nfa.split(e.start, None);
        // Loop the body back into the split
        self.nfa.connect(&e.out, split);
        self.frags.push(Fragment {
            start: split,
            out: vec![Slot::secondary(split)],
        });
        Ok(())
    }

    fn compile_plus(&mut self, offset: usize) -> CompileResult<()> {
        let e = self.pop(b'+', offset)?;
        let split = self.nfa.split(e.start, None);
        self.nfa.connect(&e.out, split);
        // Entry is the body, so one repetition is mandatory
        self.frags.push(Fragment {
            start: e.start,
            out: vec![Slot::secondary(split)],
        });
        Ok(())
    }

    fn compile_question(&mut self, offset: usize) -> CompileResult<()> {
        let e = self.pop(b'?', offset)?;
        let split = self.nfa.split(e.start, None);
        let mut out = e.out;
        out.push(Slot::secondary(split));
        self.frags.push(Fragment { start: split, out });
        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the byte escaped by the `\` just before `offset`.
fn escape(regex: &[u8], offset: usize) -> CompileResult<u8> {
    match regex.get(offset) {
        Some(b't') => Ok(b'\t'),
        Some(b'n') => Ok(b'\n'),
        Some(b'r') => Ok(b'\r'),
        Some(&byte) if byte >= 32 => Ok(byte),
        _ => Err(CompileError::InvalidEscape { offset }),
    }
}

/// Parse `[x-y]` starting at the `[` found at `offset`.
fn parse_range(regex: &[u8], offset: usize) -> CompileResult<(u8, u8)> {
    let malformed = CompileError::MalformedRange { offset };
    let (start, end) = match regex.get(offset..offset + 5) {
        Some(&[b'[', start, b'-', end, b']']) => (start, end),
        _ => return Err(malformed),
    };
    if start < 32 || end < 32 {
        return Err(malformed);
    }
    // An inverted range such as [z-a] is accepted and matches no byte.
    Ok((start, end))
}
