//! Thompson NFA Compiler for postfix regexes, with a maximal-munch scanner
//!
//! This library compiles a set of named regexes, one per token class, into a
//! single Thompson NFA and tokenizes input by simulating every class in
//! parallel. Regexes are given in postfix notation:
//!
//! - `.` concatenation, `|` union, `*` zero or more, `+` one or more,
//!   `?` zero or one
//! - any byte from 32 to 255 is a literal
//! - `\t`, `\n`, `\r` and `\X` (X any byte from 32 to 255) are escaped
//!   literals
//! - `[x-y]` is the inclusive byte range from `x` to `y`
//!
//! The NFA is never turned into a DFA. Simulation tracks the set of active
//! states directly, using per-state generation marks so that epsilon
//! closures over looping split states stay linear.
//!
//! ```
//! use thompson_nfa_compiler::{Compiler, Matcher};
//!
//! let nfa = Compiler::build_many([("NUM", "[0-9]+"), ("ID", "[a-z][a-z][0-9]|*.")]).unwrap();
//!
//! let mut matcher = Matcher::new(&nfa);
//! let result = matcher.matches_whole(b"x42").unwrap();
//! assert!(result.matched);
//! assert_eq!(result.classes, ["ID"]);
//! ```

#[macro_use]
mod macros;

pub mod compiler;
pub mod config;
pub mod matcher;
pub mod nfa;
pub mod scanner;

pub use compiler::Compiler;
pub use config::Config;
pub use matcher::{MatchResult, Matcher, StateSet};
pub use nfa::{Branch, ClassId, Fragment, Slot, State, StateId, NFA};
pub use scanner::{Scanner, Token, ERROR_CLASS};

use std::fmt;

/// The result of compiling one postfix regex
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while compiling a single postfix regex.
///
/// Offsets are byte offsets into the regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An operator found fewer operands on the stack than it needs
    MissingOperand { operator: char, offset: usize },
    /// The regex did not reduce to exactly one fragment
    UnbalancedStack { remaining: usize },
    /// A control byte appeared outside an escape
    InvalidSymbol { symbol: u8, offset: usize },
    /// A `\` at the end of the regex or before a control byte
    InvalidEscape { offset: usize },
    /// A `[` not followed by `x-y]`
    MalformedRange { offset: usize },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MissingOperand { operator, offset } => write!(
                f,
                "operator '{}' at offset {} is missing an operand",
                operator, offset
            ),
            CompileError::UnbalancedStack { remaining } => write!(
                f,
                "regex left {} fragments on the stack, expected exactly 1",
                remaining
            ),
            CompileError::InvalidSymbol { symbol, offset } => {
                write!(f, "invalid symbol {:#04x} at offset {}", symbol, offset)
            }
            CompileError::InvalidEscape { offset } => {
                write!(f, "invalid escape at offset {}", offset)
            }
            CompileError::MalformedRange { offset } => write!(
                f,
                "character range at offset {} must have the form [x-y]",
                offset
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors that abort building or running an automaton.
///
/// Both kinds point at a broken grammar or configuration rather than at bad
/// input; unrecognized input is reported as [`ERROR_CLASS`] tokens instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The regex for a token class failed to compile
    Compile { class: String, source: CompileError },
    /// More states were active at once than the configured limit allows
    StateLimitExceeded { limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Compile { class, .. } => {
                write!(f, "failed to compile token class {}", class)
            }
            Error::StateLimitExceeded { limit } => write!(
                f,
                "more than {} NFA states were active at once",
                limit
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Compile { source, .. } => Some(source),
            Error::StateLimitExceeded { .. } => None,
        }
    }
}
