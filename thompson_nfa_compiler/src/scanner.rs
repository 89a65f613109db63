use std::{fmt, ops::Range};

use crate::{
    config::Config,
    matcher::{Matcher, StateSet},
    nfa::{ClassId, NFA},
    Error,
};

/// The class name given to bytes no token class recognizes.
pub const ERROR_CLASS: &str = "ERROR";

/// A token produced by the [`Scanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'h> {
    /// The token class, or [`ERROR_CLASS`] for an unrecognized byte
    pub class: &'h str,
    /// The byte range in the haystack this token covers
    pub span: Range<usize>,
    pub lexeme: &'h [u8],
}

impl<'h> Token<'h> {
    pub fn is_error(&self) -> bool {
        self.class == ERROR_CLASS
    }
}

impl<'h> fmt::Display for Token<'h> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Token: {}, Lexeme: \"{}\">",
            self.class,
            String::from_utf8_lossy(self.lexeme)
        )
    }
}

/// A maximal-munch tokenizer over a combined NFA.
///
/// At every position the scanner runs all token classes in parallel and keeps
/// the longest prefix that any of them accepts. Ties at the same length go to
/// the class declared first. Classes configured as discarded (by default
/// `WHITE` and `NEWLINE`) are consumed without producing a token, and a byte
/// that starts no token becomes a one-byte [`ERROR_CLASS`] token.
///
/// ```
/// use thompson_nfa_compiler::{Compiler, Scanner};
///
/// let nfa = Compiler::build_many([
///     ("NUM", "[0-9]+"),
///     ("ID", "[a-z]+"),
///     ("WHITE", " +"),
/// ]).unwrap();
///
/// let mut scanner = Scanner::new(&nfa);
/// let tokens = scanner.tokenize(b"abc 123").unwrap();
/// let classes: Vec<&str> = tokens.iter().map(|t| t.class).collect();
/// assert_eq!(classes, ["ID", "NUM"]);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'n> {
    matcher: Matcher<'n>,
    /// Per class: whether its tokens are dropped
    discard: Vec<bool>,
}

impl<'n> Scanner<'n> {
    pub fn new(nfa: &'n NFA) -> Self {
        Self::with_config(nfa, Config::default())
    }

    pub fn with_config(nfa: &'n NFA, config: Config) -> Self {
        let discard = (0..nfa.class_len())
            .map(|class| config.is_discarded(nfa.class_name(class)))
            .collect();
        Scanner {
            matcher: Matcher::with_config(nfa, config),
            discard,
        }
    }

    /// Split `haystack` into tokens.
    ///
    /// Every call starts from a fresh scan position, so scanning the same
    /// haystack twice yields the same tokens. The only error is a state set
    /// outgrowing the configured limit.
    pub fn tokenize<'h>(&mut self, haystack: &'h [u8]) -> Result<Vec<Token<'h>>, Error>
    where
        'n: 'h,
    {
        let nfa = self.matcher.nfa();
        let mut initial = self.matcher.state_set();
        let mut current = self.matcher.state_set();
        let mut next = self.matcher.state_set();
        self.matcher.start_set(&mut initial)?;

        let mut tokens = Vec::new();
        let mut start = 0;
        while start < haystack.len() {
            let found = self.longest_match(haystack, start, &initial, &mut current, &mut next)?;
            let (class, end) = match found {
                Some(found) => found,
                None => {
                    debug!("lexical error at offset {}: byte {:#04x}", start, haystack[start]);
                    tokens.push(Token {
                        class: ERROR_CLASS,
                        span: start..start + 1,
                        lexeme: &haystack[start..start + 1],
                    });
                    start += 1;
                    continue;
                }
            };

            if self.discard[class] {
                trace!("discarding {} at {}..{}", nfa.class_name(class), start, end);
            } else {
                let token = Token {
                    class: nfa.class_name(class),
                    span: start..end,
                    lexeme: &haystack[start..end],
                };
                trace!("emitting {}", token);
                tokens.push(token);
            }
            start = end;
        }
        Ok(tokens)
    }

    /// Run every class from `start` until no state survives, returning the
    /// class and end offset of the longest non-empty match.
    fn longest_match(
        &mut self,
        haystack: &[u8],
        start: usize,
        initial: &StateSet,
        current: &mut StateSet,
        next: &mut StateSet,
    ) -> Result<Option<(ClassId, usize)>, Error> {
        current.copy_from(initial);

        let mut best = None;
        for (forward, &byte) in haystack.iter().enumerate().skip(start) {
            self.matcher.step(current, byte, next)?;
            if next.is_empty() {
                break;
            }
            if let Some(class) = self.matcher.best_match(next) {
                best = Some((class, forward + 1));
            }
            std::mem::swap(current, next);
        }
        Ok(best)
    }
}
