/*!
A maximal-munch lexer built on a Thompson NFA.

Token classes are declared in a grammar, one `NAME:regex` per line, where each
regex is written in postfix notation. All classes are compiled into one
combined NFA by [`thompson_nfa_compiler`], and input is tokenized by running
every class in parallel and keeping the longest match at each position.

# Example

```
use nfa_lex::{Grammar, Scanner};

let grammar = Grammar::parse(b"NUM:[0-9]+\nID:[a-z]+\nWHITE: +\n");
let nfa = grammar.compile().unwrap();

let mut scanner = Scanner::new(&nfa);
for token in scanner.tokenize(b"abc 123").unwrap() {
    println!("{}", token);
}
```

# Postfix syntax

* `.` concatenation, `|` union, `*` zero or more, `+` one or more, `?` zero
  or one.
* Any byte from 32 to 255 that is not an operator, `\` or `[` is a literal.
* `\t`, `\n` and `\r` are tab, newline and carriage return; `\X` makes any
  other byte `X` from 32 to 255 a literal, operators included.
* `[x-y]` matches one byte in the inclusive range from `x` to `y`.

# Crate features

* **logging** (enabled by default) - Emits compile and scan events through
the `log` crate. The `nfa-lex` binary shows them when `RUST_LOG` is set.
*/

pub mod grammar;

pub use crate::grammar::{Grammar, Rule};

pub use thompson_nfa_compiler::{
    CompileError, Compiler, Config, Error, MatchResult, Matcher, Scanner, Token,
    ERROR_CLASS, NFA,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
