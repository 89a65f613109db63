/*!
Loading lexical grammars.

A grammar is a text file with one token class per line:

```text
NUM:[0-9]+
ID:[a-z]+
WHITE: +
```

Each line is split at its first `:`. Everything before it is the class name,
everything after it (colons included) is the postfix regex, kept as raw bytes.
Lines without a `:`, or with an empty name or regex, are skipped. A trailing
`\r` is dropped so that CRLF files load the same as LF files.
*/

use std::{fs, io, path::Path};

use memchr::{memchr, memchr_iter};
use thompson_nfa_compiler::{Compiler, Error, NFA};

/// One grammar line: a token class and its postfix regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub class: String,
    pub regex: Vec<u8>,
}

impl Rule {
    /// Split one line into a rule, or `None` if it does not hold one.
    pub fn parse(line: &[u8]) -> Option<Rule> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let colon = memchr(b':', line)?;
        let (class, regex) = (&line[..colon], &line[colon + 1..]);
        if class.is_empty() || regex.is_empty() {
            return None;
        }
        Some(Rule {
            class: String::from_utf8_lossy(class).into_owned(),
            regex: regex.to_vec(),
        })
    }
}

/// An ordered list of token class rules.
///
/// Order matters: when two classes match the same longest lexeme, the one
/// declared first wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    /// Parse grammar text, skipping lines that hold no rule.
    pub fn parse(text: &[u8]) -> Grammar {
        let mut rules = Vec::new();
        let mut line_start = 0;
        for line_end in memchr_iter(b'\n', text).chain(Some(text.len())) {
            if let Some(rule) = Rule::parse(&text[line_start..line_end]) {
                rules.push(rule);
            }
            line_start = line_end + 1;
        }
        Grammar { rules }
    }

    /// Read and parse the grammar file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Grammar> {
        Ok(Grammar::parse(&fs::read(path)?))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile every rule, in order, into one combined NFA.
    pub fn compile(&self) -> Result<NFA, Error> {
        Compiler::build_many(
            self.rules
                .iter()
                .map(|rule| (rule.class.as_str(), rule.regex.as_slice())),
        )
    }
}

impl FromIterator<Rule> for Grammar {
    fn from_iter<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        Grammar {
            rules: rules.into_iter().collect(),
        }
    }
}
