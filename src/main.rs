use std::{
    fs,
    io::{self, BufWriter, Write},
    process,
};

use anyhow::Context;
use nfa_lex::{Grammar, Matcher, Scanner, NFA};

fn print_usage() {
    eprintln!(
        "\
Usage: nfa-lex [OPTIONS] <grammar-file> <input-file>
       nfa-lex --dump <grammar-file>

Tokenizes <input-file> with the token classes in <grammar-file>, printing one
token per line. Each grammar line has the form NAME:postfix-regex.

Options:
  --whole   Check whether the whole input matches a token class instead
  --dump    Print the states of the compiled NFA
  -h, --help  Print this help message"
    );
}

enum Command {
    Tokenize { grammar: String, input: String },
    Whole { grammar: String, input: String },
    Dump { grammar: String },
}

fn parse_args() -> Command {
    let mut whole = false;
    let mut dump = false;
    let mut positional = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "--whole" => whole = true,
            "--dump" => dump = true,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(grammar), None, None) if dump => Command::Dump { grammar },
        (Some(grammar), Some(input), None) if !dump && whole => {
            Command::Whole { grammar, input }
        }
        (Some(grammar), Some(input), None) if !dump => {
            Command::Tokenize { grammar, input }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn load_nfa(path: &str) -> anyhow::Result<NFA> {
    let grammar = Grammar::from_path(path)
        .with_context(|| format!("failed to read grammar file {}", path))?;
    grammar
        .compile()
        .with_context(|| format!("invalid grammar in {}", path))
}

fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read input file {}", path))
}

/// Runs `command`, returning false if a whole-input check did not match.
fn run(command: Command) -> anyhow::Result<bool> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match command {
        Command::Tokenize { grammar, input } => {
            let nfa = load_nfa(&grammar)?;
            let haystack = read_input(&input)?;
            for token in Scanner::new(&nfa).tokenize(&haystack)? {
                writeln!(out, "{}", token)?;
            }
        }
        Command::Whole { grammar, input } => {
            let nfa = load_nfa(&grammar)?;
            let haystack = read_input(&input)?;
            let result = Matcher::new(&nfa).matches_whole(&haystack)?;
            if !result.matched {
                writeln!(out, "no match")?;
                out.flush()?;
                return Ok(false);
            }
            writeln!(out, "match: {}", result.classes.join(", "))?;
        }
        Command::Dump { grammar } => {
            let nfa = load_nfa(&grammar)?;
            write!(out, "{}", nfa)?;
        }
    }
    out.flush()?;
    Ok(true)
}

fn main() {
    env_logger::init();

    match run(parse_args()) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            process::exit(1);
        }
    }
}
