use std::{env, fs, process};

use nfa_lex::{CompileError, Error, Grammar, Rule};

fn rule(class: &str, regex: &[u8]) -> Rule {
    Rule {
        class: class.to_string(),
        regex: regex.to_vec(),
    }
}

#[test]
fn parse_keeps_declaration_order() {
    let grammar = Grammar::parse(b"NUM:[0-9]+\nID:[a-z]+\nWHITE: +\n");

    assert_eq!(
        grammar.rules(),
        &[
            rule("NUM", b"[0-9]+"),
            rule("ID", b"[a-z]+"),
            rule("WHITE", b" +"),
        ]
    );
}

#[test]
fn parse_skips_lines_without_a_rule() {
    let grammar = Grammar::parse(b"\nno colon here\n:abc\nEMPTY:\nA:a\n\n");

    assert_eq!(grammar.len(), 1);
    assert_eq!(grammar.rules(), &[rule("A", b"a")]);
}

#[test]
fn parse_without_trailing_newline() {
    let grammar = Grammar::parse(b"A:a\nB:b");
    assert_eq!(grammar.rules(), &[rule("A", b"a"), rule("B", b"b")]);
    assert!(Grammar::parse(b"").is_empty());
}

#[test]
fn parse_strips_carriage_returns() {
    let lf = Grammar::parse(b"A:ab.\nB:b+\n");
    let crlf = Grammar::parse(b"A:ab.\r\nB:b+\r\n");
    assert_eq!(lf, crlf);
}

#[test]
fn regex_may_contain_colons_and_high_bytes() {
    let grammar = Grammar::parse(b"COLON::\nPAIR:a:.\nLATIN:\xe9+\n");

    assert_eq!(
        grammar.rules(),
        &[
            rule("COLON", b":"),
            rule("PAIR", b"a:."),
            rule("LATIN", b"\xe9+"),
        ]
    );

    let nfa = grammar.compile().unwrap();
    assert_eq!(nfa.class_len(), 3);
    assert_eq!(nfa.class_id("PAIR"), Some(1));
}

#[test]
fn from_iter_and_compile() {
    let grammar: Grammar = vec![rule("A", b"a"), rule("B", b"b*")]
        .into_iter()
        .collect();
    let nfa = grammar.compile().unwrap();

    assert_eq!(nfa.starts().len(), 2);
    assert_eq!(nfa.class_name(0), "A");
    assert_eq!(nfa.class_name(1), "B");
}

#[test]
fn compile_error_names_the_class() {
    let grammar = Grammar::parse(b"GOOD:ab.\nBAD:ab\nLATER:+\n");
    let err = grammar.compile().unwrap_err();

    assert_eq!(
        err,
        Error::Compile {
            class: "BAD".to_string(),
            source: CompileError::UnbalancedStack { remaining: 2 },
        }
    );
    assert_eq!(err.to_string(), "failed to compile token class BAD");
}

#[test]
fn from_path_reads_a_file() {
    let path = env::temp_dir().join(format!("nfa-lex-grammar-{}.lex", process::id()));
    fs::write(&path, b"NUM:[0-9]+\r\nID:[a-z]+\r\n").unwrap();
    let grammar = Grammar::from_path(&path);
    fs::remove_file(&path).unwrap();

    let grammar = grammar.unwrap();
    assert_eq!(grammar.rules(), &[rule("NUM", b"[0-9]+"), rule("ID", b"[a-z]+")]);
}

#[test]
fn from_path_missing_file() {
    let path = env::temp_dir().join("nfa-lex-grammar-does-not-exist.lex");
    assert!(Grammar::from_path(path).is_err());
}

#[test]
fn testdata_grammar_compiles() {
    let grammar = Grammar::parse(include_bytes!("../testdata/mini.lex"));
    let nfa = grammar.compile().unwrap();

    assert_eq!(grammar.len(), 14);
    assert_eq!(nfa.class_len(), 14);
    assert_eq!(nfa.class_id("IF"), Some(0));
    assert_eq!(nfa.class_id("NEWLINE"), Some(13));
}
