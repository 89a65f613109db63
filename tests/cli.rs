use std::{
    env, fs,
    path::PathBuf,
    process::{self, Command, Output},
};

const MINI: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/mini.lex");

/// A file in the temp directory that is removed on drop.
struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str, contents: &[u8]) -> TempFile {
        let path = env::temp_dir().join(format!("nfa-lex-cli-{}-{}", process::id(), name));
        fs::write(&path, contents).unwrap();
        TempFile(path)
    }

    fn path(&self) -> &str {
        self.0.to_str().unwrap()
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn nfa_lex(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nfa-lex"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn tokenize_prints_one_token_per_line() {
    let input = TempFile::new("tokenize.txt", b"x = 42;\n@");
    let output = nfa_lex(&[MINI, input.path()]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\
<Token: ID, Lexeme: \"x\">
<Token: ASSIGN, Lexeme: \"=\">
<Token: NUM, Lexeme: \"42\">
<Token: SEMI, Lexeme: \";\">
<Token: ERROR, Lexeme: \"@\">
"
    );
}

#[test]
fn whole_reports_every_matching_class() {
    let input = TempFile::new("whole-match.txt", b"if");
    let output = nfa_lex(&["--whole", MINI, input.path()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "match: IF, ID\n");
}

#[test]
fn whole_without_match_fails() {
    let input = TempFile::new("whole-nomatch.txt", b"if x");
    let output = nfa_lex(&["--whole", MINI, input.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "no match\n");
}

#[test]
fn dump_lists_starts_and_states() {
    let grammar = TempFile::new("dump.lex", b"AB:ab|\n");
    let output = nfa_lex(&["--dump", grammar.path()]);

    assert!(output.status.success());
    let dump = stdout(&output);
    assert!(dump.contains("start AB: 2"), "{}", dump);
    assert!(dump.contains("SPLIT -> 0, 1"), "{}", dump);
    assert!(dump.contains("MATCH AB"), "{}", dump);
}

#[test]
fn missing_arguments_print_usage() {
    let output = nfa_lex(&[MINI]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage:"));
    assert!(output.stdout.is_empty());
}

#[test]
fn help_succeeds() {
    let output = nfa_lex(&["--help"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("Usage:"));
}

#[test]
fn missing_grammar_file_is_reported() {
    let output = nfa_lex(&["/nonexistent/nfa-lex.lex", MINI]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read grammar file /nonexistent/nfa-lex.lex"));
}

#[test]
fn bad_regex_names_class_and_cause() {
    let grammar = TempFile::new("bad.lex", b"OK:a\nBAD:a|\n");
    let input = TempFile::new("bad.txt", b"a");
    let output = nfa_lex(&[grammar.path(), input.path()]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("failed to compile token class BAD"), "{}", err);
    assert!(err.contains("operator '|' at offset 1 is missing an operand"), "{}", err);
}
