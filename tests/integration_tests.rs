//! Integration tests for the end-to-end front end.
//!
//! These tests run source text through tokenization and parsing using only
//! the public API, then drive the `erupt` binary to check what it prints and
//! the exit status it reports for each phase.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use erupt::{
    ast::{
        ast::{NodeList, NodeType},
        dump::dump_node_list,
    },
    config::Config,
    errors::errors::{Diagnostics, Severity},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

const PROGRAM: &str = "\
%% geometry helpers
use io
include math

struct Point {
  x = 0, y = 0
  mut label
}

module geometry {
  square n => n * n

  dist a b => {
    dx = a - b
    return dx ** 2
  }
}

main => {
  mut total = square(3) + dist(4, 1)
  unless total > 10 {
    print(\"small\")
  } else if total == 10 {
    print('ten')
  } else {
    print([total, -total])
  }

  match total {
    0 => print(\"zero\")
    n => { total += n }
  }
}
";

fn front_end(source: &str) -> (NodeList, Diagnostics, Diagnostics) {
    let config = Config::new("program.er");
    let (tokens, lex_diagnostics) = tokenize(source, &config);
    let (nodes, parse_diagnostics) = parse(tokens, &config);

    (nodes, lex_diagnostics, parse_diagnostics)
}

fn run_binary(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_erupt"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start erupt");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write source");

    child.wait_with_output().expect("failed to wait for erupt")
}

#[test]
fn test_parse_full_program() {
    let (nodes, lex_diagnostics, parse_diagnostics) = front_end(PROGRAM);

    assert!(lex_diagnostics.is_empty());
    assert!(
        parse_diagnostics.is_empty(),
        "{:?}",
        parse_diagnostics.into_vec()
    );

    let types: Vec<NodeType> = nodes.iter().map(|node| node.get_node_type()).collect();
    assert_eq!(
        types,
        vec![
            NodeType::Import,
            NodeType::Import,
            NodeType::StructDecl,
            NodeType::Module,
            NodeType::FnDef,
        ]
    );
}

#[test]
fn test_dump_full_program() {
    let (nodes, _, _) = front_end(PROGRAM);
    let dump = dump_node_list(&nodes);

    assert!(dump.starts_with("use: io\ninclude: math\nstruct: Point\n"));
    assert!(dump.contains("    function:\n      proto: square\n"));
    assert!(dump.contains("binary: **"));
    assert!(dump.contains("unary: !"));
    assert!(dump.contains("string: \"ten\""));
    assert!(dump.contains("binary: +="));
    assert_eq!(dump.lines().filter(|line| line.trim() == "arm:").count(), 2);
}

#[test]
fn test_lexer_failure_is_reported_before_parsing() {
    let (_, lex_diagnostics, _) = front_end("x = \"never closed\ny = 2");

    assert!(lex_diagnostics.failed());
    assert!(lex_diagnostics.is_fatal());
    assert_eq!(lex_diagnostics.len(), 1);
}

#[test]
fn test_one_run_reports_every_problem() {
    let source = "x = $\n)\nz = 3\ny = (1";
    let (nodes, lex_diagnostics, parse_diagnostics) = front_end(source);

    assert_eq!(lex_diagnostics.error_count(), 1);
    assert!(!lex_diagnostics.is_fatal());
    assert_eq!(parse_diagnostics.error_count(), 3);
    assert_eq!(nodes.to_string(), "(let z 3)");
}

#[test]
fn test_warnings_do_not_fail() {
    let (_, _, parse_diagnostics) = front_end("f => {\n  return\n  g()\n}");

    assert!(!parse_diagnostics.failed());
    assert_eq!(
        parse_diagnostics
            .iter()
            .map(|error| error.get_severity())
            .collect::<Vec<_>>(),
        vec![Severity::Warning]
    );
}

#[test]
fn test_binary_success() {
    let output = run_binary(&["-"], PROGRAM);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_dumps_tokens_and_ast() {
    let output = run_binary(&["--tokens", "--ast", "-"], "x = 1\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("(      identifier): x\n"));
    assert!(stdout.contains("(             eof): \n"));
    assert!(stdout.ends_with("variable: x (immutable)\n  int: 1\n"));
}

#[test]
fn test_binary_lexer_failure() {
    let output = run_binary(&["-"], "x = \"abc");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("stdin:1: fatal error: unexpected EOF while scanning string"));
}

#[test]
fn test_binary_parser_failure() {
    let output = run_binary(&["-A", "-"], ")\nx = 1\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr.contains("stdin:1: error: unexpected ')'"));
    assert!(stdout.contains("variable: x (immutable)"));
}

#[test]
fn test_binary_missing_file() {
    let output = run_binary(&["does/not/exist.er"], "");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_requires_input() {
    let output = run_binary(&[], "");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_survives_deep_nesting() {
    let source = format!("x = {}1\n", "-".repeat(300_000));
    let output = run_binary(&["-A", "-"], &source);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr.contains("stdin:1: error: nesting exceeds the limit of 128 levels"));
}

#[test]
fn test_binary_dumps_long_operator_chain() {
    let source = format!("x = 0{}\n", " + 1".repeat(100_000));
    let output = run_binary(&["-A", "-"], &source);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.starts_with("variable: x (immutable)\n  binary: +\n    binary: +\n"));
}
