//! CLI tests for `ippcode-parse`: stdin to XML, exit codes, and diagnostics.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use assert_cmd::cargo;

fn parse_cmd() -> Command {
    Command::new(cargo::cargo_bin!("ippcode-parse"))
}

fn run_with_stdin(args: &[&str], stdin_body: &[u8]) -> Output {
    let mut child = parse_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn ippcode-parse");

    {
        let stdin = child.stdin.as_mut().expect("stdin handle");
        stdin.write_all(stdin_body).expect("write stdin body");
    }

    child.wait_with_output().expect("wait for output")
}

/// Run with arguments only. Stdin is closed so early exits cannot race a writer.
fn run_args(args: &[&str]) -> Output {
    parse_cmd()
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("run ippcode-parse")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_failure(output: &Output, code: i32) {
    assert_eq!(output.status.code(), Some(code), "stderr={}", stderr(output));
    assert!(
        output.stdout.is_empty(),
        "no XML expected on failure, got {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

// ── Success ─────────────────────────────────────────────────────────────

#[test]
fn defvar_program_is_written_as_xml() {
    let output = run_with_stdin(&[], b".IPPcode22\nDEFVAR GF@x\n");
    assert_eq!(output.status.code(), Some(0), "stderr={}", stderr(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <program language=\"IPPcode22\">\n  \
         <instruction order=\"1\" opcode=\"DEFVAR\">\n    \
         <arg1 type=\"var\">GF@x</arg1>\n  \
         </instruction>\n\
         </program>\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let output = run_with_stdin(
        &[],
        b"# program\n.IPPcode22\n\nWRITE string@hi\\032there # greet\n",
    );
    assert_eq!(output.status.code(), Some(0), "stderr={}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<arg1 type=\"string\">hi\\032there</arg1>"), "{stdout}");
    assert!(!stdout.contains("order=\"2\""), "{stdout}");
}

#[test]
fn output_is_byte_identical_across_runs() {
    let src = b".IPPcode22\nDEFVAR LF@a\nJUMPIFNEQ end LF@a bool@true\nLABEL end\n";
    let first = run_with_stdin(&[], src);
    let second = run_with_stdin(&[], src);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

// ── Parse failures ──────────────────────────────────────────────────────

#[test]
fn missing_header_exits_21() {
    let output = run_with_stdin(&[], b"DEFVAR GF@x\n");
    assert_failure(&output, 21);
    let err = stderr(&output);
    assert!(err.starts_with("<stdin>:1:1: error[IPP2101]:"), "{err}");
}

#[test]
fn empty_input_exits_21() {
    let output = run_with_stdin(&[], b"");
    assert_failure(&output, 21);
}

#[test]
fn unknown_instruction_exits_22() {
    let output = run_with_stdin(&[], b".IPPcode22\nFOOBAR\n");
    assert_failure(&output, 22);
    assert_eq!(
        stderr(&output).trim_end(),
        "<stdin>:2:1: error[IPP2201]: unknown instruction 'FOOBAR'"
    );
}

#[test]
fn wrong_operand_count_exits_23() {
    let output = run_with_stdin(&[], b".IPPcode22\nADD GF@x GF@y\n");
    assert_failure(&output, 23);
    let err = stderr(&output);
    assert!(err.contains("error[IPP2301]"), "{err}");
    assert!(err.contains("ADD expects 3 operands, found 2"), "{err}");
}

#[test]
fn invalid_operand_exits_23() {
    let output = run_with_stdin(&[], b".IPPcode22\nMOVE GF@x int@x\n");
    assert_failure(&output, 23);
    let err = stderr(&output);
    assert!(err.starts_with("<stdin>:2:11: error[IPP2302]:"), "{err}");
    assert!(err.contains("int@x"), "{err}");
}

#[test]
fn invalid_escape_exits_23() {
    let output = run_with_stdin(&[], b".IPPcode22\nWRITE string@ab\\1x\n");
    assert_failure(&output, 23);
    let err = stderr(&output);
    assert!(err.starts_with("<stdin>:2:16: error[IPP2303]:"), "{err}");
}

#[test]
fn invalid_utf8_exits_99() {
    let output = run_with_stdin(&[], b".IPPcode22\nWRITE string@\xff\n");
    assert_failure(&output, 99);
    assert!(stderr(&output).contains("error[IPP9901]"));
}

// ── Command line ────────────────────────────────────────────────────────

#[test]
fn help_prints_usage_and_exits_0() {
    for flag in ["--help", "-h"] {
        let output = run_args(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{flag}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage"), "{flag}: {stdout}");
        assert!(!stdout.contains("<?xml"), "{flag}: {stdout}");
    }
}

#[test]
fn unknown_flag_exits_99() {
    for flag in ["--verbose", "-x", "--version"] {
        let output = run_args(&[flag]);
        assert_failure(&output, 99);
        assert!(!output.stderr.is_empty(), "{flag}");
    }
}

#[test]
fn positional_argument_exits_99() {
    let output = run_args(&["program.src"]);
    assert_failure(&output, 99);
}
