mod render;

use std::io::{self, Read, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use ippcode_core::{EmitConfig, ParseError, emit_xml, parse_str};

use crate::render::render_diagnostic;

/// Name used for the input in diagnostics.
const SOURCE_NAME: &str = "<stdin>";

/// Exit code for bad invocations and internal failures.
const EXIT_USAGE: i32 = 99;

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ippcode-parse",
    about = "Parse IPPcode22 source from stdin and write its XML representation to stdout",
    long_about = "Parse IPPcode22 source from stdin and write its XML representation to stdout.\n\n\
                  Exit codes:\n  \
                  0   success\n  \
                  21  missing or malformed .IPPcode22 header\n  \
                  22  unknown instruction\n  \
                  23  wrong operand count, invalid operand or invalid string escape\n  \
                  99  bad invocation or unreadable input"
)]
struct Cli {}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_USAGE
        }
    };
    process::exit(code);
}

/// Run the parser and return the process exit code.
fn run() -> Result<i32> {
    if let Err(err) = Cli::try_parse() {
        return Ok(match err.kind() {
            ErrorKind::DisplayHelp => {
                err.print().context("failed to print help")?;
                0
            }
            _ => {
                // Usage problems go to stderr; nothing is read from stdin.
                let _ = err.print();
                EXIT_USAGE
            }
        });
    }

    let mut source = String::new();
    if let Err(e) = io::stdin().lock().read_to_string(&mut source) {
        let err = ParseError::Io(e);
        render_diagnostic("", SOURCE_NAME, &err.to_diagnostic());
        return Ok(err.exit_code());
    }

    match parse_str(&source) {
        Ok(program) => {
            let xml = emit_xml(&program, &EmitConfig::default());
            let mut out = io::stdout().lock();
            out.write_all(xml.as_bytes())
                .and_then(|()| out.flush())
                .context("failed to write XML to stdout")?;
            Ok(0)
        }
        Err(err) => {
            render_diagnostic(&source, SOURCE_NAME, &err.to_diagnostic());
            Ok(err.exit_code())
        }
    }
}
