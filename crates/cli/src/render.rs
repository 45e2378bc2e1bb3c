//! Diagnostic rendering for the terminal and for pipes.
//!
//! When stderr is a terminal the diagnostic becomes an ariadne [`Report`]
//! with the offending source line underlined. Otherwise a single compact line
//! in the `file:line:col: error[ID]: message` form is written, which is what
//! test harnesses and editors expect.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use ippcode_diagnostics::{Diagnostic, LineIndex};

// ── Entry point ─────────────────────────────────────────────────────────

/// Write one diagnostic to stderr, picking the format from the stream type.
pub(crate) fn render_diagnostic(source: &str, filename: &str, diag: &Diagnostic) {
    if io::stderr().is_terminal() {
        render_pretty(source, filename, diag);
    } else {
        eprintln!("{}", compact_line(source, filename, diag));
    }
}

// ── Compact rendering ───────────────────────────────────────────────────

/// Format a diagnostic as `file:line:col: error[ID]: message`.
///
/// Line and column are 1-based; the column counts bytes. Diagnostics without
/// a span drop the position.
pub(crate) fn compact_line(source: &str, filename: &str, diag: &Diagnostic) -> String {
    match diag.span {
        Some(span) => {
            let (line, col) = LineIndex::new(source).line_col(span.start);
            format!("{filename}:{}:{}: {diag}", line + 1, col + 1)
        }
        None => format!("{filename}: {diag}"),
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

fn render_pretty(source: &str, filename: &str, diag: &Diagnostic) {
    let Some(span) = diag.span else {
        eprintln!("{diag}");
        if let Some(explanation) = diag.explain() {
            eprintln!("  = help: {explanation}");
        }
        return;
    };

    // Spans are byte offsets; clamp in case the source was truncated.
    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);

    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);

    let mut builder = Report::build(ReportKind::Error, (filename, start..end))
        .with_code(diag.id.as_ref())
        .with_message(&diag.message)
        .with_config(config)
        .with_label(
            Label::new((filename, start..end))
                .with_message(label_message(diag))
                .with_color(Color::Red),
        );

    if let Some(explanation) = diag.explain() {
        builder = builder.with_help(explanation);
    }

    let mut cache = (filename, Source::from(source));
    builder.finish().eprint(&mut cache).ok();
}

/// Short label text from the structured context, e.g. `opcode=ADD, found=2`.
fn label_message(diag: &Diagnostic) -> String {
    match &diag.context {
        Some(ctx) if !ctx.is_empty() => ctx
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => diag.message.clone(),
    }
}
