pub use ippcode_diagnostics::{Diagnostic, LineIndex, Span, codes};
