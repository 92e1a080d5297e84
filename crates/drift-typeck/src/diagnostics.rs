//! Ariadne-based diagnostic rendering for type errors.
//!
//! Renders [`TypeError`] values into formatted, labeled error messages.
//! Each diagnostic carries a stable error code, a terse message, a label
//! at the originating source span, and a help line when a plausible next
//! step exists. [`DiagnosticOptions::json_mode`] instead emits a
//! single-line JSON object for machine consumers.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde::Serialize;

use crate::error::{CheckOrigin, TypeError};
use crate::ty::Ty;

/// Rendering options for diagnostics.
#[derive(Clone, Debug)]
pub struct DiagnosticOptions {
    /// Use ANSI colors in the ariadne output.
    pub color: bool,
    /// Emit a single-line JSON object instead of ariadne output.
    pub json: bool,
}

impl DiagnosticOptions {
    /// Colorless options for deterministic test output.
    pub fn colorless() -> Self {
        DiagnosticOptions {
            color: false,
            json: false,
        }
    }

    /// Single-line JSON output mode.
    pub fn json_mode() -> Self {
        DiagnosticOptions {
            color: false,
            json: true,
        }
    }
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        DiagnosticOptions {
            color: true,
            json: false,
        }
    }
}

// ── Error Codes ────────────────────────────────────────────────────────

/// Assign a stable code to each TypeError variant.
pub fn error_code(err: &TypeError) -> &'static str {
    match err {
        TypeError::NotAMember { .. } => "E0001",
        TypeError::Mismatch { .. } => "E0002",
        TypeError::MalformedAnnotation { .. } => "E0003",
        TypeError::EmptyUnion => "E0004",
        TypeError::UnknownTypeName { .. } => "E0005",
        TypeError::UnboundVariable { .. } => "E0006",
        TypeError::UnsupportedUnionUsage { .. } => "E0007",
    }
}

// ── Span Helpers ───────────────────────────────────────────────────────

fn text_range_to_range(range: rowan::TextRange) -> Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    start..end
}

fn origin_span(origin: &CheckOrigin) -> Option<Range<usize>> {
    origin.span().map(text_range_to_range)
}

/// The primary span of an error, if it has one.
fn error_span(err: &TypeError) -> Option<Range<usize>> {
    match err {
        TypeError::MalformedAnnotation { span, .. }
        | TypeError::UnknownTypeName { span, .. }
        | TypeError::UnboundVariable { span, .. }
        | TypeError::UnsupportedUnionUsage { span, .. } => Some(text_range_to_range(*span)),
        TypeError::NotAMember { origin, .. } | TypeError::Mismatch { origin, .. } => {
            origin_span(origin)
        }
        TypeError::EmptyUnion => None,
    }
}

/// List a union-like declared type's members for help text.
fn admitted_members(declared: &Ty) -> String {
    match declared {
        Ty::Union(members) => {
            let parts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
            parts.join(", ")
        }
        Ty::Optional(inner) => format!("{}, NoneType", inner),
        other => other.to_string(),
    }
}

// ── JSON Mode ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonSpan {
    start: usize,
    end: usize,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: &'a str,
    severity: &'a str,
    message: String,
    spans: Vec<JsonSpan>,
}

fn render_json(error: &TypeError) -> String {
    let spans = error_span(error)
        .into_iter()
        .map(|r| JsonSpan {
            start: r.start,
            end: r.end,
        })
        .collect();
    let diag = JsonDiagnostic {
        code: error_code(error),
        severity: "error",
        message: error.to_string(),
        spans,
    };
    serde_json::to_string(&diag).expect("diagnostic serialization should not fail")
}

// ── Main Rendering Function ────────────────────────────────────────────

/// Render a type error into a formatted diagnostic string.
pub fn render_diagnostic(
    error: &TypeError,
    source: &str,
    _filename: &str,
    opts: &DiagnosticOptions,
) -> String {
    if opts.json {
        return render_json(error);
    }

    let config = Config::default().with_color(opts.color);
    let source_len = source.len();

    // Clamp a range to be valid and non-empty within source bounds.
    let clamp = |r: Range<usize>| -> Range<usize> {
        let s = r.start.min(source_len);
        let e = r.end.min(source_len).max(s);
        if s == e {
            s..e.saturating_add(1).min(source_len)
        } else {
            s..e
        }
    };

    let code = error_code(error);
    let whole_source = clamp(0..source_len.max(1).min(source_len));

    let report = match error {
        TypeError::NotAMember {
            declared, found, origin,
        } => {
            let msg = format!(
                "Expected a member of {} but instead found type {}",
                declared.annotation_str(),
                found.annotation_str()
            );
            let span = clamp(origin_span(origin).unwrap_or(whole_source.clone()));

            Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(&msg)
                .with_config(config)
                .with_label(
                    Label::new(span)
                        .with_message(format!("found {}", found.annotation_str()))
                        .with_color(Color::Red),
                )
                .with_help(format!(
                    "the declared type admits: {}",
                    admitted_members(declared)
                ))
                .finish()
        }

        TypeError::Mismatch {
            expected, found, origin,
        } => {
            let msg = format!(
                "Could not match type {} to {}",
                found.annotation_str(),
                expected.annotation_str()
            );
            let span = clamp(origin_span(origin).unwrap_or(whole_source.clone()));

            Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(&msg)
                .with_config(config)
                .with_label(
                    Label::new(span)
                        .with_message(format!(
                            "expected {}, found {}",
                            expected.annotation_str(),
                            found.annotation_str()
                        ))
                        .with_color(Color::Red),
                )
                .finish()
        }

        TypeError::MalformedAnnotation {
            ctor,
            expected,
            found,
            span,
        } => {
            let msg = format!(
                "`{}` expects {} type argument(s), found {}",
                ctor, expected, found
            );
            let range = clamp(text_range_to_range(*span));

            Report::build(ReportKind::Error, range.clone())
                .with_code(code)
                .with_message(&msg)
                .with_config(config)
                .with_label(
                    Label::new(range)
                        .with_message("malformed annotation")
                        .with_color(Color::Red),
                )
                .finish()
        }

        TypeError::EmptyUnion => {
            let msg = "cannot create a union with no members";

            Report::build(ReportKind::Error, whole_source.clone())
                .with_code(code)
                .with_message(msg)
                .with_config(config)
                .with_label(
                    Label::new(whole_source.clone())
                        .with_message("union constructed here")
                        .with_color(Color::Red),
                )
                .finish()
        }

        TypeError::UnknownTypeName { name, span } => {
            let msg = format!("unknown type name `{}`", name);
            let range = clamp(text_range_to_range(*span));

            Report::build(ReportKind::Error, range.clone())
                .with_code(code)
                .with_message(&msg)
                .with_config(config)
                .with_label(
                    Label::new(range)
                        .with_message("not a known type in this scope")
                        .with_color(Color::Red),
                )
                .finish()
        }

        TypeError::UnboundVariable { name, span } => {
            let msg = format!("unbound variable `{}`", name);
            let range = clamp(text_range_to_range(*span));

            Report::build(ReportKind::Error, range.clone())
                .with_code(code)
                .with_message(&msg)
                .with_config(config)
                .with_label(
                    Label::new(range)
                        .with_message("not declared in any enclosing scope")
                        .with_color(Color::Red),
                )
                .finish()
        }

        TypeError::UnsupportedUnionUsage { key, span } => {
            let msg = format!(
                "invalid Dict key type {}: only int, float, complex, Tensor and string keys are supported",
                key.annotation_str()
            );
            let range = clamp(text_range_to_range(*span));

            Report::build(ReportKind::Error, range.clone())
                .with_code(code)
                .with_message(&msg)
                .with_config(config)
                .with_label(
                    Label::new(range)
                        .with_message("union-typed key")
                        .with_color(Color::Red),
                )
                .with_help("use a single supported key type, or make the union the Dict value")
                .finish()
        }
    };

    let mut buf = Vec::new();
    let cache = Source::from(source);
    report
        .write(cache, &mut buf)
        .expect("failed to write diagnostic");
    String::from_utf8(buf).expect("diagnostic output should be valid UTF-8")
}
