//! Compiler diagnostics.
//!
//! A deliberately small surface: passes push [`Diagnostic`]s into a
//! [`DiagnosticQueue`] and the driver decides how to render them. Only
//! user-visible conditions go through here; internal invariant
//! violations abort directly with a message identifying the offender.

use crate::span::Span;

/// How serious a diagnostic is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
    Warning,
    Error,
}

/// A single user-visible diagnostic.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

/// Ordered collection of diagnostics emitted by a pass.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diags: Vec<Diagnostic>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        DiagnosticQueue { diags: Vec::new() }
    }

    pub fn warn(&mut self, span: Span, message: impl Into<String>) {
        self.diags.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            span,
        });
    }

    pub fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diags.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            span,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diags
    }

    pub fn warning_count(&self) -> usize {
        self.diags
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diags.is_empty()
    }
}
