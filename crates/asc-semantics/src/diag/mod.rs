// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Diagnostics channel.
//!
//! Problems in the program being compiled are reported here and counted;
//! they never abort the pass. A host installs a [`CompilerHandler`] to
//! receive them. Without a handler, diagnostics are printed to stderr in the
//! fixed fallback format produced by [`render_fallback`].

mod input;
mod messages;

#[cfg(test)]
mod input_test;

use std::cell::RefCell;
use std::rc::Rc;

pub use input::{InputBuffer, SourceFrame};
pub use messages::{ErrorCode, format_message, substitute};

use crate::config::CompilerConfig;

/// Severity of a diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
    /// Counted; the host will not emit output.
    Error,
    /// Not counted.
    Warning,
}

/// A reported problem with its source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// File the problem was found in.
    pub origin: String,
    /// 1-based line, if source text was available.
    pub line: Option<usize>,
    /// 1-based column, if source text was available.
    pub column: Option<usize>,
    /// Formatted message.
    pub message: String,
    /// Text of the offending line (empty without source text).
    pub source_line: String,
    /// Diagnostic code, if the message came from a template.
    pub code: Option<ErrorCode>,
}

/// Receiver of diagnostics installed by the host compiler.
pub trait CompilerHandler {
    /// Called for every error.
    fn error(&mut self, diagnostic: &Diagnostic);

    /// Called for every warning.
    fn warning(&mut self, diagnostic: &Diagnostic);

    /// Called when the compilation imports another file.
    fn import_file(&mut self, filename: &str) {
        let _ = filename;
    }
}

/// Handler that stores diagnostics in a shared list.
///
/// Clones share the list, so a clone can be boxed into a context while the
/// original is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingHandler {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
    imports: Rc<RefCell<Vec<String>>>,
}

impl RecordingHandler {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Recorded diagnostics with the given code.
    #[must_use]
    pub fn with_code(&self, code: ErrorCode) -> Vec<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.code == Some(code))
            .cloned()
            .collect()
    }

    /// Files reported through [`CompilerHandler::import_file`].
    #[must_use]
    pub fn imports(&self) -> Vec<String> {
        self.imports.borrow().clone()
    }
}

impl CompilerHandler for RecordingHandler {
    fn error(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }

    fn warning(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }

    fn import_file(&mut self, filename: &str) {
        self.imports.borrow_mut().push(filename.to_string());
    }
}

/// Renders a diagnostic in the fallback format used without a handler.
#[must_use]
pub fn render_fallback(diagnostic: &Diagnostic) -> String {
    let pos = |v: Option<usize>| v.map_or_else(|| "-1".to_string(), |n| n.to_string());
    let mut out = format!(
        "{}\n   {}, Ln {}, Col {}: \n",
        diagnostic.message,
        diagnostic.origin,
        pos(diagnostic.line),
        pos(diagnostic.column)
    );
    if !diagnostic.source_line.is_empty() {
        out.push_str("   ");
        out.push_str(&diagnostic.source_line);
        out.push_str("\n   ");
        out.push_str(&InputBuffer::line_pointer(diagnostic.column.unwrap_or(0)));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Formats, routes, and counts diagnostics.
pub struct Reporter {
    handler: Option<Box<dyn CompilerHandler>>,
    error_count: usize,
    warning_count: usize,
    config: CompilerConfig,
}

impl Reporter {
    /// Creates a reporter without a handler.
    #[must_use]
    pub const fn new(config: CompilerConfig) -> Self {
        Self {
            handler: None,
            error_count: 0,
            warning_count: 0,
            config,
        }
    }

    /// Installs a handler, returning the previous one.
    pub fn set_handler(
        &mut self,
        handler: Box<dyn CompilerHandler>,
    ) -> Option<Box<dyn CompilerHandler>> {
        self.handler.replace(handler)
    }

    /// Removes the installed handler.
    pub fn take_handler(&mut self) -> Option<Box<dyn CompilerHandler>> {
        self.handler.take()
    }

    /// Number of errors reported so far.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of warnings reported so far.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Reports a coded diagnostic at a character offset in the frame.
    pub fn report(
        &mut self,
        severity: Severity,
        frame: &SourceFrame,
        pos: usize,
        code: ErrorCode,
        args: &[&str],
    ) {
        let message = format_message(
            code,
            args,
            self.config.language,
            self.config.sanity_errors,
            self.config.verbose_errors,
        );
        self.report_message(severity, frame, pos, message, Some(code));
    }

    /// Reports an already formatted message at a character offset.
    pub fn report_message(
        &mut self,
        severity: Severity,
        frame: &SourceFrame,
        pos: usize,
        message: String,
        code: Option<ErrorCode>,
    ) {
        let input = frame.input.as_deref();
        let diagnostic = Diagnostic {
            severity,
            origin: frame.origin.clone(),
            line: input.map(|i| i.line(pos)),
            column: input.map(|i| i.column(pos)),
            message,
            source_line: input.map(|i| i.line_text(pos).to_string()).unwrap_or_default(),
            code,
        };
        self.dispatch(&diagnostic);
    }

    /// Routes a finished diagnostic to the handler and updates the counters.
    pub fn dispatch(&mut self, diagnostic: &Diagnostic) {
        match (&mut self.handler, diagnostic.severity) {
            (Some(h), Severity::Error) => h.error(diagnostic),
            (Some(h), Severity::Warning) => h.warning(diagnostic),
            (None, _) => eprint!("{}", render_fallback(diagnostic)),
        }
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    /// Forwards an import notification to the handler.
    pub fn import_file(&mut self, filename: &str) {
        if let Some(h) = &mut self.handler {
            h.import_file(filename);
        }
    }
}

impl core::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reporter")
            .field("has_handler", &self.handler.is_some())
            .field("error_count", &self.error_count)
            .field("warning_count", &self.warning_count)
            .finish_non_exhaustive()
    }
}
