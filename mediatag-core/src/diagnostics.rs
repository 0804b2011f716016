// Symphonia
// Copyright (c) 2019-2026 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `diagnostics` module provides a structured log of non-fatal problems encountered while
//! parsing or rewriting a container, and a progress/cancellation callback for long-running
//! rewrite operations.

use std::fmt;

/// The severity of a single `Diagnostic` entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Purely informational; does not indicate a problem.
    Information,
    /// A recoverable issue that a caller may want to know about, but that did not affect the
    /// result (e.g. an unrecognized tag frame was skipped).
    Warning,
    /// A recoverable issue that may have affected the completeness or accuracy of the result
    /// (e.g. garbage bytes found after the last valid element).
    Critical,
    /// An unrecoverable problem. The operation that produced it was aborted.
    Fatal,
}

/// A single diagnostic entry: a severity, the component that raised it, and a human-readable
/// message.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.context, self.message)
    }
}

/// An ordered sequence of `Diagnostic` entries, appended to by every reader and writer during a
/// parse or rewrite operation. Non-fatal severities never abort the operation that appended them;
/// the caller decides whether to accept a result that carries `Critical` or worse entries.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty diagnostics log.
    pub fn new() -> Self {
        Default::default()
    }

    /// Append an entry.
    pub fn push(&mut self, severity: Severity, context: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic { severity, context: context.into(), message: message.into() });
    }

    /// Append an `Information` entry.
    pub fn info(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Information, context, message);
    }

    /// Append a `Warning` entry.
    pub fn warning(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, context, message);
    }

    /// Append a `Critical` entry.
    pub fn critical(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Critical, context, message);
    }

    /// Append a `Fatal` entry.
    pub fn fatal(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Fatal, context, message);
    }

    /// Gets an immutable slice to the entries in this log.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Returns `true` if any entry carries `Severity::Fatal`.
    pub fn has_fatal(&self) -> bool {
        self.entries.iter().any(|e| e.severity == Severity::Fatal)
    }

    /// Appends all entries from `other`, preserving their relative order.
    pub fn merge(&mut self, mut other: Diagnostics) {
        self.entries.append(&mut other.entries);
    }
}

/// A callback interface for reporting rewrite progress and observing cancellation requests.
///
/// `RewritePlan` execution (see `crate::rewrite`) emits progress updates at well-defined
/// checkpoints (per-element copy, tag-block write, final flush); cancellation is only observed at
/// those same checkpoints, never mid-write of a single element.
pub trait ProgressFeedback {
    /// Report that `percent` (0-100) of the operation has completed, with a short, human-readable
    /// label describing the current step.
    fn on_progress(&mut self, percent: u8, step: &str);

    /// Polled at each checkpoint; if `true`, the operation is aborted and `OperationAborted` is
    /// returned with no partial output written.
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

/// A `ProgressFeedback` that does nothing and never cancels.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullProgress;

impl ProgressFeedback for NullProgress {
    fn on_progress(&mut self, _percent: u8, _step: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_has_fatal() {
        let mut diag = Diagnostics::new();
        diag.warning("mp4", "unrecognized atom 'xxxx', skipping");
        assert!(!diag.has_fatal());
        diag.fatal("mp4", "truncated stsd box");
        assert!(diag.has_fatal());
        assert_eq!(diag.entries().len(), 2);
    }

    #[test]
    fn diagnostics_merge_preserves_order() {
        let mut a = Diagnostics::new();
        a.info("a", "first");
        let mut b = Diagnostics::new();
        b.info("b", "second");
        a.merge(b);
        assert_eq!(a.entries()[0].message, "first");
        assert_eq!(a.entries()[1].message, "second");
    }
}
