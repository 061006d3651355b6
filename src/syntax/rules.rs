//! Line-local diagnostic rules
//!
//! A rule is a case-insensitive regex plus the diagnostic it produces.
//! Rules come from the catalog and are tried against one line at a time.

use regex::{Regex, RegexBuilder};

use crate::diagnostics::Severity;
use crate::error::{LintpadError, Result};

/// A single catalog rule
#[derive(Debug, Clone)]
pub struct DiagnosticRule {
    /// Rule kind, also the diagnostic kind (e.g. "function_syntax")
    pub kind: String,
    /// Compiled case-insensitive pattern
    pub pattern: Regex,
    /// Message attached to every match
    pub message: String,
    /// Severity of every match
    pub severity: Severity,
}

impl DiagnosticRule {
    /// Compile a rule; the pattern is always case-insensitive
    pub fn new(kind: &str, pattern: &str, message: &str, severity: Severity) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| LintpadError::Pattern {
                kind: kind.to_string(),
                source,
            })?;
        Ok(Self {
            kind: kind.to_string(),
            pattern,
            message: message.to_string(),
            severity,
        })
    }

    /// Byte columns of every match in `line`
    pub fn match_columns<'a>(&'a self, line: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.pattern.find_iter(line).map(|m| m.start())
    }
}

/// Map a catalog severity string onto a [`Severity`]
///
/// "warning" and "info" both become `Warning`; anything else is an `Error`.
/// Contextual checks still emit `Info` directly.
pub fn severity_from_catalog(value: &str) -> Severity {
    match value.trim().to_ascii_lowercase().as_str() {
        "warning" | "info" => Severity::Warning,
        _ => Severity::Error,
    }
}
