//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that coordinates tokenizing,
//! the diagnostic pass, and caching of the last result.

use std::ops::Range;
use std::sync::Arc;

use tracing::trace;

use super::highlighter::tokenize;
use super::language::Language;
use super::style::{Color, Span, Style};
use crate::catalog::RuleCatalog;
use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticEngine, LineIndex, Severity};

/// Last highlighted buffer
#[derive(Debug, Default)]
pub struct HighlightCache {
    text: String,
    language: Option<Language>,
    spans: Vec<Span>,
}

impl HighlightCache {
    fn get(&self, text: &str, language: Language) -> Option<&[Span]> {
        (self.language == Some(language) && self.text == text).then_some(self.spans.as_slice())
    }

    fn store(&mut self, text: &str, language: Language, spans: &[Span]) {
        self.text.clear();
        self.text.push_str(text);
        self.language = Some(language);
        self.spans = spans.to_vec();
    }

    /// Forget the cached result
    pub fn invalidate(&mut self) {
        self.language = None;
        self.text.clear();
        self.spans.clear();
    }
}

/// A background to paint behind one diagnostic's line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticOverlay {
    /// Byte range of the line, newline excluded
    pub range: Range<usize>,
    pub severity: Severity,
    pub style: Style,
}

/// Background style for a severity
pub fn overlay_style(severity: Severity) -> Style {
    match severity {
        Severity::Error => Style::bg(Color::Red),
        Severity::Warning => Style::bg(Color::Yellow),
        Severity::Info => Style::bg(Color::Blue),
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    catalog: Arc<RuleCatalog>,
    engine: DiagnosticEngine,
    cache: HighlightCache,
    /// Text of the last highlight call, for overlay ranges
    last_text: String,
    /// Whether highlighting also runs the diagnostic pass
    pub diagnostics_enabled: bool,
}

impl SyntaxManager {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            engine: DiagnosticEngine::new(Arc::clone(&catalog)),
            catalog,
            cache: HighlightCache::default(),
            last_text: String::new(),
            diagnostics_enabled: true,
        }
    }

    /// Manager using the catalog and diagnostic setting from `config`
    pub fn from_config(config: &Config) -> Self {
        let mut manager = Self::new(Arc::new(RuleCatalog::from_config(config)));
        manager.diagnostics_enabled = config.diagnostics;
        manager
    }

    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    /// Highlight a whole buffer
    ///
    /// The diagnostic pass runs first so [`last_diagnostics`](Self::last_diagnostics)
    /// describes the same text as the returned spans.
    pub fn highlight(&mut self, text: &str, language: Language) -> Vec<Span> {
        if self.diagnostics_enabled {
            self.engine.check(text, language);
        } else {
            self.engine.clear();
        }
        self.last_text.clear();
        self.last_text.push_str(text);

        if let Some(spans) = self.cache.get(text, language) {
            trace!(spans = spans.len(), "highlight cache hit");
            return spans.to_vec();
        }

        let spans = tokenize(text, language, self.catalog.keywords(language));
        self.cache.store(text, language, &spans);
        spans
    }

    /// Diagnostics computed by the most recent [`highlight`](Self::highlight)
    pub fn last_diagnostics(&self) -> &[Diagnostic] {
        self.engine.last()
    }

    /// Severity backgrounds for the last diagnostics, in diagnostic order
    pub fn diagnostic_overlays(&self) -> Vec<DiagnosticOverlay> {
        let index = LineIndex::new(&self.last_text);
        self.engine
            .last()
            .iter()
            .filter_map(|d| {
                let range = d.range_in(&self.last_text, &index)?;
                Some(DiagnosticOverlay {
                    range,
                    severity: d.severity,
                    style: overlay_style(d.severity),
                })
            })
            .collect()
    }

    /// Drop cached spans and diagnostics
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
        self.engine.clear();
        self.last_text.clear();
    }

    /// Toggle the diagnostic pass on/off
    pub fn toggle_diagnostics(&mut self) {
        self.diagnostics_enabled = !self.diagnostics_enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new(Arc::new(RuleCatalog::builtin()))
    }
}
