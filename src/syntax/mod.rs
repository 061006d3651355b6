//! Syntax module
//!
//! This module provides the language model and highlighting used for:
//! - Tokenizing a buffer into categorized spans
//! - Keyword sets and fallback diagnostic rules per language
//! - Diagnostic overlays on top of the highlighted text

mod style;
mod tokens;
mod language;
mod manager;
pub(crate) mod builtin;
pub(crate) mod highlighter;
pub mod rules;

pub use style::{Color, Span, Style};
pub use tokens::Category;
pub use rules::DiagnosticRule;
pub use language::{detect_language, Language};
pub use highlighter::tokenize;
pub use manager::{overlay_style, DiagnosticOverlay, HighlightCache, SyntaxManager};
