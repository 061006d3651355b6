//! lintpad - highlighting, live diagnostics and edit history for a
//! multi-language code editor
//!
//! The core is pure over `(text, language)`: [`SyntaxManager::highlight`]
//! tokenizes a buffer and runs the diagnostic pass, while
//! [`EditSession`] records debounced undo checkpoints. Rendering and
//! file handling belong to the host.

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod history;
pub mod search;
pub mod session;
pub mod syntax;

pub use catalog::{CatalogSource, RuleCatalog};
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticEngine, Severity};
pub use error::{LintpadError, Result};
pub use history::{EditorState, HistoryLimits, HistoryManager};
pub use session::EditSession;
pub use syntax::{detect_language, Category, Language, Span, SyntaxManager};
