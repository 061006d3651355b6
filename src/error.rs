//! Error types for lintpad

use thiserror::Error;

/// Result type alias for lintpad operations
pub type Result<T> = std::result::Result<T, LintpadError>;

/// Errors raised while loading catalogs or talking to the host.
///
/// None of these cross the highlighting/diagnostic/history boundary: the
/// catalog absorbs them into its built-in fallback and the analyzers never
/// fail on string input.
#[derive(Error, Debug)]
pub enum LintpadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed rule catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("Invalid pattern for rule '{kind}': {source}")]
    Pattern {
        kind: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("{0}")]
    Message(String),
}
