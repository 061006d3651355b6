//! C/C++ language data

use crate::diagnostics::Severity;
use crate::syntax::rules::DiagnosticRule;

pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

pub const CPP_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "bool", "catch", "class", "constexpr",
    "delete", "explicit", "false", "friend", "mutable", "namespace", "new", "noexcept",
    "nullptr", "operator", "private", "protected", "public", "template", "this", "throw",
    "true", "try", "typename", "using", "virtual",
];

/// Create C fallback rules
pub fn fallback_rules() -> Vec<DiagnosticRule> {
    let mut rules = Vec::new();

    if let Ok(rule) = DiagnosticRule::new(
        "unsafe_gets",
        r"\bgets\s*\(",
        "gets() cannot be used safely; use fgets()",
        Severity::Error,
    ) {
        rules.push(rule);
    }

    rules
}

/// Create C++ fallback rules
pub fn cpp_fallback_rules() -> Vec<DiagnosticRule> {
    let mut rules = Vec::new();

    if let Ok(rule) = DiagnosticRule::new(
        "stream_operator",
        r"\b(cout\s*>>|cin\s*<<)",
        "Stream operator points the wrong way",
        Severity::Error,
    ) {
        rules.push(rule);
    }

    rules
}
