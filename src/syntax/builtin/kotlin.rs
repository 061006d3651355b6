//! Kotlin language data

use crate::diagnostics::Severity;
use crate::syntax::rules::DiagnosticRule;

pub const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while", "by", "catch", "constructor",
    "companion", "data", "enum", "finally", "import", "init", "internal", "open", "override",
    "private", "protected", "public", "sealed", "suspend",
];

/// Function and class shape checks
pub fn fallback_rules() -> Vec<DiagnosticRule> {
    let mut rules = Vec::new();

    if let Ok(rule) = DiagnosticRule::new(
        "function_syntax",
        r"\bfun\s+\w+\s*$",
        "Function declaration is missing its parameter list",
        Severity::Error,
    ) {
        rules.push(rule);
    }

    if let Ok(rule) = DiagnosticRule::new(
        "class_syntax",
        r"\bclass\s*\{",
        "Class declaration is missing a name",
        Severity::Error,
    ) {
        rules.push(rule);
    }

    rules
}
