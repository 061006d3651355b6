//! Java language data

use crate::diagnostics::Severity;
use crate::syntax::rules::DiagnosticRule;

pub const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "var", "record",
];

pub fn fallback_rules() -> Vec<DiagnosticRule> {
    let mut rules = Vec::new();

    if let Ok(rule) = DiagnosticRule::new(
        "main_signature",
        r"\bpublic\s+static\s+void\s+main\s*\(\s*\)",
        "main must take a String[] argument",
        Severity::Error,
    ) {
        rules.push(rule);
    }

    rules
}
