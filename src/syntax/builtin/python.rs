//! Python language data

use crate::diagnostics::Severity;
use crate::syntax::rules::DiagnosticRule;

pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

pub fn fallback_rules() -> Vec<DiagnosticRule> {
    let mut rules = Vec::new();

    // Python 2 print statement
    if let Ok(rule) = DiagnosticRule::new(
        "print_statement",
        r#"^\s*print\s+["'\w]"#,
        "print is a function; call it as print(...)",
        Severity::Error,
    ) {
        rules.push(rule);
    }

    rules
}
