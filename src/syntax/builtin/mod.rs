//! Built-in language data
//!
//! Keyword sets and the fallback rule set used when the external
//! catalog cannot be read.

mod c;
mod java;
mod kotlin;
mod python;

use std::collections::HashSet;

use super::language::Language;
use super::rules::DiagnosticRule;

/// Built-in reserved words for a language
pub fn keywords(language: Language) -> HashSet<String> {
    let words: &[&str] = match language {
        Language::Kotlin => kotlin::KEYWORDS,
        Language::Java => java::KEYWORDS,
        Language::Python => python::KEYWORDS,
        Language::Cpp => c::CPP_KEYWORDS,
        Language::C => c::KEYWORDS,
    };
    words.iter().map(|w| w.to_string()).collect()
}

/// Built-in fallback rules for a language
pub fn fallback_rules(language: Language) -> Vec<DiagnosticRule> {
    match language {
        Language::Kotlin => kotlin::fallback_rules(),
        Language::Java => java::fallback_rules(),
        Language::Python => python::fallback_rules(),
        Language::Cpp => c::cpp_fallback_rules(),
        Language::C => c::fallback_rules(),
    }
}
