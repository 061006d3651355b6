//! Live syntax diagnostics
//!
//! A heuristic, single-pass linter: catalog rules and language checks run
//! line by line, then whole-buffer analyzers look for unbalanced
//! brackets, strings and block comments. Findings are advisory; the
//! engine never fails on string input.

mod analyzers;
mod checks;
mod context;

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use tracing::trace;

use crate::catalog::RuleCatalog;
use crate::syntax::highlighter::tokenize;
use crate::syntax::{Category, Language, Span};

pub use analyzers::LineIndex;
pub use context::ContextMap;

/// Diagnostic severity, ordered most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Sort rank: Error < Warning < Info
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single advisory finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    /// 0-based byte column within the line
    pub column: usize,
    pub message: String,
    pub severity: Severity,
    /// Machine-readable kind, e.g. "missing_semicolon"
    pub kind: String,
    /// Fix hint looked up from `kind`
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic; the suggestion is filled in from `kind`
    pub fn new(
        line: usize,
        column: usize,
        severity: Severity,
        kind: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity,
            kind: kind.to_string(),
            suggestion: suggestion_for(kind).map(str::to_string),
        }
    }

    /// Byte range of this diagnostic's line in `text` (newline excluded).
    /// `index` must have been built from the same `text`.
    pub fn range_in(&self, text: &str, index: &LineIndex) -> Option<Range<usize>> {
        index.line_range(text, self.line)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {} [{}]",
            self.line, self.column, self.severity, self.message, self.kind
        )
    }
}

/// Fix hint for a diagnostic kind
pub fn suggestion_for(kind: &str) -> Option<&'static str> {
    let hint = match kind {
        "missing_semicolon" => "Add ';' at the end of the statement",
        "missing_paren" | "function_syntax" => "Add a parameter list, e.g. name()",
        "missing_colon" => "End the block header with ':'",
        "missing_initializer" => "Initialize the value with '= ...'",
        "indentation" => "Indent with a multiple of 4 spaces",
        "no_entry_point" => "Add a main method to run this class",
        "missing_include" => "Include the standard I/O header at the top of the file",
        "unmatched_bracket" => "Remove the extra closing bracket",
        "mismatched_bracket" => "Close brackets in the reverse order they were opened",
        "unclosed_bracket" => "Add the matching closing bracket",
        "unclosed_string" => "Add the closing quote",
        "unclosed_comment" => "Close the comment with '*/'",
        "class_syntax" => "Give the class a name",
        "main_signature" => "Declare main as main(String[] args)",
        "print_statement" => "Wrap the arguments in print(...)",
        "unsafe_gets" => "Use fgets(buf, sizeof buf, stdin)",
        "stream_operator" => "Use cout << value or cin >> variable",
        _ => return None,
    };
    Some(hint)
}

/// Drop duplicate (line, column, kind) entries and order by line, then severity
pub fn dedup_and_sort(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Diagnostic> = diagnostics
        .into_iter()
        .filter(|d| seen.insert((d.line, d.column, d.kind.clone())))
        .collect();
    unique.sort_by_key(|d| (d.line, d.severity.rank()));
    unique
}

/// Runs every check for a buffer and remembers the last result
pub struct DiagnosticEngine {
    catalog: Arc<RuleCatalog>,
    last: Vec<Diagnostic>,
}

impl DiagnosticEngine {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            last: Vec::new(),
        }
    }

    /// The catalog this engine reads rules and keywords from
    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    /// Check `text` and store the result as the last diagnostics
    pub fn check(&mut self, text: &str, language: Language) -> Vec<Diagnostic> {
        let diagnostics = self.analyze(text, language);
        self.last = diagnostics.clone();
        diagnostics
    }

    /// Diagnostics from the most recent [`check`](Self::check)
    pub fn last(&self) -> &[Diagnostic] {
        &self.last
    }

    /// Forget the last diagnostics
    pub fn clear(&mut self) {
        self.last.clear();
    }

    /// Check `text` without touching the stored result
    pub fn analyze(&self, text: &str, language: Language) -> Vec<Diagnostic> {
        let ctx = ContextMap::compute(text, language);
        let spans = tokenize(text, language, self.catalog.keywords(language));
        let mut found = Vec::new();

        self.line_pass(text, language, &spans, &ctx, &mut found);

        let index = LineIndex::new(text);
        found.extend(analyzers::bracket_diagnostics(text, &spans, &index));
        found.extend(analyzers::string_diagnostics(text, &spans, &index));
        if language.has_block_comments() {
            found.extend(analyzers::block_comment_diagnostics(text));
        }

        let diagnostics = dedup_and_sort(found);
        trace!(
            language = %language,
            count = diagnostics.len(),
            "diagnostic pass complete"
        );
        diagnostics
    }

    fn line_pass(
        &self,
        text: &str,
        language: Language,
        spans: &[Span],
        ctx: &ContextMap,
        found: &mut Vec<Diagnostic>,
    ) {
        let rules = self.catalog.rules(language);
        let missing_io_header = language.is_c_family() && !checks::has_io_include(text, language);
        let mut line_start = 0;
        let mut cursor = 0;

        for (idx, raw) in text.split('\n').enumerate() {
            let line_no = idx + 1;
            let offset = line_start;
            line_start += raw.len() + 1;

            // Only a block comment span can carry across a line break
            while spans.get(cursor).is_some_and(|s| s.end <= offset) {
                cursor += 1;
            }
            let inside_comment = spans
                .get(cursor)
                .is_some_and(|s| s.start < offset && s.category == Category::Comment);
            if inside_comment {
                continue;
            }

            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
                continue;
            }
            if language.has_block_comments() && trimmed.starts_with("/*") {
                continue;
            }

            if missing_io_header {
                found.push(checks::missing_include(language));
            }

            for rule in rules {
                for column in rule.match_columns(line) {
                    found.push(Diagnostic::new(
                        line_no,
                        column,
                        rule.severity,
                        &rule.kind,
                        rule.message.clone(),
                    ));
                }
            }

            checks::check_line(language, line, line_no, ctx, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DiagnosticEngine {
        DiagnosticEngine::new(Arc::new(RuleCatalog::builtin()))
    }

    fn kinds(diags: &[Diagnostic]) -> Vec<&str> {
        diags.iter().map(|d| d.kind.as_str()).collect()
    }

    #[test]
    fn test_dedup_and_sort() {
        let input = vec![
            Diagnostic::new(5, 0, Severity::Error, "a", "late error"),
            Diagnostic::new(2, 3, Severity::Info, "b", "early info"),
            Diagnostic::new(2, 3, Severity::Info, "b", "duplicate"),
            Diagnostic::new(2, 1, Severity::Error, "c", "early error"),
            Diagnostic::new(2, 3, Severity::Warning, "d", "same spot, other kind"),
        ];
        let out = dedup_and_sort(input);
        let summary: Vec<_> = out.iter().map(|d| (d.line, d.severity)).collect();
        assert_eq!(
            summary,
            vec![
                (2, Severity::Error),
                (2, Severity::Warning),
                (2, Severity::Info),
                (5, Severity::Error),
            ]
        );
        assert_eq!(out[2].message, "early info");
    }

    #[test]
    fn test_suggestions() {
        let d = Diagnostic::new(1, 0, Severity::Error, "missing_semicolon", "m");
        assert!(d.suggestion.is_some());
        let d = Diagnostic::new(1, 0, Severity::Error, "made_up", "m");
        assert!(d.suggestion.is_none());
    }

    #[test]
    fn test_range_in_with_shared_index() {
        let text = "#include <stdio.h>\nint a = 1\nint b = 2\n";
        let index = LineIndex::new(text);
        let lines: Vec<_> = engine()
            .analyze(text, Language::C)
            .iter()
            .filter(|d| d.kind == "missing_semicolon")
            .filter_map(|d| d.range_in(text, &index))
            .map(|range| &text[range])
            .collect();
        assert_eq!(lines, vec!["int a = 1", "int b = 2"]);

        let past_end = Diagnostic::new(9, 0, Severity::Error, "x", "m");
        assert_eq!(past_end.range_in(text, &index), None);
    }

    #[test]
    fn test_check_stores_last() {
        let mut engine = engine();
        assert!(engine.last().is_empty());
        let diags = engine.check("int x = 1\n", Language::C);
        assert!(!diags.is_empty());
        assert_eq!(engine.last(), diags.as_slice());
        engine.clear();
        assert!(engine.last().is_empty());
    }

    #[test]
    fn test_missing_include_collapses_to_one() {
        let text = "int main() {\n    int x = 1;\n    return x;\n}\n";
        let diags = engine().analyze(text, Language::C);
        let includes: Vec<_> = diags.iter().filter(|d| d.kind == "missing_include").collect();
        assert_eq!(includes.len(), 1);
        assert_eq!((includes[0].line, includes[0].column), (1, 0));
        assert_eq!(includes[0].severity, Severity::Error);
    }

    #[test]
    fn test_clean_c_program() {
        let text = "#include <stdio.h>\n\nint main() {\n    printf(\"hi\\n\");\n    return 0;\n}\n";
        let diags = engine().analyze(text, Language::C);
        assert!(diags.is_empty(), "unexpected: {diags:?}");
    }

    #[test]
    fn test_catalog_rule_matches() {
        let text = "#include <stdio.h>\nint main() {\n    char b[8];\n    gets(b);\n}\n";
        let diags = engine().analyze(text, Language::C);
        let gets = diags.iter().find(|d| d.kind == "unsafe_gets").unwrap();
        assert_eq!((gets.line, gets.column), (4, 4));
        assert!(gets.suggestion.is_some());
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let text = "#include <stdio.h>\n// int x = 1\n/* int y = 2\n   still comment\n*/\nint z = 3;\n";
        let diags = engine().analyze(text, Language::C);
        assert!(diags.is_empty(), "unexpected: {diags:?}");
    }

    #[test]
    fn test_comment_opener_in_string_or_line_comment() {
        let text = "#include <stdio.h>\nint main() {\n    printf(\"/* not a comment\");\n    int y = 2\n    gets(b);\n}";
        let diags = engine().analyze(text, Language::C);
        assert!(diags
            .iter()
            .any(|d| d.kind == "missing_semicolon" && d.line == 4));
        let gets = diags.iter().find(|d| d.kind == "unsafe_gets").unwrap();
        assert_eq!((gets.line, gets.column), (5, 4));

        let diags = engine().analyze("val s = \"/*\"\nval t\nfun broken", Language::Kotlin);
        let found: Vec<_> = diags.iter().map(|d| (d.line, d.kind.as_str())).collect();
        assert!(found.contains(&(2, "missing_initializer")));
        assert!(found.contains(&(3, "function_syntax")));
        assert!(found.contains(&(3, "missing_paren")));

        let diags = engine().analyze("int x = 1; // see /* below\nint y = 2", Language::C);
        assert!(diags
            .iter()
            .any(|d| d.kind == "missing_semicolon" && d.line == 2));
    }

    #[test]
    fn test_lines_inside_block_comment_skipped() {
        let text = "#include <stdio.h>\nint a = 1; /* open\nint b = 2\n*/\nint c = 3\n";
        let diags = engine().analyze(text, Language::C);
        let missing: Vec<_> = diags
            .iter()
            .filter(|d| d.kind == "missing_semicolon")
            .map(|d| d.line)
            .collect();
        assert_eq!(missing, vec![5]);
    }

    #[test]
    fn test_python_program() {
        let text = "def greet(name):\n    print(name)\n\nif __name__ == \"__main__\":\n    greet('x')\n";
        assert!(engine().analyze(text, Language::Python).is_empty());

        let text = "def greet(name)\n   return name\n  def inner():\n    pass\n";
        let diags = engine().analyze(text, Language::Python);
        assert!(kinds(&diags).contains(&"missing_colon"));
        assert!(kinds(&diags).contains(&"indentation"));
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let long_line = "(".repeat(50_000);
        let inputs = [
            "",
            "\n\n\n",
            "\u{feff}\u{200b}€𝄞",
            "/*",
            "\"",
            "'\\",
            ")]}",
            long_line.as_str(),
        ];
        let engine = engine();
        for text in inputs {
            for lang in Language::ALL {
                let _ = engine.analyze(text, lang);
            }
        }
    }

    #[test]
    fn test_info_is_kept_distinct() {
        let text = "public class App {\n    int x = 1;\n}\n";
        let diags = engine().analyze(text, Language::Java);
        let info = diags.iter().find(|d| d.kind == "no_entry_point").unwrap();
        assert_eq!(info.severity, Severity::Info);
    }
}
