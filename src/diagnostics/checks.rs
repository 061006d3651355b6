//! Language-specific per-line checks

use super::context::{has_word, indent_width, words, ContextMap};
use super::{Diagnostic, Severity};
use crate::syntax::Language;

/// Words that start a line which needs no terminator
pub(crate) const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "try", "catch", "finally",
];

const PYTHON_BLOCK_HEADERS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
];

const TERMINATORS: &[char] = &[';', '{', '}', ':'];

/// Whether the buffer includes the standard I/O header for C or C++
pub(crate) fn has_io_include(text: &str, language: Language) -> bool {
    let headers: &[&str] = match language {
        Language::Cpp => &["<iostream>", "<cstdio>", "<stdio.h>"],
        _ => &["<stdio.h>"],
    };
    text.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("#include") && headers.iter().any(|h| line.contains(h))
    })
}

pub(crate) fn missing_include(language: Language) -> Diagnostic {
    let header = match language {
        Language::Cpp => "<iostream>",
        _ => "<stdio.h>",
    };
    Diagnostic::new(
        1,
        0,
        Severity::Error,
        "missing_include",
        format!("Missing #include {header}"),
    )
}

/// Run the contextual checks for one non-comment line
pub(crate) fn check_line(
    language: Language,
    line: &str,
    line_no: usize,
    ctx: &ContextMap,
    out: &mut Vec<Diagnostic>,
) {
    let mut code = strip_trailing_comment(line, language.line_comment());
    if language.has_block_comments() {
        code = strip_trailing_comment(code, "/*");
    }

    match language {
        Language::Kotlin => {
            check_function_paren(code, line_no, "fun", out);
            check_binding(code, line_no, out);
        }
        Language::Java => {
            check_terminator(code, line_no, out);
            check_entry_point(code, line_no, ctx, out);
        }
        Language::Python => {
            check_function_paren(code, line_no, "def", out);
            check_block_colon(code, line_no, out);
            check_indentation(code, line_no, out);
        }
        Language::Cpp | Language::C => check_terminator(code, line_no, out),
    }
}

fn word_column(line: &str, word: &str) -> usize {
    let mut offset = 0;
    for w in words(line) {
        // words() yields subslices of line, so pointer math gives the column
        offset = w.as_ptr() as usize - line.as_ptr() as usize;
        if w == word {
            break;
        }
    }
    offset
}

fn check_function_paren(code: &str, line_no: usize, keyword: &str, out: &mut Vec<Diagnostic>) {
    if has_word(code, keyword) && !code.contains('(') {
        out.push(Diagnostic::new(
            line_no,
            word_column(code, keyword),
            Severity::Error,
            "missing_paren",
            "Function declaration is missing '('",
        ));
    }
}

fn check_binding(code: &str, line_no: usize, out: &mut Vec<Diagnostic>) {
    let binding = ["val", "var"].into_iter().find(|kw| has_word(code, kw));
    if let Some(keyword) = binding {
        if !code.contains('=') {
            out.push(Diagnostic::new(
                line_no,
                word_column(code, keyword),
                Severity::Warning,
                "missing_initializer",
                format!("'{keyword}' declaration has no initializer"),
            ));
        }
    }
}

fn check_terminator(code: &str, line_no: usize, out: &mut Vec<Diagnostic>) {
    let trimmed = code.trim();
    if trimmed.is_empty() || trimmed.starts_with('@') || trimmed.ends_with("*/") {
        return;
    }
    if words(trimmed)
        .next()
        .is_some_and(|w| CONTROL_KEYWORDS.contains(&w))
    {
        return;
    }
    if !trimmed.ends_with(TERMINATORS) {
        out.push(Diagnostic::new(
            line_no,
            code.trim_end().len(),
            Severity::Error,
            "missing_semicolon",
            "Missing terminator: expected ';'",
        ));
    }
}

fn check_entry_point(code: &str, line_no: usize, ctx: &ContextMap, out: &mut Vec<Diagnostic>) {
    if has_word(code, "class") && !ctx.has_entry_point {
        out.push(Diagnostic::new(
            line_no,
            word_column(code, "class"),
            Severity::Info,
            "no_entry_point",
            "Class declared but the file has no main method",
        ));
    }
}

fn check_block_colon(code: &str, line_no: usize, out: &mut Vec<Diagnostic>) {
    let trimmed = code.trim();
    let header = words(trimmed)
        .next()
        .filter(|w| trimmed.starts_with(*w) && PYTHON_BLOCK_HEADERS.contains(w));
    if header.is_some() && !trimmed.ends_with(':') {
        out.push(Diagnostic::new(
            line_no,
            code.trim_end().len(),
            Severity::Error,
            "missing_colon",
            "Block header must end with ':'",
        ));
    }
}

fn check_indentation(code: &str, line_no: usize, out: &mut Vec<Diagnostic>) {
    let trimmed = code.trim_start();
    let declaration = trimmed.starts_with("def ") || trimmed.starts_with("class ");
    let indent = indent_width(code);
    if declaration && indent % 4 != 0 {
        out.push(Diagnostic::new(
            line_no,
            0,
            Severity::Warning,
            "indentation",
            format!("Indentation of {indent} is not a multiple of 4"),
        ));
    }
}

/// `line` up to a trailing comment that starts outside any quotes
fn strip_trailing_comment<'a>(line: &'a str, opener: &str) -> &'a str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => quote = Some(c),
            None if line[i..].starts_with(opener) => return &line[..i],
            None => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(language: Language, line: &str) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        check_line(language, line, 1, &ContextMap::default(), &mut out);
        out
    }

    #[test]
    fn test_terminator() {
        let d = run(Language::C, "    int x = 1");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].kind, "missing_semicolon");
        assert_eq!(d[0].column, 13);

        assert!(run(Language::C, "    int x = 1; // fine").is_empty());
        assert!(run(Language::C, "if (x > 1)").is_empty());
        assert!(run(Language::C, "} else {").is_empty());
        assert!(run(Language::C, "case 3:").is_empty());
        assert!(run(Language::Java, "    @Override").is_empty());
        assert!(!run(Language::Cpp, "return x // oops").is_empty());
        assert!(run(Language::C, "int a = 1; /* open").is_empty());
        assert!(run(Language::Java, "int a = 1; /* note */").is_empty());
        assert!(run(Language::C, "printf(\"/*\");").is_empty());
    }

    #[test]
    fn test_kotlin_checks() {
        let d = run(Language::Kotlin, "fun broken");
        assert_eq!(d[0].kind, "missing_paren");
        assert_eq!(d[0].severity, Severity::Error);

        let d = run(Language::Kotlin, "    val x: Int");
        assert_eq!(d[0].kind, "missing_initializer");
        assert_eq!(d[0].severity, Severity::Warning);
        assert_eq!(d[0].column, 4);

        assert!(run(Language::Kotlin, "val value = 1").is_empty());
        assert!(run(Language::Kotlin, "fun ok() = 1").is_empty());
        // Identifiers containing the keyword do not count
        assert!(run(Language::Kotlin, "funny()").is_empty());
    }

    #[test]
    fn test_java_entry_point_info() {
        let d = run(Language::Java, "public class App {");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].severity, Severity::Info);
        assert_eq!(d[0].column, 7);

        let mut out = Vec::new();
        let ctx = ContextMap {
            has_entry_point: true,
            ..ContextMap::default()
        };
        check_line(Language::Java, "public class App {", 1, &ctx, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_python_checks() {
        assert_eq!(run(Language::Python, "if x > 1")[0].kind, "missing_colon");
        assert!(run(Language::Python, "if x > 1:  # note").is_empty());
        assert!(run(Language::Python, "x = {'#': 1}").is_empty());
        assert_eq!(run(Language::Python, "def f:")[0].kind, "missing_paren");

        let d = run(Language::Python, "  def f():");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].kind, "indentation");
        assert!(run(Language::Python, "        def f():").is_empty());
    }

    #[test]
    fn test_io_include() {
        assert!(has_io_include("#include <stdio.h>\n", Language::C));
        assert!(!has_io_include("#include <stdlib.h>\n", Language::C));
        assert!(has_io_include("  #include <iostream>\n", Language::Cpp));
        assert!(!has_io_include("// #include <iostream>\n", Language::Cpp));
    }

    #[test]
    fn test_strip_trailing_comment() {
        assert_eq!(strip_trailing_comment("a; // b", "//"), "a; ");
        assert_eq!(strip_trailing_comment("s = \"//\";", "//"), "s = \"//\";");
        assert_eq!(strip_trailing_comment("x = 1 # y", "#"), "x = 1 ");
    }
}
