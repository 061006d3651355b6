//! Whole-buffer structural analyzers
//!
//! Brackets and strings are read off the token stream, so anything
//! inside a comment or string literal is ignored. Block comments are
//! tracked line by line.

use std::ops::Range;

use super::{Diagnostic, Severity};
use crate::syntax::highlighter::closing_quote;
use crate::syntax::{Category, Span};

/// Byte offsets of line starts, for mapping offsets to (line, column)
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 1-based line and 0-based byte column of `offset`
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        (line, offset - self.starts[line - 1])
    }

    /// Byte range of 1-based `line`, newline (and `\r`) excluded
    pub fn line_range(&self, text: &str, line: usize) -> Option<Range<usize>> {
        let start = *self.starts.get(line.checked_sub(1)?)?;
        let end = self
            .starts
            .get(line)
            .map_or(text.len(), |next| next - 1);
        let end = if text[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };
        Some(start..end)
    }
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// A string span that swallowed the rest of the buffer without closing
fn is_unclosed_string(text: &str, span: &Span) -> bool {
    span.category == Category::String
        && span.end == text.len()
        && span
            .text(text)
            .chars()
            .next()
            .is_some_and(|quote| closing_quote(text, span.start, quote).is_none())
}

/// Stack-match `()`, `[]` and `{}` outside comments and closed strings
///
/// An unclosed string runs to the end of the buffer, so its body is
/// still scanned as code.
pub fn bracket_diagnostics(text: &str, spans: &[Span], index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut stack: Vec<(char, usize)> = Vec::new();

    let code = spans
        .iter()
        .filter(|s| s.category == Category::Normal || is_unclosed_string(text, s))
        .flat_map(|s| s.text(text).char_indices().map(move |(i, c)| (s.start + i, c)));

    for (offset, ch) in code {
        match ch {
            '(' | '[' | '{' => stack.push((ch, offset)),
            ')' | ']' | '}' => {
                let (line, column) = index.locate(offset);
                match stack.pop() {
                    None => out.push(Diagnostic::new(
                        line,
                        column,
                        Severity::Error,
                        "unmatched_bracket",
                        format!("Unmatched closing bracket '{ch}'"),
                    )),
                    Some((open, _)) if closer_for(open) != ch => out.push(Diagnostic::new(
                        line,
                        column,
                        Severity::Error,
                        "mismatched_bracket",
                        format!("Mismatched bracket, expected '{}'", closer_for(open)),
                    )),
                    Some(_) => {}
                }
            }
            _ => {}
        }
    }

    for (open, offset) in stack {
        let (line, column) = index.locate(offset);
        out.push(Diagnostic::new(
            line,
            column,
            Severity::Error,
            "unclosed_bracket",
            format!("Unclosed bracket '{open}'"),
        ));
    }

    out
}

/// Report a string literal still open at the end of the buffer
///
/// Strings may span lines; only one that never closes is an error.
pub fn string_diagnostics(text: &str, spans: &[Span], index: &LineIndex) -> Vec<Diagnostic> {
    spans
        .iter()
        .filter(|s| is_unclosed_string(text, s))
        .map(|s| {
            let (line, column) = index.locate(s.start);
            Diagnostic::new(
                line,
                column,
                Severity::Error,
                "unclosed_string",
                "Unclosed string literal",
            )
        })
        .collect()
}

/// Report a `/*` whose line-level `*/` never arrives
pub fn block_comment_diagnostics(text: &str) -> Vec<Diagnostic> {
    let mut open: Option<(usize, usize)> = None;

    for (idx, line) in text.split('\n').enumerate() {
        let mut rest_from = 0;
        if open.is_some() {
            match line.find("*/") {
                Some(close) => {
                    open = None;
                    rest_from = close + 2;
                }
                None => continue,
            }
        }
        if let Some(start) = line[rest_from..].find("/*") {
            let column = rest_from + start;
            if !line[column + 2..].contains("*/") {
                open = Some((idx + 1, column));
            }
        }
    }

    open.map(|(line, column)| {
        Diagnostic::new(
            line,
            column,
            Severity::Error,
            "unclosed_comment",
            "Unclosed multi-line comment",
        )
    })
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::highlighter::tokenize;
    use crate::syntax::Language;
    use std::collections::HashSet;

    fn brackets(text: &str) -> Vec<Diagnostic> {
        let spans = tokenize(text, Language::Java, &HashSet::new());
        bracket_diagnostics(text, &spans, &LineIndex::new(text))
    }

    fn strings(text: &str, lang: Language) -> Vec<Diagnostic> {
        let spans = tokenize(text, lang, &HashSet::new());
        string_diagnostics(text, &spans, &LineIndex::new(text))
    }

    #[test]
    fn test_line_index() {
        let text = "ab\ncd\r\n\nef";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.locate(0), (1, 0));
        assert_eq!(index.locate(4), (2, 1));
        assert_eq!(index.locate(8), (4, 0));
        assert_eq!(index.line_range(text, 2), Some(3..5));
        assert_eq!(index.line_range(text, 3), Some(7..7));
        assert_eq!(index.line_range(text, 4), Some(8..10));
        assert_eq!(index.line_range(text, 0), None);
        assert_eq!(index.line_range(text, 5), None);
    }

    #[test]
    fn test_mismatched_bracket() {
        let d = brackets("foo(bar[baz)]");
        assert_eq!(d[0].kind, "mismatched_bracket");
        assert_eq!(d[0].column, 11);
        assert_eq!(d[0].message, "Mismatched bracket, expected ']'");
        assert!(d.iter().all(|d| d.kind != "unclosed_bracket"));
    }

    #[test]
    fn test_unclosed_and_unmatched() {
        let d = brackets("fun f() {");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].kind, "unclosed_bracket");
        assert_eq!(d[0].message, "Unclosed bracket '{'");
        assert_eq!((d[0].line, d[0].column), (1, 8));

        let d = brackets("x)\n");
        assert_eq!(d[0].kind, "unmatched_bracket");
        assert_eq!((d[0].line, d[0].column), (1, 1));
    }

    #[test]
    fn test_brackets_in_strings_and_comments_ignored() {
        assert!(brackets("s = \"(\" // )\n/* [ */ f()").is_empty());
    }

    #[test]
    fn test_brackets_after_unclosed_quote() {
        let text = "fun f() {\n    val s = \"abc\n    g(\n";
        let d = brackets(text);
        let unclosed: Vec<_> = d
            .iter()
            .filter(|d| d.kind == "unclosed_bracket")
            .map(|d| (d.line, d.column, d.message.as_str()))
            .collect();
        assert_eq!(
            unclosed,
            vec![(1, 8, "Unclosed bracket '{'"), (3, 5, "Unclosed bracket '('")]
        );
    }

    #[test]
    fn test_unclosed_string() {
        let d = strings("x = \"abc", Language::Python);
        assert_eq!(d.len(), 1);
        assert_eq!((d[0].line, d[0].column), (1, 4));

        assert!(strings("x = \"abc\"", Language::Python).is_empty());
        assert!(strings("s = \"one\ntwo\"\n", Language::Kotlin).is_empty());

        let d = strings("s = \"abc\ndef", Language::Kotlin);
        assert_eq!(d.len(), 1);
        assert_eq!((d[0].line, d[0].column), (1, 4));
        assert!(strings("# it's fine\n", Language::Python).is_empty());
        assert_eq!(strings("s = 'a\\'", Language::Java).len(), 1);
    }

    #[test]
    fn test_block_comment() {
        assert!(block_comment_diagnostics("/* a */\nb").is_empty());
        assert!(block_comment_diagnostics("/* a\nb\n*/").is_empty());
        assert!(block_comment_diagnostics("/* a\n */ x /* b */").is_empty());

        let d = block_comment_diagnostics("int x;\n  /* open\nmore\n");
        assert_eq!(d.len(), 1);
        assert_eq!((d[0].line, d[0].column), (2, 2));

        let d = block_comment_diagnostics("/* a\n*/ y /* again\n");
        assert_eq!((d[0].line, d[0].column), (2, 5));
    }
}
