//! Single-pass tokenizer
//!
//! Walks the buffer once with a byte cursor and emits one span per
//! token. Spans are gap-free and cover the whole buffer, so a renderer
//! can draw by concatenating them.

use std::collections::HashSet;

use super::language::Language;
use super::style::Span;
use super::tokens::Category;

const OPERATORS: &[char] = &['+', '-', '*', '/', '=', '<', '>', '!', '&', '|', '^', '%', '~'];

/// Tokenize `text` into categorized spans covering `[0, text.len())`
///
/// Precedence at each position: line comment, block comment, string,
/// number, identifier, operator, anything else. Unterminated comments
/// and strings run to the end of the buffer.
pub fn tokenize(text: &str, language: Language, keywords: &HashSet<String>) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;
    let line_comment = language.line_comment();

    while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];

        let (end, category) = if rest.starts_with(line_comment) {
            (line_end(text, pos), Category::Comment)
        } else if language.has_block_comments() && rest.starts_with("/*") {
            let end = rest[2..].find("*/").map_or(text.len(), |i| pos + 2 + i + 2);
            (end, Category::Comment)
        } else if ch == '"' || ch == '\'' {
            (string_end(text, pos, ch), Category::String)
        } else if ch.is_ascii_digit() {
            let end = scan_while(text, pos, |c| c.is_ascii_digit() || matches!(c, '.' | 'f' | 'L'));
            (end, Category::Number)
        } else if ch.is_alphabetic() || ch == '_' {
            let end = scan_while(text, pos, |c| c.is_alphanumeric() || c == '_');
            (end, classify_word(text, pos, end, keywords))
        } else if OPERATORS.contains(&ch) {
            (pos + ch.len_utf8(), Category::Operator)
        } else {
            (pos + ch.len_utf8(), Category::Normal)
        };

        spans.push(Span::new(pos, end, category));
        pos = end;
    }

    spans
}

/// End of the line containing `pos`, excluding the newline
fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// End of the string opened by `quote` at `start` (just past the closing quote)
fn string_end(text: &str, start: usize, quote: char) -> usize {
    closing_quote(text, start, quote).unwrap_or(text.len())
}

/// Offset just past the unescaped quote closing the string opened at `start`
pub(crate) fn closing_quote(text: &str, start: usize, quote: char) -> Option<usize> {
    let body = start + quote.len_utf8();
    let mut escaped = false;
    for (i, c) in text.get(body..)?.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(body + i + c.len_utf8());
        }
    }
    None
}

fn scan_while(text: &str, start: usize, pred: impl Fn(char) -> bool) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| start + i)
}

fn classify_word(text: &str, start: usize, end: usize, keywords: &HashSet<String>) -> Category {
    let word = &text[start..end];
    if keywords.contains(word) {
        Category::Keyword
    } else if text[end..].starts_with('(') {
        Category::Function
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        Category::Type
    } else {
        Category::Normal
    }
}
