//! Coarse whole-buffer facts used by the per-line checks

use crate::syntax::Language;

/// Summary of a buffer computed once per diagnostic pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMap {
    /// A program entry point (`fun main`, `static void main`, ...) exists
    pub has_entry_point: bool,
    /// A class/struct/interface declaration exists
    pub has_class: bool,
    /// Some function-like declaration exists
    pub has_function: bool,
    /// Smallest positive leading-indent width (tabs count as 4)
    pub min_indent: Option<usize>,
    /// Deepest `(`/`[`/`{` nesting seen
    pub max_depth: usize,
}

impl ContextMap {
    pub fn compute(text: &str, language: Language) -> Self {
        let mut ctx = ContextMap::default();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            ctx.has_entry_point |= is_entry_point(trimmed, language);
            ctx.has_class |= is_class_declaration(trimmed, language);
            ctx.has_function |= is_function_declaration(trimmed, language);

            let indent = indent_width(line);
            if indent > 0 {
                ctx.min_indent = Some(ctx.min_indent.map_or(indent, |m| m.min(indent)));
            }
        }

        let mut depth = 0usize;
        for ch in text.chars() {
            match ch {
                '(' | '[' | '{' => {
                    depth += 1;
                    ctx.max_depth = ctx.max_depth.max(depth);
                }
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        ctx
    }
}

/// Leading whitespace width, tabs counted as 4 columns
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Identifier-like words of a line
pub(crate) fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}

pub(crate) fn has_word(line: &str, word: &str) -> bool {
    words(line).any(|w| w == word)
}

fn is_entry_point(line: &str, language: Language) -> bool {
    match language {
        Language::Kotlin => line.contains("fun main"),
        Language::Java => line.contains("static void main"),
        Language::Python => line.contains("__name__") || line.starts_with("def main("),
        Language::Cpp | Language::C => {
            line.contains("main(") && (has_word(line, "int") || has_word(line, "void"))
        }
    }
}

fn is_class_declaration(line: &str, language: Language) -> bool {
    match language {
        Language::Kotlin => ["class", "interface", "object"]
            .iter()
            .any(|w| has_word(line, w)),
        Language::Java => ["class", "interface", "enum", "record"]
            .iter()
            .any(|w| has_word(line, w)),
        Language::Python => line.starts_with("class "),
        Language::Cpp => has_word(line, "class") || has_word(line, "struct"),
        Language::C => has_word(line, "struct"),
    }
}

fn is_function_declaration(line: &str, language: Language) -> bool {
    match language {
        Language::Kotlin => has_word(line, "fun"),
        Language::Python => line.starts_with("def ") || line.starts_with("async def "),
        Language::Java | Language::Cpp | Language::C => {
            let Some(paren) = line.find('(') else {
                return false;
            };
            let head: Vec<&str> = words(&line[..paren]).collect();
            let control = head
                .first()
                .is_some_and(|w| super::checks::CONTROL_KEYWORDS.contains(w));
            head.len() >= 2 && !control && (line.ends_with('{') || line.ends_with(')'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kotlin_context() {
        let text = "class Greeter {\n    fun greet() {\n        println(listOf(1)[0])\n    }\n}\n\nfun main() {}\n";
        let ctx = ContextMap::compute(text, Language::Kotlin);
        assert!(ctx.has_entry_point);
        assert!(ctx.has_class);
        assert!(ctx.has_function);
        assert_eq!(ctx.min_indent, Some(4));
        assert_eq!(ctx.max_depth, 4);
    }

    #[test]
    fn test_c_function_detection() {
        let ctx = ContextMap::compute("static int add(int a, int b) {\n}\n", Language::C);
        assert!(ctx.has_function);
        assert!(!ctx.has_entry_point);

        let ctx = ContextMap::compute("if (x) {\n}\n", Language::C);
        assert!(!ctx.has_function);
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(ContextMap::compute("", Language::Java), ContextMap::default());
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("\t  x"), 6);
        assert_eq!(indent_width("x"), 0);
    }
}
