//! Span categories for syntax highlighting
//!
//! This module defines the lexical categories the tokenizer assigns
//! and their default visual styles.

use super::style::{Color, Style};

/// Lexical category of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Reserved words of the active language
    Keyword,
    /// String and character literals
    String,
    /// Line and block comments
    Comment,
    /// Numeric literals
    Number,
    /// Identifiers immediately followed by `(`
    Function,
    /// Capitalized identifiers
    Type,
    /// Single operator characters
    Operator,
    /// Everything else
    Normal,
}

impl Category {
    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Comment => Style::fg(Color::BrightBlack).with_italic(),
            Category::String => Style::fg(Color::Green),
            Category::Number => Style::fg(Color::Cyan),
            Category::Keyword => Style::fg(Color::Magenta).with_bold(),
            Category::Type => Style::fg(Color::Yellow),
            Category::Function => Style::fg(Color::Blue),
            Category::Operator => Style::fg(Color::BrightWhite),
            Category::Normal => Style::default(),
        }
    }
}
