//! Styled terminal output using crossterm

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use lintpad::syntax::{Color, DiagnosticOverlay, Span, Style};
use lintpad::diagnostics::LineIndex;
use lintpad::{Diagnostic, Result, Severity};

/// Map a palette color to crossterm's
fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Error => Style::fg(Color::BrightRed).with_bold(),
        Severity::Warning => Style::fg(Color::BrightYellow).with_bold(),
        Severity::Info => Style::fg(Color::BrightBlue).with_bold(),
    }
}

/// Writer for highlighted buffers and diagnostic reports
pub struct Terminal<W: Write> {
    out: W,
    /// Emit ANSI styling
    color: bool,
}

impl Terminal<io::StdoutLock<'static>> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout().lock(), color)
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Print `text` styled by its spans, with diagnostic backgrounds laid over them
    pub fn print_buffer(
        &mut self,
        text: &str,
        spans: &[Span],
        overlays: &[DiagnosticOverlay],
    ) -> Result<()> {
        for span in spans {
            let mut style = span.style();
            if let Some(overlay) = overlays.iter().find(|o| o.range.contains(&span.start)) {
                style.bg = overlay.style.bg;
            }
            // Keep backgrounds from bleeding past the end of a line
            let mut pieces = span.text(text).split('\n');
            if let Some(first) = pieces.next() {
                self.write_styled(first, style)?;
            }
            for piece in pieces {
                queue!(self.out, Print('\n'))?;
                self.write_styled(piece, style)?;
            }
        }
        if !text.ends_with('\n') && !text.is_empty() {
            queue!(self.out, Print('\n'))?;
        }
        Ok(())
    }

    /// Print one diagnostic with its source line and a caret under the column.
    /// `index` is built once per buffer and shared across the report.
    pub fn print_diagnostic(
        &mut self,
        path: &str,
        text: &str,
        index: &LineIndex,
        diagnostic: &Diagnostic,
    ) -> Result<()> {
        self.write_styled(diagnostic.severity.as_str(), severity_style(diagnostic.severity))?;
        queue!(
            self.out,
            Print(format!(
                ": {} [{}]\n  --> {}:{}:{}\n",
                diagnostic.message,
                diagnostic.kind,
                path,
                diagnostic.line,
                diagnostic.column + 1
            ))
        )?;

        if let Some(range) = diagnostic.range_in(text, index) {
            let line = &text[range];
            let prefix = line.get(..diagnostic.column).unwrap_or(line);
            let pad = " ".repeat(prefix.width());
            queue!(self.out, Print(format!("   | {}\n   | {}", line, pad)))?;
            self.write_styled("^", severity_style(diagnostic.severity))?;
            queue!(self.out, Print('\n'))?;
        }

        if let Some(suggestion) = &diagnostic.suggestion {
            queue!(self.out, Print(format!("   = help: {}\n", suggestion)))?;
        }
        Ok(())
    }

    /// Print the closing count line
    pub fn print_summary(&mut self, diagnostics: &[Diagnostic]) -> Result<()> {
        let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
        queue!(
            self.out,
            Print(format!(
                "{} error(s), {} warning(s), {} note(s)\n",
                count(Severity::Error),
                count(Severity::Warning),
                count(Severity::Info)
            ))
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn write_styled(&mut self, text: &str, style: Style) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if !self.color || style.is_default() {
            queue!(self.out, Print(text))?;
            return Ok(());
        }

        if style.fg != Color::Default {
            queue!(self.out, SetForegroundColor(to_crossterm(style.fg)))?;
        }
        if style.bg != Color::Default {
            queue!(self.out, SetBackgroundColor(to_crossterm(style.bg)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintpad::{Language, SyntaxManager};

    fn render(text: &str, language: Language, color: bool) -> String {
        let mut manager = SyntaxManager::default();
        let spans = manager.highlight(text, language);
        let mut term = Terminal::new(Vec::new(), color);
        term.print_buffer(text, &spans, &manager.diagnostic_overlays())
            .unwrap();
        let index = LineIndex::new(text);
        for d in manager.last_diagnostics() {
            term.print_diagnostic("test.c", text, &index, d).unwrap();
        }
        String::from_utf8(term.out).unwrap()
    }

    #[test]
    fn test_plain_output_reproduces_text() {
        let text = "#include <stdio.h>\nint main() {\n    return 0;\n}\n";
        let out = render(text, Language::C, false);
        assert_eq!(out, text);
    }

    #[test]
    fn test_diagnostic_caret_alignment() {
        let text = "#include <stdio.h>\nint é = 1\n";
        let out = render(text, Language::C, false);
        assert!(out.contains("error: Missing terminator: expected ';' [missing_semicolon]"));
        assert!(out.contains("--> test.c:2:11"));
        // "int é = 1" is 9 columns wide even though it is 10 bytes
        assert!(out.contains(&format!("   | int é = 1\n   | {}^\n", " ".repeat(9))));
        assert!(out.contains("= help: Add ';'"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let out = render("int x = 1;\n", Language::C, true);
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_summary() {
        let mut term = Terminal::new(Vec::new(), false);
        let diagnostics = vec![
            Diagnostic::new(1, 0, Severity::Error, "missing_include", "m"),
            Diagnostic::new(2, 0, Severity::Info, "no_entry_point", "m"),
        ];
        term.print_summary(&diagnostics).unwrap();
        assert_eq!(
            String::from_utf8(term.out).unwrap(),
            "1 error(s), 0 warning(s), 1 note(s)\n"
        );
    }
}
