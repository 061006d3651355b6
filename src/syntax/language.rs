//! Supported languages
//!
//! The language set is closed, so per-language behavior is a `match`
//! over [`Language`] rather than a table of trait objects.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::LintpadError;

/// A language the editor core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Kotlin,
    Java,
    Python,
    Cpp,
    C,
}

impl Language {
    /// Every supported language, default first
    pub const ALL: [Language; 5] = [
        Language::Kotlin,
        Language::Java,
        Language::Python,
        Language::Cpp,
        Language::C,
    ];

    /// Position in [`Language::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase identifier used in catalogs and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Language::Kotlin => "kotlin",
            Language::Java => "java",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::C => "c",
        }
    }

    /// File extensions mapped to this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Kotlin => &["kt", "kts"],
            Language::Java => &["java"],
            Language::Python => &["py"],
            Language::Cpp => &["cpp", "cc", "cxx", "c++"],
            Language::C => &["c", "h"],
        }
    }

    /// Language for a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Line comment opener
    pub fn line_comment(&self) -> &'static str {
        match self {
            Language::Python => "#",
            _ => "//",
        }
    }

    /// Whether `/* ... */` comments exist
    pub fn has_block_comments(&self) -> bool {
        !matches!(self, Language::Python)
    }

    /// C and C++ share the preprocessor checks
    pub fn is_c_family(&self) -> bool {
        matches!(self, Language::Cpp | Language::C)
    }

    /// Languages whose statements end in `;`
    pub fn uses_terminators(&self) -> bool {
        matches!(self, Language::Java | Language::Cpp | Language::C)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = LintpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "kotlin" | "kt" => Ok(Language::Kotlin),
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            "cpp" | "c++" => Ok(Language::Cpp),
            "c" => Ok(Language::C),
            _ => Err(LintpadError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Detect the language of a buffer
///
/// The file extension wins when it is known; otherwise the content is
/// sniffed for characteristic idioms. Falls back to [`Language::default`].
pub fn detect_language(filename: &str, content: &str) -> Language {
    let by_extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension);

    by_extension
        .or_else(|| sniff_content(content))
        .unwrap_or_default()
}

fn sniff_content(content: &str) -> Option<Language> {
    if content.contains("#include <iostream>")
        || content.contains("std::")
        || content.contains("cout <<")
    {
        return Some(Language::Cpp);
    }
    if content.contains("#include") {
        return Some(Language::C);
    }
    if content.contains("public static void main") || content.contains("System.out.print") {
        return Some(Language::Java);
    }
    if content.contains("fun main") || content.contains("println(") {
        return Some(Language::Kotlin);
    }
    let pythonic = content.lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with("def ")
            || trimmed.starts_with("print(")
            || (trimmed.starts_with("import ") && !trimmed.ends_with(';'))
    });
    if pythonic || content.contains("__name__") {
        return Some(Language::Python);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_language("Main.kt", ""), Language::Kotlin);
        assert_eq!(detect_language("build.kts", ""), Language::Kotlin);
        assert_eq!(detect_language("App.java", ""), Language::Java);
        assert_eq!(detect_language("script.py", ""), Language::Python);
        assert_eq!(detect_language("main.cpp", ""), Language::Cpp);
        assert_eq!(detect_language("main.CC", ""), Language::Cpp);
        assert_eq!(detect_language("lib.c++", ""), Language::Cpp);
        assert_eq!(detect_language("main.c", ""), Language::C);
        assert_eq!(detect_language("stdio.h", ""), Language::C);
    }

    #[test]
    fn test_extension_beats_content() {
        let content = "#include <stdio.h>\nint main() { return 0; }";
        assert_eq!(detect_language("misnamed.py", content), Language::Python);
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(
            detect_language("scratch", "#include <iostream>\nint main() {}"),
            Language::Cpp
        );
        assert_eq!(
            detect_language("scratch", "#include <stdio.h>\nint main() {}"),
            Language::C
        );
        assert_eq!(
            detect_language("scratch", "class A { public static void main(String[] a) {} }"),
            Language::Java
        );
        assert_eq!(
            detect_language("scratch", "def greet(name):\n    print(name)\n"),
            Language::Python
        );
        assert_eq!(
            detect_language("scratch", "fun main() {\n    println(\"hi\")\n}"),
            Language::Kotlin
        );
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(detect_language("README", ""), Language::Kotlin);
        assert_eq!(detect_language("notes.txt", "just some prose"), Language::Kotlin);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Python".parse::<Language>().ok(), Some(Language::Python));
        assert_eq!("c++".parse::<Language>().ok(), Some(Language::Cpp));
        assert!("cobol".parse::<Language>().is_err());
    }
}
