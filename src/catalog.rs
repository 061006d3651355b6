//! Rule catalog
//!
//! Keywords and diagnostic rules per language, read from a TOML document:
//!
//! ```toml
//! [keywords]
//! kotlin = ["fun", "val", "var"]
//!
//! [[rules.kotlin]]
//! type = "function_syntax"
//! message = "Function declaration is missing its parameter list"
//! severity = "error"
//! pattern = { regex = '\bfun\s+\w+\s*$' }
//! ```
//!
//! The source is read once, on first use, and cached until
//! [`RuleCatalog::invalidate`]. Bad entries are skipped one at a time; an
//! unreadable or malformed document falls back to the built-in rules.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::syntax::builtin;
use crate::syntax::rules::{severity_from_catalog, DiagnosticRule};
use crate::syntax::Language;

/// Where a catalog comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Built-in keywords and fallback rules only
    Builtin,
    /// A TOML file on disk
    File(PathBuf),
    /// A TOML document held in memory
    Inline(String),
}

#[derive(Debug)]
struct LanguageEntry {
    keywords: HashSet<String>,
    rules: Vec<DiagnosticRule>,
}

#[derive(Debug)]
struct CatalogData {
    entries: Vec<LanguageEntry>,
}

impl CatalogData {
    fn builtin() -> Self {
        Self {
            entries: Language::ALL
                .iter()
                .map(|&lang| LanguageEntry {
                    keywords: builtin::keywords(lang),
                    rules: builtin::fallback_rules(lang),
                })
                .collect(),
        }
    }

    fn rule_count(&self) -> usize {
        self.entries.iter().map(|e| e.rules.len()).sum()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    keywords: HashMap<String, toml::Value>,
    #[serde(default)]
    rules: HashMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    kind: String,
    message: String,
    #[serde(default)]
    severity: String,
    pattern: RawPattern,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Plain(String),
    Nested { regex: String },
}

impl RawPattern {
    fn regex(&self) -> &str {
        match self {
            RawPattern::Plain(regex) | RawPattern::Nested { regex } => regex,
        }
    }
}

/// Cached, language-keyed keywords and rules
#[derive(Debug)]
pub struct RuleCatalog {
    source: CatalogSource,
    data: OnceLock<CatalogData>,
}

impl RuleCatalog {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            data: OnceLock::new(),
        }
    }

    /// Catalog made of the built-in rules only
    pub fn builtin() -> Self {
        Self::new(CatalogSource::Builtin)
    }

    /// Catalog read lazily from a TOML file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(CatalogSource::File(path.into()))
    }

    /// Catalog parsed lazily from an in-memory TOML document
    pub fn from_toml_str(document: impl Into<String>) -> Self {
        Self::new(CatalogSource::Inline(document.into()))
    }

    /// Catalog named by the configuration, built-in when none is set
    pub fn from_config(config: &Config) -> Self {
        match &config.catalog_path {
            Some(path) => Self::from_path(path.clone()),
            None => Self::builtin(),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Whether the source has been read yet
    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    /// Reserved words for `language`
    pub fn keywords(&self, language: Language) -> &HashSet<String> {
        &self.data().entries[language.index()].keywords
    }

    /// Diagnostic rules for `language`, in catalog order
    pub fn rules(&self, language: Language) -> &[DiagnosticRule] {
        &self.data().entries[language.index()].rules
    }

    /// Drop the cached data; the next lookup reads the source again
    pub fn invalidate(&mut self) {
        self.data = OnceLock::new();
    }

    fn data(&self) -> &CatalogData {
        self.data.get_or_init(|| {
            let data = self.load();
            info!(
                rules = data.rule_count(),
                source = ?self.source,
                "rule catalog loaded"
            );
            data
        })
    }

    fn load(&self) -> CatalogData {
        let document = match self.read_source() {
            Ok(Some(document)) => document,
            Ok(None) => return CatalogData::builtin(),
            Err(e) => {
                warn!("rule catalog unreadable, using built-in rules: {}", e);
                return CatalogData::builtin();
            }
        };

        match parse_catalog(&document) {
            Ok(Some(data)) => data,
            Ok(None) => {
                warn!("rule catalog is empty, using built-in rules");
                CatalogData::builtin()
            }
            Err(e) => {
                warn!("rule catalog malformed, using built-in rules: {}", e);
                CatalogData::builtin()
            }
        }
    }

    fn read_source(&self) -> Result<Option<String>> {
        match &self.source {
            CatalogSource::Builtin => Ok(None),
            CatalogSource::File(path) => Ok(Some(fs::read_to_string(path)?)),
            CatalogSource::Inline(document) => Ok(Some(document.clone())),
        }
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Parse a catalog document; `None` when it defines nothing at all
fn parse_catalog(document: &str) -> Result<Option<CatalogData>> {
    let raw: RawCatalog = toml::from_str(document)?;
    if raw.keywords.is_empty() && raw.rules.is_empty() {
        return Ok(None);
    }

    let mut data = CatalogData {
        entries: Language::ALL
            .iter()
            .map(|&lang| LanguageEntry {
                keywords: builtin::keywords(lang),
                rules: Vec::new(),
            })
            .collect(),
    };

    for (name, value) in &raw.keywords {
        let Some(lang) = known_language(name) else {
            continue;
        };
        let Some(list) = value.as_array() else {
            warn!(language = %lang, "keyword entry is not a list, keeping built-in keywords");
            continue;
        };
        data.entries[lang.index()].keywords = list
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect();
    }

    for (name, value) in &raw.rules {
        let Some(lang) = known_language(name) else {
            continue;
        };
        let Some(list) = value.as_array() else {
            warn!(language = %lang, "rule entry is not a list, skipping");
            continue;
        };
        let rules = &mut data.entries[lang.index()].rules;
        rules.extend(list.iter().filter_map(|entry| compile_rule(lang, entry)));
    }

    Ok(Some(data))
}

fn known_language(name: &str) -> Option<Language> {
    let lang = name.parse::<Language>().ok();
    if lang.is_none() {
        warn!("rule catalog names unknown language '{}', ignoring", name);
    }
    lang
}

fn compile_rule(language: Language, entry: &toml::Value) -> Option<DiagnosticRule> {
    let raw: RawRule = match entry.clone().try_into() {
        Ok(raw) => raw,
        Err(e) => {
            warn!(language = %language, "skipping malformed rule: {}", e);
            return None;
        }
    };
    let severity = severity_from_catalog(&raw.severity);
    match DiagnosticRule::new(&raw.kind, raw.pattern.regex(), &raw.message, severity) {
        Ok(rule) => {
            debug!(language = %language, kind = %rule.kind, "rule compiled");
            Some(rule)
        }
        Err(e) => {
            warn!(language = %language, "skipping rule: {}", e);
            None
        }
    }
}
