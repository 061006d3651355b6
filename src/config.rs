//! Configuration file support
//!
//! Loads settings from ~/.lintpad.conf (or %USERPROFILE%\.lintpad.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # lintpad configuration
//! catalog = /home/me/.config/lintpad/rules.toml
//! undo-limit = 200
//! debounce-ms = 400
//! checkpoint-idle-ms = 2000
//! checkpoint-min-chars = 3
//! diagnostics = true
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::history::HistoryLimits;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// TOML rule catalog; built-in rules when unset
    pub catalog_path: Option<PathBuf>,
    /// Maximum number of undo checkpoints
    pub undo_limit: usize,
    /// Quiet period after the last edit before a checkpoint is considered
    pub debounce_ms: u64,
    /// Idle time after which any edit is a new checkpoint
    pub checkpoint_idle_ms: u64,
    /// Character-count change that always makes a new checkpoint
    pub checkpoint_min_chars: usize,
    /// Whether highlighting also runs the diagnostic pass
    pub diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            undo_limit: 100,
            debounce_ms: 500,
            checkpoint_idle_ms: 2000,
            checkpoint_min_chars: 3,
            diagnostics: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".lintpad.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".lintpad.conf"))
        }
    }

    /// Load configuration from file
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                debug!(path = %path.display(), "loading configuration");
                config.apply(&Self::parse(&contents));
            }
        }

        config
    }

    /// Build configuration from file contents
    pub fn from_str_contents(contents: &str) -> Self {
        let mut config = Config::default();
        config.apply(&Self::parse(contents));
        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("catalog") {
            self.catalog_path = (!value.is_empty()).then(|| PathBuf::from(value));
        }

        if let Some(value) = settings.get("undo-limit") {
            if let Ok(n) = value.parse::<usize>() {
                self.undo_limit = n.clamp(1, 10_000);
            }
        }

        if let Some(value) = settings.get("debounce-ms") {
            if let Ok(n) = value.parse::<u64>() {
                self.debounce_ms = n.clamp(50, 5_000);
            }
        }

        if let Some(value) = settings.get("checkpoint-idle-ms") {
            if let Ok(n) = value.parse::<u64>() {
                self.checkpoint_idle_ms = n;
            }
        }

        if let Some(value) = settings.get("checkpoint-min-chars") {
            if let Ok(n) = value.parse::<usize>() {
                self.checkpoint_min_chars = n.max(1);
            }
        }

        if let Some(value) = settings.get("diagnostics") {
            self.diagnostics = parse_bool(value);
        }
    }

    /// History limits derived from these settings
    pub fn history_limits(&self) -> HistoryLimits {
        HistoryLimits {
            max_undo: self.undo_limit,
            min_char_delta: self.checkpoint_min_chars,
            idle_threshold: Duration::from_millis(self.checkpoint_idle_ms),
        }
    }

    /// Debounce period for checkpointing
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
