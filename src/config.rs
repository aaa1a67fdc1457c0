//! Configuration file support
//!
//! Loads settings from ~/.bbhl.toml (or %USERPROFILE%\.bbhl.toml on Windows)
//!
//! Example:
//! ```text
//! # bbhl configuration
//! strict-matching = true
//! comment-tag = "comment"
//! tab-width = 4
//! line-numbers = true
//!
//! [theme]
//! tag-name = "bold:bright-blue"
//! attribute-value = "green"
//! error = "bold:on-red:bright-white"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{HighlightError, Result};
use crate::syntax::{Style, StyleLabel};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether closing tag names must match their opening tag
    pub strict_matching: bool,
    /// Tag name used for block comments
    pub comment_tag: String,
    /// Tab width for display
    pub tab_width: usize,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Style overrides per label
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_matching: true,
            comment_tag: "comment".to_string(),
            tab_width: 8,
            show_line_numbers: false,
            theme: Theme::default(),
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
                .map(|home| PathBuf::from(home).join(".bbhl.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".bbhl.toml"))
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing file means defaults; a broken one is logged and ignored.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Config::default(),
        }
    }

    /// Load `path` if it exists, falling back to defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from an explicit file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text, starting from defaults
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) -> Result<()> {
        for (key, value) in table {
            match key.as_str() {
                "strict-matching" => self.strict_matching = expect_bool(key, value)?,
                "line-numbers" => self.show_line_numbers = expect_bool(key, value)?,
                "tab-width" => {
                    let width = value
                        .as_integer()
                        .ok_or_else(|| type_error(key, "an integer"))?;
                    self.tab_width = width.clamp(1, 16) as usize;
                }
                "comment-tag" => {
                    let tag = value.as_str().ok_or_else(|| type_error(key, "a string"))?;
                    self.comment_tag = validate_comment_tag(tag)?;
                }
                "theme" => {
                    let theme = value.as_table().ok_or_else(|| type_error(key, "a table"))?;
                    self.theme.apply(theme)?;
                }
                other => log::warn!("unknown config key: {}", other),
            }
        }
        Ok(())
    }
}

/// Styles per label, falling back to each label's default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    overrides: HashMap<StyleLabel, Style>,
}

impl Theme {
    /// Style to render `label` with
    pub fn style_for(&self, label: StyleLabel) -> Style {
        self.overrides
            .get(&label)
            .copied()
            .unwrap_or_else(|| label.default_style())
    }

    /// Override the style of one label
    pub fn set(&mut self, label: StyleLabel, style: Style) {
        self.overrides.insert(label, style);
    }

    fn apply(&mut self, table: &Table) -> Result<()> {
        for (name, value) in table {
            let label = StyleLabel::from_name(name)
                .ok_or_else(|| HighlightError::UnknownStyle(name.clone()))?;
            let desc = value
                .as_str()
                .ok_or_else(|| type_error(&format!("theme.{name}"), "a string"))?;
            let style =
                Style::parse(desc).ok_or_else(|| HighlightError::UnknownColor(desc.to_string()))?;
            self.set(label, style);
        }
        Ok(())
    }
}

fn expect_bool(key: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| type_error(key, "a boolean"))
}

fn type_error(key: &str, expected: &str) -> HighlightError {
    HighlightError::Config(format!("'{key}' must be {expected}"))
}

/// A comment tag must itself lex as a single tag name
fn validate_comment_tag(tag: &str) -> Result<String> {
    let tag = tag.trim();
    let valid = !tag.is_empty()
        && !tag
            .chars()
            .any(|ch| matches!(ch, '[' | ']' | '=' | '/') || ch.is_whitespace());
    if valid {
        Ok(tag.to_string())
    } else {
        Err(HighlightError::Config(format!(
            "'comment-tag' is not a usable tag name: {tag:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Color;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
strict-matching = false
comment-tag = "note"
tab-width = 4
line-numbers = true
        "#;

        let config = Config::parse(contents).unwrap();
        assert!(!config.strict_matching);
        assert_eq!(config.comment_tag, "note");
        assert_eq!(config.tab_width, 4);
        assert!(config.show_line_numbers);
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.strict_matching);
        assert_eq!(config.comment_tag, "comment");
        assert_eq!(config.tab_width, 8);
        assert!(!config.show_line_numbers);
    }

    #[test]
    fn test_tab_width_clamped() {
        assert_eq!(Config::parse("tab-width = 0").unwrap().tab_width, 1);
        assert_eq!(Config::parse("tab-width = 99").unwrap().tab_width, 16);
    }

    #[test]
    fn test_type_errors() {
        assert!(matches!(
            Config::parse("strict-matching = \"yes\""),
            Err(HighlightError::Config(_))
        ));
        assert!(matches!(Config::parse("tab-width = 4.5"), Err(HighlightError::Config(_))));
        assert!(matches!(Config::parse("= broken"), Err(HighlightError::Toml(_))));
    }

    #[test]
    fn test_comment_tag_validation() {
        assert!(Config::parse("comment-tag = \"a b\"").is_err());
        assert!(Config::parse("comment-tag = \"[x]\"").is_err());
        assert!(Config::parse("comment-tag = \"\"").is_err());
        assert_eq!(Config::parse("comment-tag = \" ooc \"").unwrap().comment_tag, "ooc");
    }

    #[test]
    fn test_theme() {
        let contents = r#"
[theme]
tag-name = "bold:magenta"
attribute-value = "cyan"
        "#;
        let config = Config::parse(contents).unwrap();
        let tag = config.theme.style_for(StyleLabel::TagName);
        assert_eq!(tag.fg, Color::Magenta);
        assert!(tag.bold);
        assert_eq!(config.theme.style_for(StyleLabel::AttributeValue).fg, Color::Cyan);
        let config = Config::parse("[theme]\nerror = \"on-red:white\"").unwrap();
        assert_eq!(config.theme.style_for(StyleLabel::Error).bg, Color::Red);
        assert_eq!(
            config.theme.style_for(StyleLabel::TagBracket),
            StyleLabel::TagBracket.default_style()
        );
    }

    #[test]
    fn test_theme_errors() {
        assert!(matches!(
            Config::parse("[theme]\nkeyword = \"red\""),
            Err(HighlightError::UnknownStyle(name)) if name == "keyword"
        ));
        assert!(matches!(
            Config::parse("[theme]\ntag-name = \"puce\""),
            Err(HighlightError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = std::env::temp_dir();
        let missing = dir.join("bbhl-definitely-missing.toml");
        assert!(Config::load_or_default(&missing).strict_matching);

        let broken = dir.join(format!("bbhl-broken-{}.toml", std::process::id()));
        fs::write(&broken, "strict-matching = false\n[theme]\ntag-name = \"puce\"\n").unwrap();
        let config = Config::load_or_default(&broken);
        fs::remove_file(&broken).unwrap();
        assert!(config.strict_matching);
        assert_eq!(config.comment_tag, "comment");
    }

    #[test]
    fn test_from_file_missing() {
        let path = std::env::temp_dir().join("bbhl-definitely-missing.toml");
        assert!(matches!(Config::from_file(&path), Err(HighlightError::Io(_))));
    }
}
