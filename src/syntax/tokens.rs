//! Style labels for BBCode highlighting
//!
//! This module defines the semantic categories the grammar assigns to
//! each token, and their default visual styles.

use super::style::{Color, Style};

/// Semantic highlight category for one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleLabel {
    /// Plain text and whitespace (never styled)
    Plain,
    /// `[`, `[/` and `]`
    TagBracket,
    /// The name of an opening or matched closing tag
    TagName,
    /// A closing tag name with no open tag to close
    TagNameError,
    /// The `=` introducing an attribute value
    AttributeName,
    /// The attribute value itself
    AttributeValue,
    /// Any token the grammar did not expect in its position
    Error,
    /// A closing tag name that does not match the innermost open tag
    TagNameAndError,
}

impl StyleLabel {
    /// All labels, in declaration order
    pub const ALL: [StyleLabel; 8] = [
        StyleLabel::Plain,
        StyleLabel::TagBracket,
        StyleLabel::TagName,
        StyleLabel::TagNameError,
        StyleLabel::AttributeName,
        StyleLabel::AttributeValue,
        StyleLabel::Error,
        StyleLabel::TagNameAndError,
    ];

    /// Get the default style for this label
    pub fn default_style(&self) -> Style {
        match self {
            StyleLabel::Plain => Style::default(),
            StyleLabel::TagBracket => Style::fg(Color::BrightBlack),
            StyleLabel::TagName => Style::fg(Color::Blue).with_bold(),
            StyleLabel::TagNameError => Style::fg(Color::Red).with_bold(),
            StyleLabel::AttributeName => Style::fg(Color::Yellow),
            StyleLabel::AttributeValue => Style::fg(Color::Green),
            StyleLabel::Error => Style::fg(Color::BrightRed).with_underline(),
            StyleLabel::TagNameAndError => Style::fg(Color::Red).with_bold().with_underline(),
        }
    }

    /// Whether this label marks malformed markup
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StyleLabel::TagNameError | StyleLabel::Error | StyleLabel::TagNameAndError
        )
    }

    /// Get the kebab-case name for this label (used in themes and token dumps)
    pub fn name(&self) -> &'static str {
        match self {
            StyleLabel::Plain => "plain",
            StyleLabel::TagBracket => "tag-bracket",
            StyleLabel::TagName => "tag-name",
            StyleLabel::TagNameError => "tag-name-error",
            StyleLabel::AttributeName => "attribute-name",
            StyleLabel::AttributeValue => "attribute-value",
            StyleLabel::Error => "error",
            StyleLabel::TagNameAndError => "tag-name-and-error",
        }
    }

    /// Parse a label from its name (for TOML theme loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.name() == name)
    }
}
