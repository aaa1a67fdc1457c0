//! Style types for text rendering
//!
//! Styles are what a host renders; spans tie a style label to a byte range
//! of one line.

use super::tokens::StyleLabel;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from its kebab-case name (`bright-blue`, `red`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.trim().to_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set reverse
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Parse a theme entry such as `"bold:bright-blue"` or `"underline:italic:red"`.
    ///
    /// Modifier prefixes are separated from the color by `:`; the color
    /// always comes last. `on-<color>` sets the background.
    pub fn parse(desc: &str) -> Option<Self> {
        let mut parts: Vec<&str> = desc.split(':').map(str::trim).collect();
        let color = Color::from_name(parts.pop()?)?;
        let mut style = Style::fg(color);
        for modifier in parts {
            let modifier = modifier.to_lowercase();
            style = match modifier.as_str() {
                "bold" => style.with_bold(),
                "italic" => style.with_italic(),
                "underline" => style.with_underline(),
                "reverse" => style.with_reverse(),
                other => match other.strip_prefix("on-") {
                    Some(bg) => style.with_bg(Color::from_name(bg)?),
                    None => return None,
                },
            };
        }
        Some(style)
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A labelled span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Semantic label assigned by the grammar
    pub label: StyleLabel,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, label: StyleLabel) -> Self {
        Self { start, end, label }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The slice of `line` this span covers
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_bg(Color::Blue);
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Blue);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_color_names() {
        assert_eq!(Color::from_name("bright-blue"), Some(Color::BrightBlue));
        assert_eq!(Color::from_name("Bright_Blue"), Some(Color::BrightBlue));
        assert_eq!(Color::from_name("grey"), Some(Color::BrightBlack));
        assert_eq!(Color::from_name("mauve"), None);
    }

    #[test]
    fn test_style_parse_with_modifiers() {
        let style = Style::parse("bold:underline:cyan").unwrap();
        assert_eq!(style.fg, Color::Cyan);
        assert!(style.bold);
        assert!(style.underline);
        assert!(!style.italic);

        assert_eq!(Style::parse("red"), Some(Style::fg(Color::Red)));
        assert_eq!(Style::parse("blink:red"), None);
        assert_eq!(Style::parse("bold:"), None);

        let highlighted = Style::parse("bold:on-bright-red:white").unwrap();
        assert_eq!(highlighted, Style::fg(Color::White).with_bg(Color::BrightRed).with_bold());
        assert_eq!(Style::parse("on-puce:white"), None);
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 10, StyleLabel::TagName);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
        assert_eq!(span.text("[url][link]"), "[link");
    }
}
