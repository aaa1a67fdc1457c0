//! Styled terminal output using crossterm

use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    tty::IsTty,
};

use crate::error::Result;
use crate::syntax::{Color, Style};

/// Writer that turns styles into terminal escape sequences
///
/// With color disabled every styling call is a no-op, so the same
/// rendering code produces plain text for pipes and files.
pub struct Terminal<W: Write> {
    out: W,
    color: bool,
}

impl Terminal<Stdout> {
    /// Terminal on stdout, with color only if stdout is a tty
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_tty();
        Self { out, color }
    }
}

impl<W: Write> Terminal<W> {
    /// Wrap any writer
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Whether escape sequences are emitted
    pub fn color(&self) -> bool {
        self.color
    }

    /// Force color on or off
    pub fn set_color(&mut self, enabled: bool) {
        self.color = enabled;
    }

    /// Switch to `style` for subsequent output
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        if !self.color || style.is_default() {
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
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Set dim/faint mode (for line numbers)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        if !self.color {
            return Ok(());
        }
        if enabled {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        } else {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        if self.color {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    /// Write a string at the current position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Write a single character
    pub fn write_char(&mut self, ch: char) -> Result<()> {
        queue!(self.out, Print(ch))?;
        Ok(())
    }

    /// End the current line
    pub fn newline(&mut self) -> Result<()> {
        self.write_char('\n')
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Map the 16-color palette onto crossterm's names
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

#[cfg(test)]
mod tests {
    use super::*;

    fn output(term: Terminal<Vec<u8>>) -> String {
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let mut term = Terminal::new(Vec::new(), false);
        term.apply_style(&Style::fg(Color::Red).with_bold()).unwrap();
        term.write_str("hi").unwrap();
        term.reset_attributes().unwrap();
        term.newline().unwrap();
        assert_eq!(output(term), "hi\n");
    }

    #[test]
    fn test_color_output_has_escapes() {
        let mut term = Terminal::new(Vec::new(), true);
        term.apply_style(&Style::fg(Color::Red)).unwrap();
        term.write_str("hi").unwrap();
        term.reset_attributes().unwrap();
        let out = output(term);
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("hi"));
    }

    #[test]
    fn test_default_style_emits_nothing() {
        let mut term = Terminal::new(Vec::new(), true);
        term.apply_style(&Style::default()).unwrap();
        assert_eq!(output(term), "");
    }

    #[test]
    fn test_palette_mapping() {
        assert_eq!(to_crossterm(Color::Default), style::Color::Reset);
        assert_eq!(to_crossterm(Color::BrightRed), style::Color::Red);
        assert_eq!(to_crossterm(Color::Red), style::Color::DarkRed);
    }
}
