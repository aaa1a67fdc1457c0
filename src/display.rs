//! Rendering of highlighted lines
//!
//! Turns labelled spans into styled terminal output: tabs are expanded by
//! display width, an optional gutter shows line numbers and lines can be
//! cut to a maximum width.

use std::io::Write;

use unicode_width::UnicodeWidthChar;

use crate::config::{Config, Theme};
use crate::error::Result;
use crate::syntax::{BbcodeMode, Span, StyleLabel};
use crate::terminal::Terminal;

/// Rendering options
#[derive(Debug, Clone)]
pub struct Display {
    theme: Theme,
    tab_width: usize,
    line_numbers: bool,
    max_width: Option<usize>,
}

impl Display {
    /// Display settings taken from the user configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme.clone(),
            tab_width: config.tab_width.max(1),
            line_numbers: config.show_line_numbers,
            max_width: None,
        }
    }

    /// Builder: show or hide the line-number gutter
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Builder: cut lines at `width` display columns
    pub fn with_max_width(mut self, width: Option<usize>) -> Self {
        self.max_width = width;
        self
    }

    /// Highlight and render a whole document
    pub fn render_document<W: Write, S: AsRef<str>>(
        &self,
        terminal: &mut Terminal<W>,
        mode: &BbcodeMode,
        lines: &[S],
    ) -> Result<()> {
        let gutter = lines.len().to_string().len();
        let mut state = mode.initial_state();
        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let result = mode.highlight_line(line, state);
            if self.line_numbers {
                terminal.set_dim(true)?;
                terminal.write_str(&format!("{:>gutter$} ", idx + 1))?;
                terminal.set_dim(false)?;
            }
            self.render_line(terminal, line, &result.spans)?;
            terminal.newline()?;
            state = result.end_state;
        }
        terminal.flush()
    }

    /// Render one line from its spans; bytes no span covers are plain
    pub fn render_line<W: Write>(
        &self,
        terminal: &mut Terminal<W>,
        text: &str,
        spans: &[Span],
    ) -> Result<()> {
        let mut col = 0;
        let mut pos = 0;
        for span in spans {
            if span.start > pos {
                if !self.write_run(terminal, &text[pos..span.start], StyleLabel::Plain, &mut col)? {
                    return Ok(());
                }
            }
            if !self.write_run(terminal, span.text(text), span.label, &mut col)? {
                return Ok(());
            }
            pos = span.end;
        }
        if pos < text.len() {
            self.write_run(terminal, &text[pos..], StyleLabel::Plain, &mut col)?;
        }
        Ok(())
    }

    /// Write one styled run; false once the width limit is reached
    fn write_run<W: Write>(
        &self,
        terminal: &mut Terminal<W>,
        run: &str,
        label: StyleLabel,
        col: &mut usize,
    ) -> Result<bool> {
        let limit = self.max_width.unwrap_or(usize::MAX);
        let mut out = String::with_capacity(run.len());
        let mut fits = true;
        for ch in run.chars() {
            if ch == '\t' {
                let next_stop = (*col / self.tab_width + 1) * self.tab_width;
                let stop = next_stop.min(limit);
                out.extend(std::iter::repeat(' ').take(stop - *col));
                *col = stop;
                if next_stop > limit {
                    fits = false;
                    break;
                }
                continue;
            }
            let width = UnicodeWidthChar::width(ch).unwrap_or(1);
            if *col + width > limit {
                fits = false;
                break;
            }
            out.push(ch);
            *col += width;
        }

        if !out.is_empty() {
            terminal.apply_style(&self.theme.style_for(label))?;
            terminal.write_str(&out)?;
            terminal.reset_attributes()?;
        }
        Ok(fits)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Write one line per token: `line:start-end label "text"`
pub fn dump_tokens<W: Write, S: AsRef<str>>(
    out: &mut W,
    mode: &BbcodeMode,
    lines: &[S],
) -> Result<()> {
    let mut state = mode.initial_state();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let result = mode.highlight_line(line, state);
        for span in &result.spans {
            writeln!(
                out,
                "{}:{}-{} {} {:?}",
                idx + 1,
                span.start,
                span.end,
                span.label.name(),
                span.text(line)
            )?;
        }
        state = result.end_state;
    }
    Ok(())
}
