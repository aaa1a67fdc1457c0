//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that owns the BBCode mode and
//! one incremental highlight cache per open document.

use std::collections::HashMap;

use super::mode::{BbcodeMode, ParseState};
use super::style::Span;

/// Cached highlighting for one line
#[derive(Debug, Clone, Default)]
struct LineEntry {
    /// State the spans were computed from
    start: ParseState,
    /// State left at the end of the line
    end: ParseState,
    /// Spans, or None if the line was never highlighted
    spans: Option<Vec<Span>>,
    /// Text changed since the spans were computed
    dirty: bool,
}

impl LineEntry {
    fn fresh() -> Self {
        Self {
            dirty: true,
            ..Default::default()
        }
    }
}

/// Per-document highlighting cache
///
/// Lines before `invalid_from` are known to be up to date. Lines after it
/// are re-highlighted on the next refresh only if their text changed or the
/// state flowing into them differs from the one they were computed with, so
/// an edit that does not change the carried state stops costing anything
/// one line later.
#[derive(Debug, Default)]
pub struct HighlightCache {
    lines: Vec<LineEntry>,
    invalid_from: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines tracked
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are tracked
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First line that may need recomputation
    pub fn invalid_from(&self) -> usize {
        self.invalid_from
    }

    /// Mark `count` lines starting at `first` as edited in place
    pub fn lines_changed(&mut self, first: usize, count: usize) {
        let end = first.saturating_add(count).min(self.lines.len());
        for entry in self.lines.iter_mut().take(end).skip(first) {
            entry.dirty = true;
        }
        self.invalidate_from(first);
    }

    /// Record `count` new lines inserted before line `at`
    pub fn lines_inserted(&mut self, at: usize, count: usize) {
        let at = at.min(self.lines.len());
        let _ = self
            .lines
            .splice(at..at, std::iter::repeat_with(LineEntry::fresh).take(count));
        self.invalidate_from(at);
    }

    /// Record `count` lines removed starting at line `at`
    pub fn lines_removed(&mut self, at: usize, count: usize) {
        let at = at.min(self.lines.len());
        let end = at.saturating_add(count).min(self.lines.len());
        self.lines.drain(at..end);
        self.invalidate_from(at);
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        self.invalid_from = self.invalid_from.min(line);
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.invalid_from = 0;
        self.lines.clear();
    }

    /// Spans of an up-to-date line
    pub fn spans(&self, line: usize) -> Option<&[Span]> {
        if line >= self.invalid_from {
            return None;
        }
        self.lines.get(line)?.spans.as_deref()
    }

    /// State at the end of an up-to-date line
    pub fn state_after(&self, line: usize) -> Option<&ParseState> {
        if line >= self.invalid_from {
            return None;
        }
        self.lines.get(line).map(|entry| &entry.end)
    }

    /// Bring every line up to date. Returns how many lines were re-highlighted.
    pub fn refresh<S: AsRef<str>>(&mut self, mode: &BbcodeMode, lines: &[S]) -> usize {
        self.refresh_through(mode, lines, usize::MAX)
    }

    /// Bring lines up to and including `through` up to date.
    ///
    /// Returns how many lines were re-highlighted. The cache follows the
    /// length of `lines`; lines the cache did not know about are treated as
    /// new.
    pub fn refresh_through<S: AsRef<str>>(
        &mut self,
        mode: &BbcodeMode,
        lines: &[S],
        through: usize,
    ) -> usize {
        self.sync_len(lines.len());

        let stop = through.saturating_add(1).min(lines.len());
        let first = self.invalid_from;
        let mut recomputed = 0;
        let mut line = first;
        while line < stop {
            let start = self.start_state(line);
            let entry = &self.lines[line];
            let valid = !entry.dirty && entry.spans.is_some() && entry.start == start;
            if !valid {
                let result = mode.highlight_line(lines[line].as_ref(), start.clone());
                self.lines[line] = LineEntry {
                    start,
                    end: result.end_state,
                    spans: Some(result.spans),
                    dirty: false,
                };
                recomputed += 1;
            }
            line += 1;
        }
        self.invalid_from = self.invalid_from.max(line);

        if first < line {
            log::debug!(
                target: "bbhl::cache",
                "refreshed lines {}..{}: {} re-highlighted, {} reused",
                first,
                line,
                recomputed,
                line - first - recomputed
            );
        }
        recomputed
    }

    /// State flowing into `line`, assuming every earlier line is up to date
    fn start_state(&self, line: usize) -> ParseState {
        match line.checked_sub(1).and_then(|prev| self.lines.get(prev)) {
            Some(entry) => entry.end.clone(),
            None => ParseState::default(),
        }
    }

    fn sync_len(&mut self, len: usize) {
        let old = self.lines.len();
        if old != len {
            self.lines.resize_with(len, LineEntry::fresh);
            self.invalidate_from(old.min(len));
        }
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// The highlighting mode shared by all documents
    mode: BbcodeMode,
    /// Per-buffer caches (buffer index -> cache)
    caches: HashMap<usize, HighlightCache>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a manager around a mode
    pub fn new(mode: BbcodeMode) -> Self {
        Self {
            mode,
            caches: HashMap::new(),
            enabled: true,
        }
    }

    /// The mode in use
    pub fn mode(&self) -> &BbcodeMode {
        &self.mode
    }

    /// Replace the mode; every cache is invalidated
    pub fn set_mode(&mut self, mode: BbcodeMode) {
        self.mode = mode;
        for cache in self.caches.values_mut() {
            cache.invalidate_all();
        }
    }

    /// Get or create a cache for a buffer
    pub fn get_cache(&mut self, buffer_idx: usize) -> &mut HighlightCache {
        self.caches.entry(buffer_idx).or_default()
    }

    /// Remove cache for a buffer (when buffer is closed)
    pub fn remove_cache(&mut self, buffer_idx: usize) {
        self.caches.remove(&buffer_idx);
    }

    /// Highlight a single line, using cache if available
    ///
    /// Returns spans for the line. Empty vec if highlighting is disabled.
    pub fn highlight_line<S: AsRef<str>>(
        &mut self,
        buffer_idx: usize,
        lines: &[S],
        line_idx: usize,
    ) -> Vec<Span> {
        if !self.enabled || line_idx >= lines.len() {
            return Vec::new();
        }
        let cache = self.caches.entry(buffer_idx).or_default();
        cache.refresh_through(&self.mode, lines, line_idx);
        cache.spans(line_idx).map(<[Span]>::to_vec).unwrap_or_default()
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new(BbcodeMode::new())
    }
}
