//! Forward cursor over a single line
//!
//! The cursor never sees past the end of its line; anything the
//! tokenizer needs from earlier lines has to travel in the parse state.

/// Something a single character can be tested against
pub trait CharPattern {
    /// Whether `ch` matches
    fn matches(&self, ch: char) -> bool;
}

impl CharPattern for char {
    fn matches(&self, ch: char) -> bool {
        *self == ch
    }
}

impl<F: Fn(char) -> bool> CharPattern for F {
    fn matches(&self, ch: char) -> bool {
        self(ch)
    }
}

/// Read-only cursor over one line of text
///
/// Positions are byte offsets into the line. `start` marks the beginning
/// of the token currently being read; `current` returns everything
/// consumed since then.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    line: &'a str,
    pos: usize,
    start: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor at the start of `line`
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            start: 0,
        }
    }

    /// The full line being read
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Current byte position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Byte position where the current token started
    pub fn start(&self) -> usize {
        self.start
    }

    /// Begin a new token at the current position
    pub fn mark_start(&mut self) {
        self.start = self.pos;
    }

    /// Text consumed since the last `mark_start`
    pub fn current(&self) -> &'a str {
        &self.line[self.start..self.pos]
    }

    /// Whether every character of the line has been consumed
    pub fn at_line_end(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Look at the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    /// Consume and return the next character
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume the next character only if it matches
    pub fn eat<P: CharPattern>(&mut self, pattern: P) -> Option<char> {
        match self.peek() {
            Some(ch) if pattern.matches(ch) => {
                self.pos += ch.len_utf8();
                Some(ch)
            }
            _ => None,
        }
    }

    /// Greedily consume characters while they match; true if any were eaten
    pub fn eat_while<P: CharPattern>(&mut self, pattern: P) -> bool {
        let from = self.pos;
        while self.eat(|ch: char| pattern.matches(ch)).is_some() {}
        self.pos > from
    }

    /// Consume a run of whitespace; true if any was eaten
    pub fn eat_space(&mut self) -> bool {
        self.eat_while(char::is_whitespace)
    }

    /// Consume the maximal run matching `pattern` and return it
    ///
    /// Unlike `eat_while`, the caller gets the matched text back, and an
    /// empty run is reported as `None`.
    pub fn match_run<P: CharPattern>(&mut self, pattern: P) -> Option<&'a str> {
        let from = self.pos;
        if self.eat_while(pattern) {
            Some(&self.line[from..self.pos])
        } else {
            None
        }
    }
}
