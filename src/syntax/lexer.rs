//! Lexical layer of the BBCode mode
//!
//! Splits a line into raw tokens. The lexer knows which delimiter it is
//! inside of but nothing about whether the tags make sense; that is the
//! grammar's job.

use super::cursor::LineCursor;

/// Opens a tag: `[b]`, `[/b]`
pub const TAG_OPEN: char = '[';
/// Follows `[` in a closing tag
pub const CLOSE_MARKER: char = '/';
/// Ends a tag
pub const TAG_END: char = ']';
/// Separates a tag name from its attribute value
pub const ASSIGN: char = '=';

/// Which lexical sub-routine reads the next token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexicalMode {
    /// Outside of any tag
    #[default]
    Text,
    /// Between `[` and `]`
    Tag,
    /// After `=`, up to the closing `]`
    Attribute,
}

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Whitespace skipped before either layer runs.
    ///
    /// `next_token` never produces this kind; `BbcodeMode::classify_next_token`
    /// builds it itself before handing the cursor to the lexer.
    Whitespace,
    /// A run of plain text
    Text,
    /// `[`
    OpenTag,
    /// `[/`
    CloseTag,
    /// `]`
    EndTag,
    /// A tag name, or any other run inside a tag
    Word,
    /// `=`
    Equals,
    /// Everything between `=` and `]`
    AttributeValue,
}

/// One classified run of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Lexical category
    pub kind: TokenKind,
    /// The raw text of the token
    pub text: &'a str,
    /// Byte offset of the token within its line
    pub start: usize,
}

impl<'a> Token<'a> {
    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    fn from_cursor(kind: TokenKind, cursor: &LineCursor<'a>) -> Self {
        Self {
            kind,
            text: cursor.current(),
            start: cursor.start(),
        }
    }
}

/// Read exactly one token, switching `mode` on delimiters.
///
/// The cursor must not be at the end of its line. Every call consumes at
/// least one character.
pub fn next_token<'a>(cursor: &mut LineCursor<'a>, mode: &mut LexicalMode) -> Token<'a> {
    debug_assert!(!cursor.at_line_end(), "next_token called on an exhausted line");
    cursor.mark_start();
    let kind = match *mode {
        LexicalMode::Text => in_text(cursor, mode),
        LexicalMode::Tag => in_tag(cursor, mode),
        LexicalMode::Attribute => in_attribute(cursor, mode),
    };
    Token::from_cursor(kind, cursor)
}

fn in_text(cursor: &mut LineCursor<'_>, mode: &mut LexicalMode) -> TokenKind {
    if cursor.eat(TAG_OPEN).is_some() {
        *mode = LexicalMode::Tag;
        if cursor.eat(CLOSE_MARKER).is_some() {
            TokenKind::CloseTag
        } else {
            TokenKind::OpenTag
        }
    } else {
        cursor.eat_while(|ch: char| ch != TAG_OPEN);
        TokenKind::Text
    }
}

fn in_tag(cursor: &mut LineCursor<'_>, mode: &mut LexicalMode) -> TokenKind {
    match cursor.next() {
        Some(TAG_END) => {
            *mode = LexicalMode::Text;
            TokenKind::EndTag
        }
        Some(ASSIGN) => {
            *mode = LexicalMode::Attribute;
            TokenKind::Equals
        }
        _ => {
            cursor.match_run(|ch: char| ch != ASSIGN && ch != TAG_END);
            TokenKind::Word
        }
    }
}

fn in_attribute(cursor: &mut LineCursor<'_>, mode: &mut LexicalMode) -> TokenKind {
    // `[url=]`: no value at all, let the tag reader take the `]`.
    if cursor.peek() == Some(TAG_END) {
        *mode = LexicalMode::Tag;
        return in_tag(cursor, mode);
    }
    cursor.eat_while(|ch: char| ch != TAG_END);
    // A value running off the end of the line leaves attribute mode active.
    if !cursor.at_line_end() {
        *mode = LexicalMode::Tag;
    }
    TokenKind::AttributeValue
}
