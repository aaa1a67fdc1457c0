//! The BBCode highlighting mode
//!
//! Ties the lexer and the grammar together behind the per-token contract
//! an editor drives: give it a cursor over one line and the state left
//! by the previous line, get back one token and its label.

use regex::Regex;

use super::context::ContextStack;
use super::cursor::LineCursor;
use super::grammar::{self, GrammarState, StackEffect};
use super::lexer::{self, LexicalMode, Token, TokenKind};
use super::style::Span;
use super::tokens::StyleLabel;
use crate::config::Config;

/// Input ending in a just-completed closing tag, which should trigger reindent
const ELECTRIC_PATTERN: &str = r"\[/[\s\w:]+\]$";

/// Everything carried from the end of one line to the start of the next
///
/// The lexical mode and the grammar state together decide how the next
/// token is read; nothing else influences it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    lexical_mode: LexicalMode,
    grammar_state: GrammarState,
    pending_tag_name: Option<String>,
    context: ContextStack,
}

impl ParseState {
    /// Active lexical sub-routine
    pub fn lexical_mode(&self) -> LexicalMode {
        self.lexical_mode
    }

    /// Active grammar state
    pub fn grammar_state(&self) -> GrammarState {
        self.grammar_state
    }

    /// Name of the tag being opened, until its `]` is seen
    pub fn pending_tag_name(&self) -> Option<&str> {
        self.pending_tag_name.as_deref()
    }

    /// Currently open tags
    pub fn context(&self) -> &ContextStack {
        &self.context
    }

    /// Current tag nesting depth
    pub fn depth(&self) -> usize {
        self.context.depth()
    }

    fn apply(&mut self, effect: StackEffect) {
        match effect {
            StackEffect::None => {}
            StackEffect::Capture(name) => self.pending_tag_name = Some(name),
            StackEffect::Commit => {
                let name = self.pending_tag_name.take().unwrap_or_default();
                self.context.push(name);
            }
            StackEffect::Pop => {
                self.context.pop();
            }
        }
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone)]
pub struct HighlightResult {
    /// Labelled spans covering the whole line, in order
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: ParseState,
}

/// BBCode highlighting mode with its static configuration
#[derive(Debug, Clone)]
pub struct BbcodeMode {
    strict_matching: bool,
    electric: Regex,
    comment_start: String,
    comment_end: String,
}

impl BbcodeMode {
    /// Mode name
    pub const NAME: &'static str = "bbcode";
    /// MIME types this mode handles
    pub const MIME_TYPES: [&'static str; 2] = ["text/bbcode", "application/bbcode"];
    /// Tag wrapping block comments unless configured otherwise
    pub const DEFAULT_COMMENT_TAG: &'static str = "comment";

    /// Mode with strict close-tag matching and `[comment]` block comments
    pub fn new() -> Self {
        Self::with_options(true, Self::DEFAULT_COMMENT_TAG)
    }

    /// Mode built from user configuration
    pub fn from_config(config: &Config) -> Self {
        Self::with_options(config.strict_matching, &config.comment_tag)
    }

    /// Mode with explicit options
    pub fn with_options(strict_matching: bool, comment_tag: &str) -> Self {
        Self {
            strict_matching,
            electric: Regex::new(ELECTRIC_PATTERN).expect("electric pattern compiles"),
            comment_start: format!("[{comment_tag}]"),
            comment_end: format!("[/{comment_tag}]"),
        }
    }

    /// Whether closing tag names must match their opening tag
    pub fn strict_matching(&self) -> bool {
        self.strict_matching
    }

    /// State for the first line of a document
    pub fn initial_state(&self) -> ParseState {
        ParseState::default()
    }

    /// Read one token from `cursor` and label it, updating `state`.
    ///
    /// Must not be called once the cursor is at the end of its line. Every
    /// call consumes at least one character.
    pub fn classify_next_token<'a>(
        &self,
        cursor: &mut LineCursor<'a>,
        state: &mut ParseState,
    ) -> (Token<'a>, StyleLabel) {
        cursor.mark_start();
        if cursor.eat_space() {
            let token = Token {
                kind: TokenKind::Whitespace,
                text: cursor.current(),
                start: cursor.start(),
            };
            return (token, StyleLabel::Plain);
        }

        let token = lexer::next_token(cursor, &mut state.lexical_mode);
        if token.kind == TokenKind::Text {
            return (token, StyleLabel::Plain);
        }

        let step = grammar::transition(
            state.grammar_state,
            token.kind,
            token.text,
            state.context.top_name(),
            self.strict_matching,
        );
        log::trace!(
            target: "bbhl::grammar",
            "{:?} {:?} {:?} -> {:?} {}",
            state.grammar_state,
            token.kind,
            token.text,
            step.next,
            step.style.name()
        );
        state.grammar_state = step.next;
        state.apply(step.effect);
        (token, step.style)
    }

    /// Highlight a whole line, starting from the state the previous line left.
    pub fn highlight_line(&self, text: &str, prev_state: ParseState) -> HighlightResult {
        let mut state = prev_state;
        let mut cursor = LineCursor::new(text);
        let mut spans = Vec::new();
        while !cursor.at_line_end() {
            let (token, style) = self.classify_next_token(&mut cursor, &mut state);
            spans.push(Span::new(token.start, token.end(), style));
        }
        HighlightResult {
            spans,
            end_state: state,
        }
    }

    /// Highlight a sequence of lines from the start of a document
    pub fn highlight_document<'a, I>(&self, lines: I) -> (Vec<Vec<Span>>, ParseState)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = self.initial_state();
        let mut out = Vec::new();
        for line in lines {
            let result = self.highlight_line(line, state);
            out.push(result.spans);
            state = result.end_state;
        }
        (out, state)
    }

    /// Stop waiting for an attribute value in the current tag.
    ///
    /// Used when an embedded language claims the value: the outer grammar
    /// moves on to expect the tag's `]` without consuming anything.
    pub fn skip_attribute(&self, state: &mut ParseState) {
        if state.grammar_state == GrammarState::AttributeValue {
            state.grammar_state = GrammarState::AttributeEnd;
        }
    }

    /// Whether typing the end of `text_before_cursor` completed a closing tag
    pub fn is_electric(&self, text_before_cursor: &str) -> bool {
        self.electric.is_match(text_before_cursor)
    }

    /// Block comment markers, e.g. `("[comment]", "[/comment]")`
    pub fn block_comment(&self) -> (&str, &str) {
        (&self.comment_start, &self.comment_end)
    }
}

impl Default for BbcodeMode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(mode: &BbcodeMode, text: &str, state: ParseState) -> (Vec<(String, StyleLabel)>, ParseState) {
        let result = mode.highlight_line(text, state);
        let labels = result
            .spans
            .iter()
            .map(|span| (span.text(text).to_string(), span.label))
            .collect();
        (labels, result.end_state)
    }

    fn pairs(items: &[(&str, StyleLabel)]) -> Vec<(String, StyleLabel)> {
        items.iter().map(|(text, label)| (text.to_string(), *label)).collect()
    }

    #[test]
    fn test_plain_text() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "plain text", mode.initial_state());
        assert_eq!(spans, pairs(&[("plain text", StyleLabel::Plain)]));
        assert_eq!(state, mode.initial_state());
    }

    #[test]
    fn test_open_tag_pushes_context() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[b]", mode.initial_state());
        assert_eq!(
            spans,
            pairs(&[
                ("[", StyleLabel::TagBracket),
                ("b", StyleLabel::TagName),
                ("]", StyleLabel::TagBracket),
            ])
        );
        assert_eq!(state.context().names().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(state.pending_tag_name(), None);
        assert_eq!(state.grammar_state(), GrammarState::Base);
    }

    #[test]
    fn test_matched_close_pops() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[b][/b]", mode.initial_state());
        assert!(spans.iter().all(|(_, label)| !label.is_error()));
        assert_eq!(spans[3], ("[/".to_string(), StyleLabel::TagBracket));
        assert_eq!(spans[4], ("b".to_string(), StyleLabel::TagName));
        assert_eq!(spans[5], ("]".to_string(), StyleLabel::TagBracket));
        assert!(state.context().is_empty());
    }

    #[test]
    fn test_mismatched_close_still_pops() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[b][/i]", mode.initial_state());
        assert_eq!(spans[4], ("i".to_string(), StyleLabel::TagNameAndError));
        assert_eq!(spans[5], ("]".to_string(), StyleLabel::TagBracket));
        assert!(state.context().is_empty());
        assert_eq!(state.grammar_state(), GrammarState::Base);
    }

    #[test]
    fn test_lenient_matching() {
        let mode = BbcodeMode::with_options(false, "comment");
        let (spans, state) = labels(&mode, "[b][/i]", mode.initial_state());
        assert_eq!(spans[4], ("i".to_string(), StyleLabel::TagName));
        assert!(state.context().is_empty());
    }

    #[test]
    fn test_attribute() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[url=http://x]", mode.initial_state());
        assert_eq!(
            spans,
            pairs(&[
                ("[", StyleLabel::TagBracket),
                ("url", StyleLabel::TagName),
                ("=", StyleLabel::AttributeName),
                ("http://x", StyleLabel::AttributeValue),
                ("]", StyleLabel::TagBracket),
            ])
        );
        assert_eq!(state.context().top_name(), Some("url"));
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn test_state_carries_across_lines() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[x", mode.initial_state());
        assert_eq!(spans[1], ("x".to_string(), StyleLabel::TagName));
        assert_eq!(state.grammar_state(), GrammarState::AttributeOrEnd);
        assert_eq!(state.lexical_mode(), LexicalMode::Tag);
        assert_eq!(state.pending_tag_name(), Some("x"));

        let (spans, state) = labels(&mode, "]", state);
        assert_eq!(spans, pairs(&[("]", StyleLabel::TagBracket)]));
        assert_eq!(state.context().top_name(), Some("x"));
    }

    #[test]
    fn test_value_on_following_lines_is_an_error() {
        let mode = BbcodeMode::new();
        let (_, state) = labels(&mode, "[quote=some", mode.initial_state());
        assert_eq!(state.grammar_state(), GrammarState::AttributeEnd);
        assert_eq!(state.lexical_mode(), LexicalMode::Attribute);

        let (spans, state) = labels(&mode, "one", state);
        assert_eq!(spans, pairs(&[("one", StyleLabel::Error)]));
        assert_eq!(state.grammar_state(), GrammarState::AttributeEnd);

        let (spans, state) = labels(&mode, "two]", state);
        assert_eq!(
            spans,
            pairs(&[("two", StyleLabel::Error), ("]", StyleLabel::TagBracket)])
        );
        assert_eq!(state.context().top_name(), Some("quote"));
        assert_eq!(state.grammar_state(), GrammarState::Base);
    }

    #[test]
    fn test_mode_identity() {
        assert_eq!(BbcodeMode::NAME, "bbcode");
        assert!(BbcodeMode::MIME_TYPES.contains(&"text/bbcode"));
        assert!(BbcodeMode::new().strict_matching());

        let mut config = Config::default();
        config.strict_matching = false;
        assert!(!BbcodeMode::from_config(&config).strict_matching());
    }

    #[test]
    fn test_whitespace_is_plain_and_inert() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[quote ]", mode.initial_state());
        // Words run up to `=` or `]`, so the space belongs to the name.
        assert_eq!(spans[1], ("quote ".to_string(), StyleLabel::TagName));
        assert_eq!(state.context().top_name(), Some("quote "));

        let (spans, state) = labels(&mode, "  [b]", mode.initial_state());
        assert_eq!(spans[0], ("  ".to_string(), StyleLabel::Plain));
        assert_eq!(state.depth(), 1);

        let (spans, _) = labels(&mode, "[b]  x", mode.initial_state());
        assert_eq!(spans[3], ("  ".to_string(), StyleLabel::Plain));
        assert_eq!(spans[4], ("x".to_string(), StyleLabel::Plain));
    }

    #[test]
    fn test_errors_are_labelled_not_fatal() {
        let mode = BbcodeMode::new();
        let (spans, state) = labels(&mode, "[]", mode.initial_state());
        assert_eq!(spans[1], ("]".to_string(), StyleLabel::Error));
        assert_eq!(state.grammar_state(), GrammarState::OpenTagName);

        let (spans, _) = labels(&mode, "[/b]", mode.initial_state());
        assert_eq!(spans[1], ("b".to_string(), StyleLabel::TagNameError));
    }

    #[test]
    fn test_skip_attribute() {
        let mode = BbcodeMode::new();
        let (_, mut state) = labels(&mode, "[code=", mode.initial_state());
        assert_eq!(state.grammar_state(), GrammarState::AttributeValue);
        mode.skip_attribute(&mut state);
        assert_eq!(state.grammar_state(), GrammarState::AttributeEnd);

        let mut base = mode.initial_state();
        mode.skip_attribute(&mut base);
        assert_eq!(base, mode.initial_state());
    }

    #[test]
    fn test_electric_input() {
        let mode = BbcodeMode::new();
        assert!(mode.is_electric("text [/quote]"));
        assert!(mode.is_electric("[/list:u]"));
        assert!(!mode.is_electric("[quote]"));
        assert!(!mode.is_electric("[/quote] more"));
    }

    #[test]
    fn test_block_comment_markers() {
        assert_eq!(BbcodeMode::new().block_comment(), ("[comment]", "[/comment]"));
        let mode = BbcodeMode::with_options(true, "note");
        assert_eq!(mode.block_comment(), ("[note]", "[/note]"));
    }

    #[test]
    fn test_highlight_document() {
        let mode = BbcodeMode::new();
        let (lines, state) = mode.highlight_document(["[quote]", "hi", "[/quote]"]);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().flatten().all(|span| !span.label.is_error()));
        assert!(state.context().is_empty());
    }

    #[test]
    fn test_states_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseState>();
        assert_send_sync::<BbcodeMode>();
    }
}
