//! Grammar layer of the BBCode mode
//!
//! A pure transition function over lexical tokens. It never touches the
//! context stack itself; it reports what should happen to it and the
//! mode applies the effect.

use super::lexer::TokenKind;
use super::tokens::StyleLabel;

/// Which part of a tag the grammar expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrammarState {
    /// Outside of any tag
    #[default]
    Base,
    /// After `[`
    OpenTagName,
    /// After `[/`
    CloseTagName,
    /// After a closing tag name that matched
    CloseTagEnd,
    /// After a closing tag name that did not match, or a malformed one
    CloseTagRecovery,
    /// After an opening tag name
    AttributeOrEnd,
    /// After `=`
    AttributeValue,
    /// After an attribute value
    AttributeEnd,
}

/// What a transition does to the open-tag stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEffect {
    /// Nothing
    None,
    /// Remember the name of the tag being opened
    Capture(String),
    /// Push the captured name and forget it
    Commit,
    /// Close the innermost tag
    Pop,
}

/// Result of feeding one token to the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State for the next token
    pub next: GrammarState,
    /// Label for this token
    pub style: StyleLabel,
    /// Stack mutation to apply
    pub effect: StackEffect,
}

impl Transition {
    fn to(next: GrammarState, style: StyleLabel) -> Self {
        Self {
            next,
            style,
            effect: StackEffect::None,
        }
    }

    fn with(mut self, effect: StackEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Stay in `state` and flag the token as an error
    fn error(state: GrammarState) -> Self {
        Self::to(state, StyleLabel::Error)
    }
}

/// Decide the next state, label and stack effect for one token.
///
/// `open_tag` is the name of the innermost open tag. With `strict` off,
/// every closing tag name is accepted.
pub fn transition(
    state: GrammarState,
    kind: TokenKind,
    text: &str,
    open_tag: Option<&str>,
    strict: bool,
) -> Transition {
    use GrammarState as S;
    use TokenKind as K;

    match (state, kind) {
        (S::Base, K::OpenTag) => Transition::to(S::OpenTagName, StyleLabel::TagBracket),
        (S::Base, K::CloseTag) => Transition::to(S::CloseTagName, StyleLabel::TagBracket),
        (S::Base, _) => Transition::to(S::Base, StyleLabel::Plain),

        (S::OpenTagName, K::Word) => Transition::to(S::AttributeOrEnd, StyleLabel::TagName)
            .with(StackEffect::Capture(text.to_string())),
        (S::OpenTagName, _) => Transition::error(S::OpenTagName),

        (S::CloseTagName, K::Word) => close_tag_name(text, open_tag, strict),
        (S::CloseTagName, _) => Transition::error(S::CloseTagRecovery),

        (S::CloseTagEnd | S::CloseTagRecovery, K::EndTag) => {
            Transition::to(S::Base, StyleLabel::TagBracket).with(StackEffect::Pop)
        }
        (S::CloseTagEnd | S::CloseTagRecovery, _) => Transition::error(state),

        (S::AttributeOrEnd, K::Equals) => {
            Transition::to(S::AttributeValue, StyleLabel::AttributeName)
        }
        (S::AttributeOrEnd | S::AttributeEnd, K::EndTag) => {
            Transition::to(S::Base, StyleLabel::TagBracket).with(StackEffect::Commit)
        }
        (S::AttributeOrEnd, _) => Transition::error(S::AttributeValue),

        (S::AttributeValue, K::AttributeValue) => {
            Transition::to(S::AttributeEnd, StyleLabel::AttributeValue)
        }
        (S::AttributeValue, _) => Transition::error(S::AttributeEnd),

        (S::AttributeEnd, _) => Transition::error(S::AttributeEnd),
    }
}

fn close_tag_name(name: &str, open_tag: Option<&str>, strict: bool) -> Transition {
    match open_tag {
        _ if !strict => Transition::to(GrammarState::CloseTagEnd, StyleLabel::TagName),
        Some(open) if open == name => {
            Transition::to(GrammarState::CloseTagEnd, StyleLabel::TagName)
        }
        Some(_) => Transition::to(GrammarState::CloseTagRecovery, StyleLabel::TagNameAndError),
        None => Transition::to(GrammarState::CloseTagRecovery, StyleLabel::TagNameError),
    }
}
