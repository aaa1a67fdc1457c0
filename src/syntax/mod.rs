//! Syntax and styling module
//!
//! This module provides the BBCode highlighting core:
//! - a line cursor and a three-mode lexer
//! - a grammar that matches tags against a stack of open tags
//! - per-document incremental caching of labelled spans

mod context;
mod cursor;
mod grammar;
mod lexer;
mod manager;
mod mode;
mod style;
mod tokens;

pub use context::{Context, ContextStack};
pub use cursor::{CharPattern, LineCursor};
pub use grammar::{transition, GrammarState, StackEffect, Transition};
pub use lexer::{next_token, LexicalMode, Token, TokenKind};
pub use manager::{HighlightCache, SyntaxManager};
pub use mode::{BbcodeMode, HighlightResult, ParseState};
pub use style::{Color, Span, Style};
pub use tokens::StyleLabel;
