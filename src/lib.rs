//! bbhl - incremental BBCode syntax highlighting
//!
//! The core is [`syntax::BbcodeMode`]: feed it one line at a time together
//! with the [`syntax::ParseState`] the previous line left behind, and it
//! labels every span of the line. [`syntax::HighlightCache`] keeps those
//! states per line so an edit only re-highlights what it affects.

pub mod comment;
pub mod config;
pub mod display;
pub mod error;
pub mod syntax;
pub mod terminal;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use syntax::{BbcodeMode, HighlightCache, LineCursor, ParseState, Span, StyleLabel};
