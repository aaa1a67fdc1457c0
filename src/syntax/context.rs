//! Stack of currently open tags
//!
//! Frames are shared, immutable and reference counted, so cloning a stack
//! (which happens once per cached line) is O(1) and two parse states never
//! share anything mutable.

use std::fmt;
use std::sync::Arc;

/// One open tag awaiting its closing tag
#[derive(Debug)]
pub struct Context {
    tag_name: String,
    parent: Option<Arc<Context>>,
}

impl Context {
    /// Name the tag was opened with
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The next-older open tag
    pub fn parent(&self) -> Option<&Context> {
        self.parent.as_deref()
    }
}

/// Persistent singly linked stack of open tags
#[derive(Clone, Default)]
pub struct ContextStack {
    top: Option<Arc<Context>>,
    depth: usize,
}

impl ContextStack {
    /// An empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tag
    pub fn push(&mut self, tag_name: String) {
        let parent = self.top.take();
        self.top = Some(Arc::new(Context { tag_name, parent }));
        self.depth += 1;
    }

    /// Close the innermost tag, returning its name. Popping an empty stack
    /// is a no-op.
    pub fn pop(&mut self) -> Option<String> {
        let frame = self.top.take()?;
        self.top = frame.parent.clone();
        self.depth -= 1;
        Some(frame.tag_name.clone())
    }

    /// The innermost open tag
    pub fn top(&self) -> Option<&Context> {
        self.top.as_deref()
    }

    /// Name of the innermost open tag
    pub fn top_name(&self) -> Option<&str> {
        self.top().map(Context::tag_name)
    }

    /// Number of open tags
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether no tag is open
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Open tag names, innermost first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(self.top(), |frame| frame.parent()).map(Context::tag_name)
    }
}

impl PartialEq for ContextStack {
    fn eq(&self, other: &Self) -> bool {
        if self.depth != other.depth {
            return false;
        }
        match (&self.top, &other.top) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.names().eq(other.names()),
        }
    }
}

impl Eq for ContextStack {}

impl fmt::Debug for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// Unlink frames iteratively so a deeply nested document cannot overflow
// the stack through recursive drops.
impl Drop for ContextStack {
    fn drop(&mut self) {
        let mut next = self.top.take();
        while let Some(frame) = next {
            match Arc::try_unwrap(frame) {
                Ok(mut context) => next = context.parent.take(),
                Err(_) => break,
            }
        }
    }
}
