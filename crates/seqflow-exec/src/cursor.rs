//! Pull cursors over a sequence state.
//!
//! The backend is chosen from the state's tag when the cursor is created:
//! a generator-backed state gets a [`GeneratorCursor`] (single pass, each
//! advance consumes the generator), a buffered state gets a [`BufferCursor`]
//! (a position into a shared snapshot; cloneable and restartable). Both are
//! forward-only. [`Cursor`] hides the choice and doubles as an `Iterator`.

use std::fmt;
use std::rc::Rc;

use crate::state::SharedState;

/// Uniform pull interface.
pub trait SequenceCursor<T> {
    /// Whether an element is available at the current position. For a
    /// generator this may resume it to find out.
    fn has_next(&mut self) -> bool;

    /// Move past the current element.
    fn advance(&mut self);

    /// The element at the current position; `None` at the end, or before
    /// `has_next` has been asked on a generator cursor.
    fn current(&self) -> Option<&T>;
}

pub struct GeneratorCursor<T> {
    state: SharedState<T>,
    slot: Option<T>,
    primed: bool,
}

impl<T> GeneratorCursor<T> {
    pub(crate) fn new(state: SharedState<T>) -> Self {
        Self {
            state,
            slot: None,
            primed: false,
        }
    }

    fn prime(&mut self) {
        if !self.primed {
            self.slot = self.state.pull();
            self.primed = true;
        }
    }
}

impl<T> SequenceCursor<T> for GeneratorCursor<T> {
    fn has_next(&mut self) -> bool {
        self.prime();
        self.slot.is_some()
    }

    fn advance(&mut self) {
        // Pull the element being skipped if nobody looked at it yet.
        self.prime();
        self.slot = None;
        self.primed = false;
    }

    fn current(&self) -> Option<&T> {
        self.slot.as_ref()
    }
}

impl<T> Iterator for GeneratorCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.primed {
            self.primed = false;
            self.slot.take()
        } else {
            self.state.pull()
        }
    }
}

pub struct BufferCursor<T> {
    buffer: Rc<[T]>,
    pos: usize,
}

impl<T> BufferCursor<T> {
    pub(crate) fn new(buffer: Rc<[T]>) -> Self {
        Self { buffer, pos: 0 }
    }

    /// Rewind to the first element.
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }
}

impl<T> Clone for BufferCursor<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: Rc::clone(&self.buffer),
            pos: self.pos,
        }
    }
}

impl<T> SequenceCursor<T> for BufferCursor<T> {
    fn has_next(&mut self) -> bool {
        self.pos < self.buffer.len()
    }

    fn advance(&mut self) {
        if self.pos < self.buffer.len() {
            self.pos += 1;
        }
    }

    fn current(&self) -> Option<&T> {
        self.buffer.get(self.pos)
    }
}

impl<T: Clone> Iterator for BufferCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.buffer.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }

    // Random access into the snapshot; no intermediate clones.
    fn nth(&mut self, n: usize) -> Option<T> {
        self.pos = self.pos.saturating_add(n).min(self.buffer.len());
        self.next()
    }

    fn last(self) -> Option<T> {
        self.buffer.get(self.pos..)?.last().cloned()
    }
}

impl<T: Clone> ExactSizeIterator for BufferCursor<T> {}

enum Backend<T> {
    Generator(GeneratorCursor<T>),
    Buffer(BufferCursor<T>),
    End,
}

/// A cursor over either backend, or the stateless end sentinel.
pub struct Cursor<T> {
    backend: Backend<T>,
}

impl<T> Cursor<T> {
    /// The sentinel every cursor compares against: never has an element.
    pub fn end() -> Self {
        Self {
            backend: Backend::End,
        }
    }

    /// Stable read: the state must already be a buffer (or absent).
    pub(crate) fn over_buffer(buffer: Rc<[T]>) -> Self {
        Self {
            backend: Backend::Buffer(BufferCursor::new(buffer)),
        }
    }

    /// Final read: take whatever the state currently is.
    pub(crate) fn over_state(state: SharedState<T>) -> Self {
        let backend = match state.buffered() {
            Some(buffer) => Backend::Buffer(BufferCursor::new(buffer)),
            None => Backend::Generator(GeneratorCursor::new(state)),
        };
        Self { backend }
    }

    /// Equality with [`Cursor::end`]: no further element.
    pub fn is_end(&mut self) -> bool {
        !self.has_next()
    }

    pub fn is_generator(&self) -> bool {
        matches!(self.backend, Backend::Generator(_))
    }
}

impl<T> SequenceCursor<T> for Cursor<T> {
    fn has_next(&mut self) -> bool {
        match &mut self.backend {
            Backend::Generator(c) => c.has_next(),
            Backend::Buffer(c) => c.has_next(),
            Backend::End => false,
        }
    }

    fn advance(&mut self) {
        match &mut self.backend {
            Backend::Generator(c) => c.advance(),
            Backend::Buffer(c) => c.advance(),
            Backend::End => {}
        }
    }

    fn current(&self) -> Option<&T> {
        match &self.backend {
            Backend::Generator(c) => c.current(),
            Backend::Buffer(c) => c.current(),
            Backend::End => None,
        }
    }
}

impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match &mut self.backend {
            Backend::Generator(c) => c.next(),
            Backend::Buffer(c) => c.next(),
            Backend::End => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.backend {
            Backend::Generator(_) => (0, None),
            Backend::Buffer(c) => c.size_hint(),
            Backend::End => (0, Some(0)),
        }
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        match &mut self.backend {
            Backend::Generator(c) => c.nth(n),
            Backend::Buffer(c) => c.nth(n),
            Backend::End => None,
        }
    }

    fn last(self) -> Option<T> {
        match self.backend {
            Backend::Generator(c) => c.last(),
            Backend::Buffer(c) => c.last(),
            Backend::End => None,
        }
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.backend {
            Backend::Generator(_) => "generator",
            Backend::Buffer(_) => "buffer",
            Backend::End => "end",
        };
        f.debug_struct("Cursor").field("backend", &kind).finish()
    }
}
