//! `Sequence<T>`: the chainable lazy-or-materialized value.
//!
//! Two access disciplines:
//! - **final** (`into_cursor`, `IntoIterator for Sequence`, every query
//!   method called on an owned `Sequence`): the value is consumed, so a live
//!   generator is read directly, element by element, with no buffering.
//! - **stable** (`cursor`, `IntoIterator for &Sequence`, `Clone`, every
//!   query method called on `&Sequence`): the caller keeps its reference, so
//!   the state is flushed first and the read goes over the shared buffer.

use std::fmt;
use std::rc::Rc;

use seqflow_core::Step;
use seqflow_operators::{Generator, Operator};

use crate::cursor::Cursor;
use crate::metrics;
use crate::state::SharedState;

pub struct Sequence<T> {
    // `None` is the empty state: no backing object at all.
    state: Option<SharedState<T>>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<T> Clone for Sequence<T> {
    /// Stable access: flushes, then shares the buffer. Never copies elements.
    fn clone(&self) -> Self {
        if let Some(state) = &self.state {
            state.flush();
        }
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: 'static> Sequence<T> {
    /// A sequence with no elements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lazily wrap any iterator (including another cursor). Nothing is pulled
    /// until the sequence is read.
    pub fn from_generator<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_boxed(Box::new(iter.into_iter()))
    }

    pub(crate) fn from_boxed(gen: Generator<T>) -> Self {
        Self {
            state: Some(SharedState::generator(gen)),
        }
    }

    /// Wrap an existing buffer. Already materialized.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            state: Some(SharedState::buffer(items.into())),
        }
    }

    /// `count` copies of `value`, generated lazily.
    pub fn repeat(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_generator(std::iter::repeat(value).take(count))
    }

    /// Collapse a generator into a buffer. No-op if already materialized.
    pub fn flush(&self) {
        if let Some(state) = &self.state {
            state.flush();
        }
    }

    pub fn is_materialized(&self) -> bool {
        self.state.as_ref().map_or(true, SharedState::is_buffer)
    }

    /// Stable cursor: flushes first, so repeated calls see the same elements.
    pub fn cursor(&self) -> Cursor<T> {
        match &self.state {
            Some(state) => Cursor::over_buffer(state.flush()),
            None => Cursor::end(),
        }
    }

    /// Final cursor: reads a live generator directly.
    pub fn into_cursor(self) -> Cursor<T> {
        match self.state {
            Some(state) => Cursor::over_state(state),
            None => Cursor::end(),
        }
    }

    /// Element count after a stable flush.
    pub fn materialized_len(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.flush().len())
    }

    /// Element count if already known without evaluating anything.
    pub(crate) fn known_len(&self) -> Option<usize> {
        match &self.state {
            Some(state) => state.buffered_len(),
            None => Some(0),
        }
    }

    /// Attach `op` to this sequence, consuming it. Nothing is evaluated.
    pub(crate) fn pipe<O>(self, op: O) -> Sequence<O::Output>
    where
        O: Operator<T>,
        T: Clone,
    {
        metrics::record_attach(op.plan());
        Sequence::from_boxed(op.attach(self.into_cursor()))
    }

    /// A second handle on the same state *without* flushing. Reading both
    /// with final access shows that a generator runs only once.
    #[cfg(test)]
    pub(crate) fn alias(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Step> Sequence<T> {
    /// `count` consecutive values starting at `start`, generated lazily.
    /// A zero `count` is empty. The range ends early at the type's last
    /// value (`i32::MAX`, `char::MAX`, ...) instead of wrapping or repeating.
    pub fn range(start: T, count: usize) -> Self {
        Self::from_generator(Counted {
            next: Some(start),
            remaining: count,
        })
    }
}

/// Counted successor generator; computes a successor only when it will be
/// yielded.
struct Counted<T> {
    next: Option<T>,
    remaining: usize,
}

impl<T: Step> Iterator for Counted<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            self.next = None;
            return None;
        }
        let current = self.next.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = current.successor();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Overflow can end the range before `remaining` runs out.
        match self.next {
            Some(_) => (1.min(self.remaining), Some(self.remaining)),
            None => (0, Some(0)),
        }
    }
}

impl<T: 'static> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: 'static, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_vec(Vec::from(items))
    }
}

impl<T: 'static> FromIterator<T> for Sequence<T> {
    /// Eager: collects into a buffer.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone + 'static> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.into_cursor()
    }
}

impl<T: Clone + 'static> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    /// Does not flush: a live generator prints as `<generator>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            None => f.write_str("Sequence[]"),
            Some(state) => match state.buffered() {
                Some(buf) => {
                    f.write_str("Sequence")?;
                    f.debug_list().entries(buf.iter()).finish()
                }
                None => f.write_str("Sequence<generator>"),
            },
        }
    }
}

impl<T: PartialEq + 'static> PartialEq for Sequence<T> {
    /// Stable comparison of the elements (flushes both sides).
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.buffer(), other.buffer());
        a[..] == b[..]
    }
}

impl<T: 'static> Sequence<T> {
    fn buffer(&self) -> Rc<[T]> {
        match &self.state {
            Some(state) => state.flush(),
            None => Rc::from(Vec::new()),
        }
    }
}
