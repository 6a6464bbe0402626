//! Shared sequence state: a live generator or a materialized buffer.
//!
//! Transitions:
//! - `Generator --flush--> Buffer` (collects every remaining element, in order)
//! - `Buffer --flush--> Buffer` (no-op)
//! - `Generator --pull returns None--> Buffer(empty)` (the spent generator is
//!   dropped so it can never be resumed again)
//!
//! Every `Sequence` referencing the same `SharedState` observes the same
//! transitions. Access is single-threaded; a generator that re-enters its
//! own state while running panics with a `RefCell` borrow error.

use std::cell::RefCell;
use std::rc::Rc;

use seqflow_core::config;
use seqflow_operators::Generator;

use crate::metrics;

pub(crate) enum State<T> {
    Generator(Generator<T>),
    Buffer(Rc<[T]>),
}

pub(crate) struct SharedState<T> {
    cell: Rc<RefCell<State<T>>>,
}

impl<T> Clone for SharedState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> SharedState<T> {
    pub(crate) fn generator(gen: Generator<T>) -> Self {
        Self::from_state(State::Generator(gen))
    }

    pub(crate) fn buffer(buf: Rc<[T]>) -> Self {
        Self::from_state(State::Buffer(buf))
    }

    fn from_state(state: State<T>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(state)),
        }
    }

    pub(crate) fn is_buffer(&self) -> bool {
        matches!(&*self.cell.borrow(), State::Buffer(_))
    }

    /// Length of the buffer, without flushing. `None` while still a generator.
    pub(crate) fn buffered_len(&self) -> Option<usize> {
        match &*self.cell.borrow() {
            State::Buffer(buf) => Some(buf.len()),
            State::Generator(_) => None,
        }
    }

    /// Collapse the generator into a buffer (at most once) and return it.
    pub(crate) fn flush(&self) -> Rc<[T]> {
        let mut state = self.cell.borrow_mut();
        let gen = match &mut *state {
            State::Buffer(buf) => return Rc::clone(buf),
            State::Generator(gen) => gen,
        };

        let (lower, _) = gen.size_hint();
        let mut items = Vec::with_capacity(lower.max(config::global().flush_capacity_hint));
        items.extend(gen);
        metrics::record_flush(items.len());

        let buf: Rc<[T]> = items.into();
        // Replacing the state drops the spent generator.
        *state = State::Buffer(Rc::clone(&buf));
        buf
    }

    /// Resume the generator for one element. A buffered state has nothing to
    /// pull (buffers are read through their own cursor).
    pub(crate) fn pull(&self) -> Option<T> {
        let mut state = self.cell.borrow_mut();
        let State::Generator(gen) = &mut *state else {
            return None;
        };
        let next = gen.next();
        if next.is_none() {
            *state = State::Buffer(Rc::from(Vec::new()));
            metrics::record_release();
        }
        next
    }

    /// Snapshot of the buffer if the state is already materialized.
    pub(crate) fn buffered(&self) -> Option<Rc<[T]>> {
        match &*self.cell.borrow() {
            State::Buffer(buf) => Some(Rc::clone(buf)),
            State::Generator(_) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(n: u32) -> SharedState<u32> {
        SharedState::generator(Box::new(0..n))
    }

    #[test]
    fn test_flush_is_idempotent() {
        let state = counting(4);
        assert!(!state.is_buffer());
        let first = state.flush();
        let second = state.flush();
        assert!(state.is_buffer());
        assert_eq!(&*first, &[0, 1, 2, 3]);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_flush_visible_through_every_handle() {
        let a = counting(3);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        a.flush();
        assert_eq!(b.buffered_len(), Some(3));
    }

    #[test]
    fn test_pull_resets_spent_generator() {
        let state = counting(2);
        assert_eq!(state.pull(), Some(0));
        assert_eq!(state.pull(), Some(1));
        assert!(!state.is_buffer());
        assert_eq!(state.pull(), None);
        assert!(state.is_buffer());
        assert_eq!(state.buffered_len(), Some(0));
        assert_eq!(state.pull(), None);
    }

    #[test]
    fn test_flush_after_partial_pull_keeps_rest() {
        let state = counting(5);
        assert_eq!(state.pull(), Some(0));
        assert_eq!(&*state.flush(), &[1, 2, 3, 4]);
    }
}
