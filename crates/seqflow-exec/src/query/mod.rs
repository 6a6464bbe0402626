//! The chainable query surface.
//!
//! [`Query`] is implemented for owned and borrowed sequences and groupings.
//! Calling an operator on an owned value is a final access (the upstream
//! generator is consumed in place); calling it on a reference is a stable
//! access (the upstream is flushed and the new pipeline reads the buffer).
//! Every operator returns a new, unevaluated [`Sequence`].
//!
//! Sequences passed *as arguments* (`concat`, `zip`, `union`, `join`, ...)
//! follow the same rule: pass `seq` to hand the generator over, `&seq` to
//! flush it and keep using it.

use std::cmp::Ordering;

use seqflow_operators::concat::{Append, Concat, DefaultIfEmpty, Prepend, Zip};
use seqflow_operators::filter::{Filter, FilterIndexed};
use seqflow_operators::map::{Select, SelectIndexed, SelectMany};
use seqflow_operators::sort::{OrderBy, Reverse};
use seqflow_operators::window::{
    Skip, SkipWhile, SkipWhileIndexed, Take, TakeWhile, TakeWhileIndexed,
};

use crate::grouping::Grouping;
use crate::sequence::Sequence;

mod join;
mod set;
mod terminal;

pub use join::JoinQuery;
pub use set::SetQuery;
pub use terminal::TerminalQuery;

pub trait Query: Sized {
    type Item: Clone + 'static;

    /// The sequence to read from: the value itself (final) or a flushed,
    /// shared copy (stable).
    fn into_sequence(self) -> Sequence<Self::Item>;

    // ----- projection -----

    fn select<U, F>(self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: FnMut(Self::Item) -> U + 'static,
    {
        self.into_sequence().pipe(Select { selector })
    }

    /// `select` with the zero-based source position.
    #[doc(alias = "select_with_index")]
    fn select_indexed<U, F>(self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: FnMut(Self::Item, usize) -> U + 'static,
    {
        self.into_sequence().pipe(SelectIndexed { selector })
    }

    /// Flatten the collection produced for each element.
    fn select_many<C, F>(self, collection: F) -> Sequence<C::Item>
    where
        C: IntoIterator,
        C::Item: 'static,
        C::IntoIter: 'static,
        F: FnMut(&Self::Item) -> C + 'static,
    {
        let mut collection = collection;
        self.select_many_indexed_with(move |x, _| collection(x), |_, item| item)
    }

    /// Flatten, building each output from the source element and one item
    /// of its collection.
    fn select_many_with<C, R, F, G>(self, collection: F, result: G) -> Sequence<R>
    where
        C: IntoIterator,
        C::IntoIter: 'static,
        R: 'static,
        F: FnMut(&Self::Item) -> C + 'static,
        G: FnMut(&Self::Item, C::Item) -> R + 'static,
    {
        let mut collection = collection;
        self.select_many_indexed_with(move |x, _| collection(x), result)
    }

    #[doc(alias = "select_many_with_index")]
    fn select_many_indexed<C, F>(self, collection: F) -> Sequence<C::Item>
    where
        C: IntoIterator,
        C::Item: 'static,
        C::IntoIter: 'static,
        F: FnMut(&Self::Item, usize) -> C + 'static,
    {
        self.select_many_indexed_with(collection, |_, item| item)
    }

    fn select_many_indexed_with<C, R, F, G>(self, collection: F, result: G) -> Sequence<R>
    where
        C: IntoIterator,
        C::IntoIter: 'static,
        R: 'static,
        F: FnMut(&Self::Item, usize) -> C + 'static,
        G: FnMut(&Self::Item, C::Item) -> R + 'static,
    {
        self.into_sequence().pipe(SelectMany { collection, result })
    }

    // ----- filtering -----

    #[doc(alias = "where")]
    fn filter<P>(self, predicate: P) -> Sequence<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool + 'static,
    {
        self.into_sequence().pipe(Filter { predicate })
    }

    #[doc(alias = "where_with_index")]
    fn filter_indexed<P>(self, predicate: P) -> Sequence<Self::Item>
    where
        P: FnMut(&Self::Item, usize) -> bool + 'static,
    {
        self.into_sequence().pipe(FilterIndexed { predicate })
    }

    // ----- windowing -----

    fn skip(self, count: usize) -> Sequence<Self::Item> {
        self.into_sequence().pipe(Skip { count })
    }

    /// Stops pulling upstream once `count` elements were yielded.
    fn take(self, count: usize) -> Sequence<Self::Item> {
        self.into_sequence().pipe(Take { count })
    }

    fn skip_while<P>(self, predicate: P) -> Sequence<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool + 'static,
    {
        self.into_sequence().pipe(SkipWhile { predicate })
    }

    fn take_while<P>(self, predicate: P) -> Sequence<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool + 'static,
    {
        self.into_sequence().pipe(TakeWhile { predicate })
    }

    #[doc(alias = "skip_while_with_index")]
    fn skip_while_indexed<P>(self, predicate: P) -> Sequence<Self::Item>
    where
        P: FnMut(&Self::Item, usize) -> bool + 'static,
    {
        self.into_sequence().pipe(SkipWhileIndexed { predicate })
    }

    #[doc(alias = "take_while_with_index")]
    fn take_while_indexed<P>(self, predicate: P) -> Sequence<Self::Item>
    where
        P: FnMut(&Self::Item, usize) -> bool + 'static,
    {
        self.into_sequence().pipe(TakeWhileIndexed { predicate })
    }

    /// All but the last `count` elements. Flushes the source immediately to
    /// learn its length.
    fn skip_last(self, count: usize) -> Sequence<Self::Item> {
        let seq = self.into_sequence();
        let len = seq.materialized_len();
        seq.take(len.saturating_sub(count))
    }

    /// The last `count` elements. Flushes the source immediately to learn
    /// its length.
    fn take_last(self, count: usize) -> Sequence<Self::Item> {
        let seq = self.into_sequence();
        let len = seq.materialized_len();
        seq.skip(len.saturating_sub(count))
    }

    // ----- composition -----

    fn append(self, element: Self::Item) -> Sequence<Self::Item> {
        self.into_sequence().pipe(Append { element })
    }

    fn prepend(self, element: Self::Item) -> Sequence<Self::Item> {
        self.into_sequence().pipe(Prepend { element })
    }

    fn concat<O>(self, other: O) -> Sequence<Self::Item>
    where
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.into_sequence().pipe(Concat {
            other: other.into_iter(),
        })
    }

    fn default_if_empty(self, default: Self::Item) -> Sequence<Self::Item> {
        self.into_sequence().pipe(DefaultIfEmpty { default })
    }

    /// Positional pairs; ends with the shorter input.
    fn zip<O>(self, other: O) -> Sequence<(Self::Item, O::Item)>
    where
        O: IntoIterator,
        O::Item: 'static,
        O::IntoIter: 'static,
    {
        self.zip_with(other, |a, b| (a, b))
    }

    fn zip_with<O, R, F>(self, other: O, selector: F) -> Sequence<R>
    where
        O: IntoIterator,
        O::IntoIter: 'static,
        R: 'static,
        F: FnMut(Self::Item, O::Item) -> R + 'static,
    {
        self.into_sequence().pipe(Zip {
            other: other.into_iter(),
            selector,
        })
    }

    // ----- ordering -----

    /// Stable sort of the elements themselves.
    fn order(self) -> Sequence<Self::Item>
    where
        Self::Item: Ord,
    {
        self.order_by(|x| x.clone())
    }

    fn order_descending(self) -> Sequence<Self::Item>
    where
        Self::Item: Ord,
    {
        self.order_by_descending(|x| x.clone())
    }

    /// Stable sort by a projected key; equal keys keep source order.
    fn order_by<K, KF>(self, key: KF) -> Sequence<Self::Item>
    where
        K: Ord + 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
    {
        self.order_by_with(key, |a: &K, b: &K| a.cmp(b))
    }

    /// Descending by key; equal keys still keep source order.
    fn order_by_descending<K, KF>(self, key: KF) -> Sequence<Self::Item>
    where
        K: Ord + 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
    {
        self.order_by_with(key, |a: &K, b: &K| b.cmp(a))
    }

    fn order_by_with<K, KF, C>(self, key: KF, comparer: C) -> Sequence<Self::Item>
    where
        K: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        C: FnMut(&K, &K) -> Ordering + 'static,
    {
        self.into_sequence().pipe(OrderBy { key, comparer })
    }

    fn reverse(self) -> Sequence<Self::Item> {
        self.into_sequence().pipe(Reverse)
    }
}

impl<T: Clone + 'static> Query for Sequence<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self
    }
}

impl<T: Clone + 'static> Query for &Sequence<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self.clone()
    }
}

impl<K, V: Clone + 'static> Query for Grouping<K, V> {
    type Item = V;

    fn into_sequence(self) -> Sequence<V> {
        self.into_elements()
    }
}

impl<K, V: Clone + 'static> Query for &Grouping<K, V> {
    type Item = V;

    fn into_sequence(self) -> Sequence<V> {
        self.elements().clone()
    }
}
