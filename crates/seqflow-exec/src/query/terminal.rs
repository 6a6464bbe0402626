use seqflow_core::error::{Error, Result};

use super::Query;

/// Operators that evaluate the pipeline and return a value.
///
/// Each pulls the source at most once. `first`, `any`, `contains`, `all`
/// and `single` stop as soon as the answer is known. Absence never panics:
/// the plain forms return the caller's `default`, the `try_` forms return an
/// [`Error`].
pub trait TerminalQuery: Query {
    /// Left fold from `seed`.
    fn aggregate<A, F>(self, seed: A, func: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        self.into_sequence().into_cursor().fold(seed, func)
    }

    /// Left fold, then map the accumulator.
    fn aggregate_with<A, R, F, G>(self, seed: A, func: F, result: G) -> R
    where
        F: FnMut(A, Self::Item) -> A,
        G: FnOnce(A) -> R,
    {
        result(self.aggregate(seed, func))
    }

    /// True for an empty sequence.
    fn all<P>(self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.into_sequence().into_cursor().all(|x| predicate(&x))
    }

    /// Whether there is at least one element. Pulls at most one.
    fn any(self) -> bool {
        !self.into_sequence().into_cursor().is_end()
    }

    fn any_by<P>(self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.into_sequence().into_cursor().any(|x| predicate(&x))
    }

    /// Number of elements. A materialized source answers from its buffer
    /// length without reading elements.
    fn count(self) -> usize {
        let seq = self.into_sequence();
        match seq.known_len() {
            Some(len) => len,
            None => seq.into_cursor().count(),
        }
    }

    fn count_by<P>(self, mut predicate: P) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.into_sequence()
            .into_cursor()
            .filter(|x| predicate(x))
            .count()
    }

    fn contains(self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.into_sequence().into_cursor().any(|x| &x == value)
    }

    fn contains_by<E>(self, value: &Self::Item, mut equals: E) -> bool
    where
        E: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        self.into_sequence()
            .into_cursor()
            .any(|x| equals(&x, value))
    }

    fn first(self, default: Self::Item) -> Self::Item {
        self.into_sequence().into_cursor().next().unwrap_or(default)
    }

    fn first_by<P>(self, mut predicate: P, default: Self::Item) -> Self::Item
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.into_sequence()
            .into_cursor()
            .find(|x| predicate(x))
            .unwrap_or(default)
    }

    fn last(self, default: Self::Item) -> Self::Item {
        self.into_sequence().into_cursor().last().unwrap_or(default)
    }

    fn last_by<P>(self, mut predicate: P, default: Self::Item) -> Self::Item
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.into_sequence()
            .into_cursor()
            .filter(|x| predicate(x))
            .last()
            .unwrap_or(default)
    }

    /// The only element, or `default` when there are zero *or more than
    /// one*. Ambiguity is not an error here; use [`try_single`](Self::try_single)
    /// to tell the cases apart.
    fn single(self, default: Self::Item) -> Self::Item {
        self.single_by(|_| true, default)
    }

    fn single_by<P>(self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.try_single_by(predicate).unwrap_or(default)
    }

    fn element_at(self, index: usize, default: Self::Item) -> Self::Item {
        self.into_sequence()
            .into_cursor()
            .nth(index)
            .unwrap_or(default)
    }

    /// Same length and pairwise equal, in order.
    fn sequence_equal<O>(self, other: O) -> bool
    where
        Self::Item: PartialEq,
        O: IntoIterator<Item = Self::Item>,
    {
        self.sequence_equal_by(other, |a, b| a == b)
    }

    fn sequence_equal_by<O, E>(self, other: O, mut equals: E) -> bool
    where
        O: IntoIterator<Item = Self::Item>,
        E: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        let mut left = self.into_sequence().into_cursor();
        let mut right = other.into_iter();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) => {
                    if !equals(&a, &b) {
                        return false;
                    }
                }
                (None, None) => return true,
                _ => return false,
            }
        }
    }

    fn to_vec(self) -> Vec<Self::Item> {
        self.into_sequence().into_cursor().collect()
    }

    /// Collect into any container.
    fn to_container<C>(self) -> C
    where
        C: FromIterator<Self::Item>,
    {
        self.into_sequence().into_cursor().collect()
    }

    fn try_first(self) -> Result<Self::Item> {
        self.into_sequence()
            .into_cursor()
            .next()
            .ok_or(Error::NoElements)
    }

    fn try_last(self) -> Result<Self::Item> {
        self.into_sequence()
            .into_cursor()
            .last()
            .ok_or(Error::NoElements)
    }

    fn try_single(self) -> Result<Self::Item> {
        self.try_single_by(|_| true)
    }

    /// Stops reading at the second match.
    fn try_single_by<P>(self, mut predicate: P) -> Result<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        let mut matches = self
            .into_sequence()
            .into_cursor()
            .filter(|x| predicate(x));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(only),
            (None, _) => Err(Error::NoElements),
            (Some(_), Some(_)) => Err(Error::MoreThanOne),
        }
    }

    fn try_element_at(self, index: usize) -> Result<Self::Item> {
        let mut len = 0;
        for x in self.into_sequence().into_cursor() {
            if len == index {
                return Ok(x);
            }
            len += 1;
        }
        Err(Error::IndexOutOfRange { index, len })
    }
}

impl<Q: Query> TerminalQuery for Q {}
