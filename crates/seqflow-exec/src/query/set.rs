use std::hash::Hash;

use seqflow_core::capability::{
    Cascade, EqualityStrategy, HashStrategy, OrderStrategy, Strategy,
};
use seqflow_operators::set::{Distinct, Except, Intersect, Union};

use super::Query;
use crate::sequence::Sequence;

/// Set operators. The plain forms pick the strategy from the element type's
/// [`Cascade`]; `_with` takes any strategy (e.g. one with a custom comparer);
/// `_by_hash` / `_by_order` / `_by_equality` force one.
///
/// All of these are blocking. Output order is the strategy's: hash-table
/// order, sorted order, or first occurrence for the linear strategy.
///
/// An element type without a [`Cascade`] impl is rejected by the plain forms:
///
/// ```compile_fail
/// use seqflow_exec::{Sequence, SetQuery, TerminalQuery};
///
/// #[derive(Clone, PartialEq)]
/// struct Label(String);
///
/// let _ = Sequence::from(vec![Label("a".into())]).distinct().to_vec();
/// ```
///
/// Opting it in makes them available:
///
/// ```
/// use seqflow_exec::{Sequence, SetQuery, TerminalQuery};
///
/// #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
/// struct Label(String);
///
/// seqflow_core::impl_cascade!(ordered => Label);
///
/// let out = Sequence::from(vec![Label("b".into()), Label("a".into()), Label("b".into())])
///     .distinct()
///     .to_vec();
/// assert_eq!(out, vec![Label("a".into()), Label("b".into())]);
/// ```
pub trait SetQuery: Query {
    fn distinct(self) -> Sequence<Self::Item>
    where
        Self::Item: Cascade,
    {
        self.distinct_with(<Self::Item as Cascade>::Strategy::default())
    }

    fn distinct_with<S>(self, strategy: S) -> Sequence<Self::Item>
    where
        S: Strategy<Self::Item>,
    {
        self.into_sequence().pipe(Distinct { strategy })
    }

    fn distinct_by_hash(self) -> Sequence<Self::Item>
    where
        Self::Item: Hash + Eq,
    {
        self.distinct_with(HashStrategy::default())
    }

    fn distinct_by_order(self) -> Sequence<Self::Item>
    where
        Self::Item: Ord,
    {
        self.distinct_with(OrderStrategy::default())
    }

    /// Linear-scan dedup: O(n²), output in first-occurrence order.
    fn distinct_by_equality(self) -> Sequence<Self::Item>
    where
        Self::Item: PartialEq,
    {
        self.distinct_with(EqualityStrategy::default())
    }

    /// Distinct elements of `self` followed by those of `other`.
    fn union<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Cascade,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.union_with(other, <Self::Item as Cascade>::Strategy::default())
    }

    fn union_with<O, S>(self, other: O, strategy: S) -> Sequence<Self::Item>
    where
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
        S: Strategy<Self::Item>,
    {
        self.into_sequence().pipe(Union {
            other: other.into_iter(),
            strategy,
        })
    }

    fn union_by_hash<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Hash + Eq,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.union_with(other, HashStrategy::default())
    }

    fn union_by_order<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Ord,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.union_with(other, OrderStrategy::default())
    }

    fn union_by_equality<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: PartialEq,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.union_with(other, EqualityStrategy::default())
    }

    /// Distinct elements of `self` that also occur in `other`.
    fn intersect<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Cascade,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.intersect_with(other, <Self::Item as Cascade>::Strategy::default())
    }

    fn intersect_with<O, S>(self, other: O, strategy: S) -> Sequence<Self::Item>
    where
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
        S: Strategy<Self::Item>,
    {
        self.into_sequence().pipe(Intersect {
            other: other.into_iter(),
            strategy,
        })
    }

    fn intersect_by_hash<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Hash + Eq,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.intersect_with(other, HashStrategy::default())
    }

    fn intersect_by_order<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Ord,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.intersect_with(other, OrderStrategy::default())
    }

    fn intersect_by_equality<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: PartialEq,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.intersect_with(other, EqualityStrategy::default())
    }

    /// Distinct elements of `self` that do not occur in `other`.
    fn except<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Cascade,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.except_with(other, <Self::Item as Cascade>::Strategy::default())
    }

    fn except_with<O, S>(self, other: O, strategy: S) -> Sequence<Self::Item>
    where
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
        S: Strategy<Self::Item>,
    {
        self.into_sequence().pipe(Except {
            other: other.into_iter(),
            strategy,
        })
    }

    fn except_by_hash<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Hash + Eq,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.except_with(other, HashStrategy::default())
    }

    fn except_by_order<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: Ord,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.except_with(other, OrderStrategy::default())
    }

    fn except_by_equality<O>(self, other: O) -> Sequence<Self::Item>
    where
        Self::Item: PartialEq,
        O: IntoIterator<Item = Self::Item>,
        O::IntoIter: 'static,
    {
        self.except_with(other, EqualityStrategy::default())
    }
}

impl<Q: Query> SetQuery for Q {}
