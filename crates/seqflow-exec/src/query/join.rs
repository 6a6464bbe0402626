use std::hash::Hash;

use seqflow_core::capability::{
    Cascade, EqualityStrategy, HashStrategy, OrderStrategy, Strategy,
};
use seqflow_operators::group::GroupBy;
use seqflow_operators::join::{GroupJoin, Join};

use super::Query;
use crate::grouping::Grouping;
use crate::sequence::Sequence;

/// Keyed operators: join, group_join, group_by.
///
/// Strategies are chosen on the *key* type. Plain forms use the key's
/// [`Cascade`]; `_with` takes the strategy as its last argument; `_by_hash`
/// / `_by_order` / `_by_equality` force one.
pub trait JoinQuery: Query {
    /// Inner equi-join. One `result(outer, inner)` per matching pair, in
    /// outer order, then inner order.
    fn join<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: Cascade,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, I::Item) -> R + 'static,
    {
        self.join_with(inner, outer_key, inner_key, result, K::Strategy::default())
    }

    fn join_with<I, K, KO, KI, R, F, S>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
        strategy: S,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, I::Item) -> R + 'static,
        S: Strategy<K>,
    {
        self.into_sequence().pipe(Join {
            inner: inner.into_iter(),
            outer_key,
            inner_key,
            result,
            strategy,
        })
    }

    fn join_by_hash<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: Hash + Eq + 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, I::Item) -> R + 'static,
    {
        self.join_with(inner, outer_key, inner_key, result, HashStrategy::default())
    }

    fn join_by_order<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: Ord + Clone + 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, I::Item) -> R + 'static,
    {
        self.join_with(inner, outer_key, inner_key, result, OrderStrategy::default())
    }

    fn join_by_equality<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: PartialEq + 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, I::Item) -> R + 'static,
    {
        self.join_with(inner, outer_key, inner_key, result, EqualityStrategy::default())
    }

    /// One `result(outer, matches)` per outer element, in outer order;
    /// `matches` may be empty.
    fn group_join<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: Cascade,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, Sequence<I::Item>) -> R + 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, K::Strategy::default())
    }

    fn group_join_with<I, K, KO, KI, R, F, S>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
        strategy: S,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, Sequence<I::Item>) -> R + 'static,
        S: Strategy<K>,
    {
        let mut result = result;
        self.into_sequence().pipe(GroupJoin {
            inner: inner.into_iter(),
            outer_key,
            inner_key,
            result: move |outer: Self::Item, matches: Vec<I::Item>| {
                result(outer, Sequence::from_vec(matches))
            },
            strategy,
        })
    }

    fn group_join_by_hash<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: Hash + Eq + 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, Sequence<I::Item>) -> R + 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, HashStrategy::default())
    }

    fn group_join_by_order<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: Ord + Clone + 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, Sequence<I::Item>) -> R + 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, OrderStrategy::default())
    }

    fn group_join_by_equality<I, K, KO, KI, R, F>(
        self,
        inner: I,
        outer_key: KO,
        inner_key: KI,
        result: F,
    ) -> Sequence<R>
    where
        I: IntoIterator,
        I::Item: Clone + 'static,
        I::IntoIter: 'static,
        K: PartialEq + 'static,
        KO: FnMut(&Self::Item) -> K + 'static,
        KI: FnMut(&I::Item) -> K + 'static,
        R: 'static,
        F: FnMut(Self::Item, Sequence<I::Item>) -> R + 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, EqualityStrategy::default())
    }

    /// Group whole elements by key.
    fn group_by<K, KF>(self, key: KF) -> Sequence<Grouping<K, Self::Item>>
    where
        K: Cascade,
        KF: FnMut(&Self::Item) -> K + 'static,
    {
        self.group_by_result(key, |x| x, Grouping::new)
    }

    /// Group projected elements by key.
    fn group_by_element<K, V, KF, EF>(self, key: KF, element: EF) -> Sequence<Grouping<K, V>>
    where
        K: Cascade,
        V: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        EF: FnMut(Self::Item) -> V + 'static,
    {
        self.group_by_result(key, element, Grouping::new)
    }

    /// One `result(key, elements)` per group.
    fn group_by_result<K, V, R, KF, EF, RF>(
        self,
        key: KF,
        element: EF,
        result: RF,
    ) -> Sequence<R>
    where
        K: Cascade,
        V: 'static,
        R: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        EF: FnMut(Self::Item) -> V + 'static,
        RF: FnMut(K, Sequence<V>) -> R + 'static,
    {
        self.group_by_with(key, element, result, K::Strategy::default())
    }

    fn group_by_with<K, V, R, KF, EF, RF, S>(
        self,
        key: KF,
        element: EF,
        result: RF,
        strategy: S,
    ) -> Sequence<R>
    where
        K: 'static,
        V: 'static,
        R: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        EF: FnMut(Self::Item) -> V + 'static,
        RF: FnMut(K, Sequence<V>) -> R + 'static,
        S: Strategy<K>,
    {
        let mut result = result;
        self.into_sequence().pipe(GroupBy {
            key,
            element,
            result: move |k: K, elements: Vec<V>| result(k, Sequence::from_vec(elements)),
            strategy,
        })
    }

    fn group_by_hash<K, V, R, KF, EF, RF>(self, key: KF, element: EF, result: RF) -> Sequence<R>
    where
        K: Hash + Eq + 'static,
        V: 'static,
        R: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        EF: FnMut(Self::Item) -> V + 'static,
        RF: FnMut(K, Sequence<V>) -> R + 'static,
    {
        self.group_by_with(key, element, result, HashStrategy::default())
    }

    /// Groups come out key-sorted.
    fn group_by_order<K, V, R, KF, EF, RF>(self, key: KF, element: EF, result: RF) -> Sequence<R>
    where
        K: Ord + Clone + 'static,
        V: 'static,
        R: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        EF: FnMut(Self::Item) -> V + 'static,
        RF: FnMut(K, Sequence<V>) -> R + 'static,
    {
        self.group_by_with(key, element, result, OrderStrategy::default())
    }

    /// Groups come out in first-occurrence order. O(n·g) for g groups.
    fn group_by_equality<K, V, R, KF, EF, RF>(
        self,
        key: KF,
        element: EF,
        result: RF,
    ) -> Sequence<R>
    where
        K: PartialEq + 'static,
        V: 'static,
        R: 'static,
        KF: FnMut(&Self::Item) -> K + 'static,
        EF: FnMut(Self::Item) -> V + 'static,
        RF: FnMut(K, Sequence<V>) -> R + 'static,
    {
        self.group_by_with(key, element, result, EqualityStrategy::default())
    }
}

impl<Q: Query> JoinQuery for Q {}
