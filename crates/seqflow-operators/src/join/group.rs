use std::marker::PhantomData;

use seqflow_core::capability::{KeyGroups, Strategy};

use super::build_lookup;
use crate::traits::{Generator, Operator};

/// Exactly one `result(outer, matches)` per outer element, in outer order.
/// `matches` is empty when nothing in the inner input shares the key.
pub struct GroupJoin<O, KO, KI, RF, S> {
    pub inner: O,
    pub outer_key: KO,
    pub inner_key: KI,
    pub result: RF,
    pub strategy: S,
}

impl<T, U, K, R, O, KO, KI, RF, S> Operator<T> for GroupJoin<O, KO, KI, RF, S>
where
    T: 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    O: Iterator<Item = U> + 'static,
    KO: FnMut(&T) -> K + 'static,
    KI: FnMut(&U) -> K + 'static,
    RF: FnMut(T, Vec<U>) -> R + 'static,
    S: Strategy<K>,
{
    type Output = R;

    fn name(&self) -> &'static str {
        "group_join"
    }

    fn attach<I>(self, upstream: I) -> Generator<R>
    where
        I: Iterator<Item = T> + 'static,
    {
        let GroupJoin {
            inner,
            outer_key,
            inner_key,
            result,
            strategy,
        } = self;
        Box::new(GroupJoinIter {
            outer: upstream,
            build: Some(move || build_lookup(&strategy, inner, inner_key)),
            lookup: None,
            outer_key,
            result,
            _inner: PhantomData::<fn() -> U>,
        })
    }
}

struct GroupJoinIter<I, U, B, G, KO, RF> {
    outer: I,
    build: Option<B>,
    lookup: Option<G>,
    outer_key: KO,
    result: RF,
    _inner: PhantomData<fn() -> U>,
}

impl<I, T, K, U, B, G, KO, RF, R> Iterator for GroupJoinIter<I, U, B, G, KO, RF>
where
    I: Iterator<Item = T>,
    U: Clone,
    B: FnOnce() -> G,
    G: KeyGroups<K, U>,
    KO: FnMut(&T) -> K,
    RF: FnMut(T, Vec<U>) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if let Some(build) = self.build.take() {
            self.lookup = Some(build());
        }
        let lookup = self.lookup.as_ref()?;
        let outer = self.outer.next()?;
        let key = (self.outer_key)(&outer);
        let matches = lookup.get(&key).to_vec();
        Some((self.result)(outer, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqflow_core::capability::OrderStrategy;

    #[test]
    fn test_group_join_keeps_outer_order_and_empty_groups() {
        let op = GroupJoin {
            inner: vec![("b", 2), ("a", 1), ("b", 3)].into_iter(),
            outer_key: |o: &&str| o.to_string(),
            inner_key: |i: &(&str, i32)| i.0.to_string(),
            result: |o: &'static str, ms: Vec<(&'static str, i32)>| {
                (o, ms.into_iter().map(|m| m.1).collect::<Vec<_>>())
            },
            strategy: OrderStrategy::default(),
        };
        let out: Vec<_> = op.attach(vec!["b", "c", "a"].into_iter()).collect();
        assert_eq!(out, vec![("b", vec![2, 3]), ("c", vec![]), ("a", vec![1])]);
    }
}
