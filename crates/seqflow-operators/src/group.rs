//! GroupBy stage.
//!
//! Builds key → elements groups with the strategy on the *key* type, then
//! yields `result(key, elements)` per group. Group order follows the
//! strategy (hash iteration / key-sorted / first occurrence); elements inside
//! a group keep source order.

use seqflow_core::capability::{KeyGroups, Strategy};

use crate::deferred::deferred;
use crate::plan::Pipelining;
use crate::traits::{Generator, Operator};

pub struct GroupBy<KF, EF, RF, S> {
    pub key: KF,
    pub element: EF,
    pub result: RF,
    pub strategy: S,
}

impl<T, K, V, R, KF, EF, RF, S> Operator<T> for GroupBy<KF, EF, RF, S>
where
    T: 'static,
    K: 'static,
    V: 'static,
    R: 'static,
    KF: FnMut(&T) -> K + 'static,
    EF: FnMut(T) -> V + 'static,
    RF: FnMut(K, Vec<V>) -> R + 'static,
    S: Strategy<K>,
{
    type Output = R;

    fn name(&self) -> &'static str {
        "group_by"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<R>
    where
        I: Iterator<Item = T> + 'static,
    {
        let GroupBy {
            key: mut key_of,
            element: mut element_of,
            mut result,
            strategy,
        } = self;
        Box::new(deferred(move || {
            let mut groups = strategy.key_groups::<V>();
            for x in upstream {
                let k = key_of(&x);
                groups.push(k, element_of(x));
            }
            // Result selectors run lazily, one per yielded group.
            groups
                .into_vec()
                .into_iter()
                .map(move |(k, vs)| result(k, vs))
        }))
    }
}
