//! Ordering stages. Both are blocking: the whole upstream is materialized on
//! the first pull.

use std::cmp::Ordering;

use crate::deferred::deferred;
use crate::plan::Pipelining;
use crate::traits::{Generator, Operator};

/// Stable sort by a projected key.
///
/// Keys are projected once per element, before sorting. Elements whose keys
/// compare `Equal` keep their upstream relative order.
pub struct OrderBy<KF, C> {
    pub key: KF,
    pub comparer: C,
}

impl<T, K, KF, C> Operator<T> for OrderBy<KF, C>
where
    T: 'static,
    K: 'static,
    KF: FnMut(&T) -> K + 'static,
    C: FnMut(&K, &K) -> Ordering + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "order_by"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let OrderBy {
            key: mut key_of,
            mut comparer,
        } = self;
        Box::new(deferred(move || {
            let mut keyed: Vec<(K, T)> = upstream.map(|x| (key_of(&x), x)).collect();
            // `sort_by` is a stable merge sort.
            keyed.sort_by(|a, b| comparer(&a.0, &b.0));
            keyed.into_iter().map(|(_, x)| x)
        }))
    }
}

pub struct Reverse;

impl<T: 'static> Operator<T> for Reverse {
    type Output = T;

    fn name(&self) -> &'static str {
        "reverse"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(deferred(move || {
            let mut items: Vec<T> = upstream.collect();
            items.reverse();
            items
        }))
    }
}
