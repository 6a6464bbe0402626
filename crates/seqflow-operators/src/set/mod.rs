//! Set stages built on a key-set strategy.
//!
//! All four are blocking. Hash and ordered strategies yield in their own
//! iteration order; the linear strategy yields in first-occurrence order.
//! `Intersect`/`Except` deduplicate the left input with the same strategy
//! before filtering, so their output is itself distinct.

use seqflow_core::capability::{KeySet, Strategy};

use crate::deferred::deferred;
use crate::plan::Pipelining;
use crate::traits::{Generator, Operator};

/// Insert everything from `source` into `set`, first occurrence wins.
fn fold_into<T, S: KeySet<T>>(set: &mut S, source: impl Iterator<Item = T>) {
    for x in source {
        set.insert(x);
    }
}

pub struct Distinct<S> {
    pub strategy: S,
}

impl<T, S> Operator<T> for Distinct<S>
where
    T: 'static,
    S: Strategy<T>,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "distinct"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let strategy = self.strategy;
        Box::new(deferred(move || {
            let mut seen = strategy.key_set();
            fold_into(&mut seen, upstream);
            seen.into_vec()
        }))
    }
}

/// Deduplicated concatenation: seeded from upstream, then `other`.
pub struct Union<O, S> {
    pub other: O,
    pub strategy: S,
}

impl<T, O, S> Operator<T> for Union<O, S>
where
    T: 'static,
    O: Iterator<Item = T> + 'static,
    S: Strategy<T>,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "union"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let Union { other, strategy } = self;
        Box::new(deferred(move || {
            let mut seen = strategy.key_set();
            fold_into(&mut seen, upstream);
            fold_into(&mut seen, other);
            seen.into_vec()
        }))
    }
}

pub struct Intersect<O, S> {
    pub other: O,
    pub strategy: S,
}

impl<T, O, S> Operator<T> for Intersect<O, S>
where
    T: 'static,
    O: Iterator<Item = T> + 'static,
    S: Strategy<T>,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "intersect"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let Intersect { other, strategy } = self;
        Box::new(deferred(move || filter_distinct(upstream, other, &strategy, true)))
    }
}

pub struct Except<O, S> {
    pub other: O,
    pub strategy: S,
}

impl<T, O, S> Operator<T> for Except<O, S>
where
    T: 'static,
    O: Iterator<Item = T> + 'static,
    S: Strategy<T>,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "except"
    }

    fn pipelining(&self) -> Pipelining {
        Pipelining::Blocking
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let Except { other, strategy } = self;
        Box::new(deferred(move || filter_distinct(upstream, other, &strategy, false)))
    }
}

/// Distinct elements of `left` whose membership in `right` equals `keep_present`.
fn filter_distinct<T, S: Strategy<T>>(
    left: impl Iterator<Item = T>,
    right: impl Iterator<Item = T>,
    strategy: &S,
    keep_present: bool,
) -> Vec<T> {
    let mut lookup = strategy.key_set();
    fold_into(&mut lookup, right);

    let mut distinct = strategy.key_set();
    fold_into(&mut distinct, left);

    distinct
        .into_vec()
        .into_iter()
        .filter(|x| lookup.contains(x) == keep_present)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqflow_core::capability::{EqualityStrategy, OrderStrategy};

    fn run<O: Operator<i32, Output = i32>>(op: O, input: Vec<i32>) -> Vec<i32> {
        op.attach(input.into_iter()).collect()
    }

    #[test]
    fn test_distinct_linear_keeps_first_occurrence_order() {
        let out = run(
            Distinct {
                strategy: EqualityStrategy::default(),
            },
            vec![3, 1, 3, 2, 1],
        );
        assert_eq!(out, vec![3, 1, 2]);
    }

    #[test]
    fn test_union_ordered() {
        let out = run(
            Union {
                other: vec![4, 2, 5].into_iter(),
                strategy: OrderStrategy::default(),
            },
            vec![3, 2, 3],
        );
        assert_eq!(out, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_union_linear_seeds_from_left() {
        let out = run(
            Union {
                other: vec![4, 2, 5].into_iter(),
                strategy: EqualityStrategy::default(),
            },
            vec![3, 2, 3],
        );
        assert_eq!(out, vec![3, 2, 4, 5]);
    }

    #[test]
    fn test_intersect_and_except_are_distinct() {
        let both = run(
            Intersect {
                other: vec![2, 3, 9].into_iter(),
                strategy: EqualityStrategy::default(),
            },
            vec![1, 2, 2, 3, 3, 4],
        );
        assert_eq!(both, vec![2, 3]);

        let left_only = run(
            Except {
                other: vec![2, 3, 9].into_iter(),
                strategy: EqualityStrategy::default(),
            },
            vec![1, 2, 2, 3, 4, 4],
        );
        assert_eq!(left_only, vec![1, 4]);
    }

    #[test]
    fn test_nothing_pulled_before_first_next() {
        let source = vec![1, 2].into_iter().inspect(|_| panic!("pulled during attach"));
        let _gen = Distinct {
            strategy: OrderStrategy::default(),
        }
        .attach(source);
    }
}
