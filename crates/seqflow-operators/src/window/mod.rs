//! Windowing stages: skip/take by count or by predicate.
//!
//! All of these stream. `Take`/`TakeWhile` stop pulling upstream as soon as
//! their bound is reached. `take_last`/`skip_last` are composed from these by
//! the exec crate once the source length is known.

use crate::traits::{Generator, Operator};

pub struct Skip {
    pub count: usize,
}

impl<T: 'static> Operator<T> for Skip {
    type Output = T;

    fn name(&self) -> &'static str {
        "skip"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.skip(self.count))
    }
}

pub struct Take {
    pub count: usize,
}

impl<T: 'static> Operator<T> for Take {
    type Output = T;

    fn name(&self) -> &'static str {
        "take"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        // `Iterator::take` does not touch upstream once `count` is reached.
        Box::new(upstream.take(self.count))
    }
}

pub struct SkipWhile<P> {
    pub predicate: P,
}

impl<T, P> Operator<T> for SkipWhile<P>
where
    T: 'static,
    P: FnMut(&T) -> bool + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "skip_while"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.skip_while(self.predicate))
    }
}

pub struct TakeWhile<P> {
    pub predicate: P,
}

impl<T, P> Operator<T> for TakeWhile<P>
where
    T: 'static,
    P: FnMut(&T) -> bool + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "take_while"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.take_while(self.predicate))
    }
}

pub struct SkipWhileIndexed<P> {
    pub predicate: P,
}

impl<T, P> Operator<T> for SkipWhileIndexed<P>
where
    T: 'static,
    P: FnMut(&T, usize) -> bool + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "skip_while_indexed"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let mut predicate = self.predicate;
        Box::new(
            upstream
                .enumerate()
                .skip_while(move |(i, x)| predicate(x, *i))
                .map(|(_, x)| x),
        )
    }
}

pub struct TakeWhileIndexed<P> {
    pub predicate: P,
}

impl<T, P> Operator<T> for TakeWhileIndexed<P>
where
    T: 'static,
    P: FnMut(&T, usize) -> bool + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "take_while_indexed"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let mut predicate = self.predicate;
        Box::new(
            upstream
                .enumerate()
                .take_while(move |(i, x)| predicate(x, *i))
                .map(|(_, x)| x),
        )
    }
}
