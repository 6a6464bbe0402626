//! Composition stages: concat/append/prepend, default_if_empty, zip.

use std::iter;

use crate::traits::{Generator, Operator};

pub struct Concat<O> {
    pub other: O,
}

impl<T, O> Operator<T> for Concat<O>
where
    T: 'static,
    O: Iterator<Item = T> + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "concat"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.chain(self.other))
    }
}

pub struct Append<T> {
    pub element: T,
}

impl<T: 'static> Operator<T> for Append<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        "append"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.chain(iter::once(self.element)))
    }
}

pub struct Prepend<T> {
    pub element: T,
}

impl<T: 'static> Operator<T> for Prepend<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        "prepend"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(iter::once(self.element).chain(upstream))
    }
}

/// Yields upstream unchanged, or `default` alone if upstream is empty.
pub struct DefaultIfEmpty<T> {
    pub default: T,
}

impl<T: 'static> Operator<T> for DefaultIfEmpty<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        "default_if_empty"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(DefaultIfEmptyIter {
            upstream,
            default: Some(self.default),
        })
    }
}

struct DefaultIfEmptyIter<I, T> {
    upstream: I,
    // Some(..) until the first pull.
    default: Option<T>,
}

impl<I: Iterator<Item = T>, T> Iterator for DefaultIfEmptyIter<I, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.default.take() {
            Some(default) => Some(self.upstream.next().unwrap_or(default)),
            None => self.upstream.next(),
        }
    }
}

/// Pairs elements positionally; ends with the shorter input.
pub struct Zip<O, F> {
    pub other: O,
    pub selector: F,
}

impl<T, O, F, R> Operator<T> for Zip<O, F>
where
    T: 'static,
    O: Iterator + 'static,
    R: 'static,
    F: FnMut(T, O::Item) -> R + 'static,
{
    type Output = R;

    fn name(&self) -> &'static str {
        "zip"
    }

    fn attach<I>(self, upstream: I) -> Generator<R>
    where
        I: Iterator<Item = T> + 'static,
    {
        let mut selector = self.selector;
        Box::new(upstream.zip(self.other).map(move |(a, b)| selector(a, b)))
    }
}
