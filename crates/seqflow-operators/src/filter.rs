//! Filter stages (`where`): keep elements that satisfy a predicate.

use crate::traits::{Generator, Operator};

pub struct Filter<P> {
    pub predicate: P,
}

impl<T, P> Operator<T> for Filter<P>
where
    T: 'static,
    P: FnMut(&T) -> bool + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "filter"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.filter(self.predicate))
    }
}

/// Predicate also receives the zero-based source position.
pub struct FilterIndexed<P> {
    pub predicate: P,
}

impl<T, P> Operator<T> for FilterIndexed<P>
where
    T: 'static,
    P: FnMut(&T, usize) -> bool + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        "filter_indexed"
    }

    fn attach<I>(self, upstream: I) -> Generator<T>
    where
        I: Iterator<Item = T> + 'static,
    {
        let mut predicate = self.predicate;
        Box::new(
            upstream
                .enumerate()
                .filter_map(move |(i, x)| predicate(&x, i).then_some(x)),
        )
    }
}
