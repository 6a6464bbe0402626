//! Projection stages: `select` and `select_many`, plain and indexed.

use crate::traits::{Generator, Operator};

pub struct Select<F> {
    pub selector: F,
}

impl<T, U, F> Operator<T> for Select<F>
where
    T: 'static,
    U: 'static,
    F: FnMut(T) -> U + 'static,
{
    type Output = U;

    fn name(&self) -> &'static str {
        "select"
    }

    fn attach<I>(self, upstream: I) -> Generator<U>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(upstream.map(self.selector))
    }
}

pub struct SelectIndexed<F> {
    pub selector: F,
}

impl<T, U, F> Operator<T> for SelectIndexed<F>
where
    T: 'static,
    U: 'static,
    F: FnMut(T, usize) -> U + 'static,
{
    type Output = U;

    fn name(&self) -> &'static str {
        "select_indexed"
    }

    fn attach<I>(self, upstream: I) -> Generator<U>
    where
        I: Iterator<Item = T> + 'static,
    {
        let mut selector = self.selector;
        Box::new(upstream.enumerate().map(move |(i, x)| selector(x, i)))
    }
}

/// Flattening projection.
///
/// `collection(source, index)` yields the sub-collection of one source
/// element; `result(&source, item)` builds each output element. The source
/// element stays alive until its sub-collection is exhausted.
pub struct SelectMany<C, R> {
    pub collection: C,
    pub result: R,
}

impl<T, Coll, Out, C, R> Operator<T> for SelectMany<C, R>
where
    T: 'static,
    Coll: IntoIterator,
    Coll::IntoIter: 'static,
    Out: 'static,
    C: FnMut(&T, usize) -> Coll + 'static,
    R: FnMut(&T, Coll::Item) -> Out + 'static,
{
    type Output = Out;

    fn name(&self) -> &'static str {
        "select_many"
    }

    fn attach<I>(self, upstream: I) -> Generator<Out>
    where
        I: Iterator<Item = T> + 'static,
    {
        Box::new(SelectManyIter {
            upstream,
            collection: self.collection,
            result: self.result,
            index: 0,
            current: None,
        })
    }
}

struct SelectManyIter<I, T, J, C, R> {
    upstream: I,
    collection: C,
    result: R,
    index: usize,
    current: Option<(T, J)>,
}

impl<I, T, J, C, R, Coll, Out> Iterator for SelectManyIter<I, T, J, C, R>
where
    I: Iterator<Item = T>,
    Coll: IntoIterator<IntoIter = J>,
    J: Iterator<Item = Coll::Item>,
    C: FnMut(&T, usize) -> Coll,
    R: FnMut(&T, Coll::Item) -> Out,
{
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        loop {
            if let Some((source, inner)) = &mut self.current {
                if let Some(item) = inner.next() {
                    return Some((self.result)(source, item));
                }
                self.current = None;
            }
            let source = self.upstream.next()?;
            let inner = (self.collection)(&source, self.index).into_iter();
            self.index += 1;
            self.current = Some((source, inner));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_many_pairs_source_with_items() {
        let op = SelectMany {
            collection: |s: &&str, _: usize| s.chars().collect::<Vec<_>>(),
            result: |s: &&str, c: char| format!("{s}:{c}"),
        };
        let out: Vec<_> = op.attach(vec!["ab", "", "c"].into_iter()).collect();
        assert_eq!(out, vec!["ab:a", "ab:b", "c:c"]);
    }

    #[test]
    fn test_select_many_index_counts_sources() {
        let op = SelectMany {
            collection: |x: &u32, i: usize| vec![*x; i],
            result: |_: &u32, v: u32| v,
        };
        let out: Vec<_> = op.attach(vec![7, 8, 9].into_iter()).collect();
        assert_eq!(out, vec![8, 9, 9]);
    }
}
