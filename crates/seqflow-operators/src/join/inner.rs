use std::marker::PhantomData;

use seqflow_core::capability::{KeyGroups, Strategy};

use super::build_lookup;
use crate::traits::{Generator, Operator};

/// Inner equi-join: one `result(outer, inner)` per matching pair. Outer
/// elements without a match contribute nothing.
pub struct Join<O, KO, KI, RF, S> {
    pub inner: O,
    pub outer_key: KO,
    pub inner_key: KI,
    pub result: RF,
    pub strategy: S,
}

impl<T, U, K, R, O, KO, KI, RF, S> Operator<T> for Join<O, KO, KI, RF, S>
where
    T: Clone + 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    O: Iterator<Item = U> + 'static,
    KO: FnMut(&T) -> K + 'static,
    KI: FnMut(&U) -> K + 'static,
    RF: FnMut(T, U) -> R + 'static,
    S: Strategy<K>,
{
    type Output = R;

    fn name(&self) -> &'static str {
        "join"
    }

    fn attach<I>(self, upstream: I) -> Generator<R>
    where
        I: Iterator<Item = T> + 'static,
    {
        let Join {
            inner,
            outer_key,
            inner_key,
            result,
            strategy,
        } = self;
        Box::new(JoinIter {
            outer: upstream,
            build: Some(move || build_lookup(&strategy, inner, inner_key)),
            lookup: None,
            outer_key,
            result,
            pending: None,
            _inner: PhantomData::<fn() -> U>,
        })
    }
}

struct JoinIter<I, T, K, U, B, G, KO, RF> {
    outer: I,
    build: Option<B>,
    lookup: Option<G>,
    outer_key: KO,
    result: RF,
    // Current outer element, its key, and the next match position.
    pending: Option<(T, K, usize)>,
    _inner: PhantomData<fn() -> U>,
}

impl<I, T, K, U, B, G, KO, RF, R> Iterator for JoinIter<I, T, K, U, B, G, KO, RF>
where
    I: Iterator<Item = T>,
    T: Clone,
    U: Clone,
    B: FnOnce() -> G,
    G: KeyGroups<K, U>,
    KO: FnMut(&T) -> K,
    RF: FnMut(T, U) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if let Some(build) = self.build.take() {
            self.lookup = Some(build());
        }
        let lookup = self.lookup.as_ref()?;
        loop {
            if let Some((outer, key, pos)) = &mut self.pending {
                if let Some(matched) = lookup.get(key).get(*pos) {
                    *pos += 1;
                    return Some((self.result)(outer.clone(), matched.clone()));
                }
                self.pending = None;
            }
            let outer = self.outer.next()?;
            let key = (self.outer_key)(&outer);
            self.pending = Some((outer, key, 0));
        }
    }
}
