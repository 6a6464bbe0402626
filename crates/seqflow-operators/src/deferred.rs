//! Generator for blocking stages: nothing runs until the first pull.

/// Runs `compute` on the first pull, then yields its output.
pub struct Deferred<F, O>
where
    O: IntoIterator,
{
    compute: Option<F>,
    output: Option<O::IntoIter>,
}

pub fn deferred<F, O>(compute: F) -> Deferred<F, O>
where
    F: FnOnce() -> O,
    O: IntoIterator,
{
    Deferred {
        compute: Some(compute),
        output: None,
    }
}

impl<F, O> Iterator for Deferred<F, O>
where
    F: FnOnce() -> O,
    O: IntoIterator,
{
    type Item = O::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(compute) = self.compute.take() {
            self.output = Some(compute().into_iter());
        }
        self.output.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.output {
            Some(out) => out.size_hint(),
            None => (0, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_compute_runs_on_first_pull_only() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let mut gen = deferred(move || {
            counter.set(counter.get() + 1);
            vec![1, 2]
        });
        assert_eq!(runs.get(), 0);
        assert_eq!(gen.next(), Some(1));
        assert_eq!(gen.next(), Some(2));
        assert_eq!(gen.next(), None);
        assert_eq!(runs.get(), 1);
    }
}
