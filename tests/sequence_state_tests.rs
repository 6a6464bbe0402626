//! Sequence state, flush, and access-discipline tests

use std::cell::Cell;
use std::rc::Rc;

use seqflow::metrics;
use seqflow::prelude::*;

/// Generator over `items` that counts how many elements were pulled.
fn counted(items: Vec<i32>) -> (Sequence<i32>, Rc<Cell<usize>>) {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let seq = Sequence::from_generator(items.into_iter().inspect(move |_| {
        counter.set(counter.get() + 1);
    }));
    (seq, pulls)
}

#[test]
fn test_flush_idempotence() {
    let (seq, pulls) = counted(vec![3, 1, 2]);
    metrics::reset();

    let first: Vec<i32> = (&seq).into_iter().collect();
    let second: Vec<i32> = (&seq).into_iter().collect();
    seq.flush();
    seq.flush();

    assert_eq!(first, vec![3, 1, 2]);
    assert_eq!(first, second);
    assert_eq!(pulls.get(), 3);
    assert_eq!(metrics::snapshot().flushes, 1);
    assert_eq!(metrics::snapshot().elements_flushed, 3);
}

#[test]
fn test_operators_are_lazy() {
    let (seq, pulls) = counted(vec![1, 2, 3, 4]);
    let pipeline = seq
        .filter(|x| x % 2 == 0)
        .select(|x| x * 100)
        .order_by_descending(|x| *x);
    assert_eq!(pulls.get(), 0);
    assert!(!pipeline.is_materialized());

    assert_eq!(pipeline.to_vec(), vec![400, 200]);
    assert_eq!(pulls.get(), 4);
}

#[test]
fn test_final_access_does_not_buffer() {
    let (seq, pulls) = counted(vec![1, 2, 3]);
    metrics::reset();

    let mut cursor = seq.into_cursor();
    assert!(cursor.is_generator());
    assert_eq!(cursor.next(), Some(1));
    assert_eq!(pulls.get(), 1);
    assert_eq!(cursor.by_ref().count(), 2);
    assert_eq!(metrics::snapshot().flushes, 0);
    assert_eq!(metrics::snapshot().generators_released, 1);
}

#[test]
fn test_single_consumption() {
    let seq = Sequence::range(0, 3);
    let mut cursor = seq.into_cursor();
    let drained: Vec<i32> = cursor.by_ref().collect();
    assert_eq!(drained, vec![0, 1, 2]);
    assert!(cursor.is_end());
    assert_eq!(cursor.next(), None);
}

#[test]
fn test_clone_is_stable_access() {
    let (seq, pulls) = counted(vec![5, 6]);
    let copy = seq.clone();
    assert!(seq.is_materialized());
    assert!(copy.is_materialized());
    assert_eq!(pulls.get(), 2);

    assert_eq!(copy.to_vec(), vec![5, 6]);
    assert_eq!(seq.to_vec(), vec![5, 6]);
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_borrowed_receiver_keeps_source_usable() {
    let source = Sequence::from_generator(vec![1, 2, 3, 4]);
    let evens = (&source).filter(|x| x % 2 == 0).to_vec();
    let odds = (&source).filter(|x| x % 2 == 1).to_vec();
    assert_eq!(evens, vec![2, 4]);
    assert_eq!(odds, vec![1, 3]);
    assert_eq!(source.count(), 4);
}

#[test]
fn test_factories() {
    assert_eq!(Sequence::<u8>::empty().count(), 0);
    assert_eq!(Sequence::range(5, 3).to_vec(), vec![5, 6, 7]);
    assert_eq!(Sequence::range('x', 3).to_vec(), vec!['x', 'y', 'z']);
    assert_eq!(Sequence::range(0.5, 2).to_vec(), vec![0.5, 1.5]);
    assert!(Sequence::range(1, 0).to_vec().is_empty());
    assert_eq!(Sequence::range(i32::MAX - 1, 4).to_vec(), vec![i32::MAX - 1, i32::MAX]);
    assert_eq!(Sequence::repeat("ab", 3).to_vec(), vec!["ab"; 3]);
    assert!(Sequence::repeat(1, 0).to_vec().is_empty());

    let from_vec: Sequence<i32> = vec![1, 2].into();
    assert!(from_vec.is_materialized());
    let collected: Sequence<i32> = (1..=3).collect();
    assert_eq!(collected.to_vec(), vec![1, 2, 3]);
    let from_array = Sequence::from([9, 8]);
    assert_eq!(from_array.to_container::<Vec<_>>(), vec![9, 8]);
}

#[test]
fn test_count_uses_buffer_length() {
    let (seq, pulls) = counted(vec![1, 2, 3]);
    seq.flush();
    assert_eq!(pulls.get(), 3);
    assert_eq!((&seq).count(), 3);
    assert_eq!(seq.count(), 3);
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_dropping_partial_pipeline_releases_resources() {
    struct Guard(Rc<Cell<bool>>);
    impl Drop for Guard {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    let released = Rc::new(Cell::new(false));
    let guard = Guard(Rc::clone(&released));
    let pipeline = Sequence::from_generator(0..)
        .select(move |x: u64| {
            let _held = &guard;
            x * 2
        })
        .take(1_000);

    let mut cursor = pipeline.into_cursor();
    assert_eq!(cursor.next(), Some(0));
    assert_eq!(cursor.next(), Some(2));
    assert!(!released.get());
    drop(cursor);
    assert!(released.get());
}

#[test]
fn test_cursor_protocol() {
    let seq = Sequence::from(vec!['a', 'b']);
    let mut cursor = seq.cursor();
    assert!(!cursor.is_generator());
    let mut seen = String::new();
    while cursor.has_next() {
        if let Some(c) = cursor.current() {
            seen.push(*c);
        }
        cursor.advance();
    }
    assert_eq!(seen, "ab");
    assert!(Cursor::<char>::end().is_end());
}

#[test]
fn test_debug_does_not_flush() {
    let seq = Sequence::from_generator(vec![1, 2]);
    assert_eq!(format!("{seq:?}"), "Sequence<generator>");
    assert!(!seq.is_materialized());
    seq.flush();
    assert_eq!(format!("{seq:?}"), "Sequence[1, 2]");
}
