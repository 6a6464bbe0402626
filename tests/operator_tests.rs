//! Streaming operator tests: projection, filtering, windowing, composition

use seqflow::prelude::*;

fn words() -> Sequence<&'static str> {
    Sequence::from(vec!["apple", "kiwi", "banana", "fig", "cherry"])
}

#[test]
fn test_select_and_filter_chain() {
    let lengths = words()
        .filter(|w| w.len() > 3)
        .select(|w| w.len())
        .to_vec();
    assert_eq!(lengths, vec![5, 4, 6, 6]);
}

#[test]
fn test_indexed_variants_see_source_positions() {
    let tagged = words()
        .select_indexed(|w, i| format!("{i}:{w}"))
        .to_vec();
    assert_eq!(tagged[0], "0:apple");
    assert_eq!(tagged[4], "4:cherry");

    let odd_positions = words().filter_indexed(|_, i| i % 2 == 1).to_vec();
    assert_eq!(odd_positions, vec!["kiwi", "fig"]);
}

#[test]
fn test_select_many_flattens() {
    let chars = Sequence::from(vec!["ab", "", "c"])
        .select_many(|s| s.chars().collect::<Vec<_>>())
        .to_container::<String>();
    assert_eq!(chars, "abc");

    let pairs = Sequence::from(vec![1, 2])
        .select_many_with(|n| 0..*n, |n, k| (*n, k))
        .to_vec();
    assert_eq!(pairs, vec![(1, 0), (2, 0), (2, 1)]);

    let indexed = Sequence::from(vec!['x', 'y'])
        .select_many_indexed(|c, i| vec![*c; i + 1])
        .to_container::<String>();
    assert_eq!(indexed, "xyy");
}

#[test]
fn test_take_and_skip_bounds() {
    let seq = Sequence::from(vec![1, 2, 3]);
    assert_eq!((&seq).take(3).to_vec(), vec![1, 2, 3]);
    assert_eq!((&seq).take(10).to_vec(), vec![1, 2, 3]);
    assert!((&seq).take(0).to_vec().is_empty());
    assert!((&seq).skip(5).to_vec().is_empty());
    assert_eq!((&seq).skip(0).to_vec(), vec![1, 2, 3]);
    assert_eq!(seq.skip(1).take(1).to_vec(), vec![2]);
}

#[test]
fn test_take_stops_pulling_infinite_source() {
    let first = Sequence::from_generator(1u64..).take(4).to_vec();
    assert_eq!(first, vec![1, 2, 3, 4]);
}

#[test]
fn test_while_variants() {
    let seq = Sequence::from(vec![1, 2, 5, 1, 7]);
    assert_eq!((&seq).take_while(|x| *x < 3).to_vec(), vec![1, 2]);
    assert_eq!((&seq).skip_while(|x| *x < 3).to_vec(), vec![5, 1, 7]);
    assert_eq!(
        (&seq).take_while_indexed(|x, i| *x > i as i32).to_vec(),
        vec![1, 2, 5]
    );
    assert_eq!(
        (&seq).skip_while_indexed(|_, i| i < 4).to_vec(),
        vec![7]
    );
}

#[test]
fn test_skip_last_and_take_last() {
    let seq = Sequence::range(1, 5);
    assert_eq!((&seq).take_last(2).to_vec(), vec![4, 5]);
    assert_eq!((&seq).skip_last(2).to_vec(), vec![1, 2, 3]);
    assert_eq!((&seq).take_last(9).to_vec(), vec![1, 2, 3, 4, 5]);
    assert!(seq.skip_last(9).to_vec().is_empty());
}

#[test]
fn test_composition() {
    let joined = Sequence::from(vec![2, 3])
        .prepend(1)
        .append(4)
        .concat(vec![5, 6])
        .to_vec();
    assert_eq!(joined, vec![1, 2, 3, 4, 5, 6]);

    let a = Sequence::from(vec![1]);
    let b = Sequence::from_generator(vec![2, 3]);
    assert_eq!(a.concat(&b).to_vec(), vec![1, 2, 3]);
    assert_eq!(b.count(), 2);
}

#[test]
fn test_default_if_empty() {
    assert_eq!(Sequence::<i32>::empty().default_if_empty(7).to_vec(), vec![7]);
    assert_eq!(Sequence::from(vec![1, 2]).default_if_empty(7).to_vec(), vec![1, 2]);
}

#[test]
fn test_zip_ends_with_shorter_input() {
    let zipped = Sequence::from(vec![1, 2, 3]).zip(vec!['a', 'b']).to_vec();
    assert_eq!(zipped, vec![(1, 'a'), (2, 'b')]);

    let sums = Sequence::range(0, 3)
        .zip_with(Sequence::repeat(10, 5), |a, b| a + b)
        .to_vec();
    assert_eq!(sums, vec![10, 11, 12]);
}

#[test]
fn test_grouping_is_queryable() {
    let groups = Sequence::from(vec![1, 2, 3, 4, 5, 6])
        .group_by_order(|x| x % 2, |x| x, Grouping::new)
        .to_vec();
    let evens = &groups[0];
    assert_eq!(*evens.key(), 0);
    assert_eq!(evens.select(|x| x * 10).to_vec(), vec![20, 40, 60]);
    assert_eq!(evens.count(), 3);
}

#[test]
fn test_attach_is_recorded() {
    seqflow::metrics::reset();
    let before = seqflow::metrics::snapshot();
    let _pipeline = Sequence::range(0, 10).filter(|x| *x > 2).select(|x| x + 1);
    let delta = seqflow::metrics::snapshot().since(&before);
    assert_eq!(delta.operators_attached, 2);
    assert_eq!(delta.flushes, 0);
}
