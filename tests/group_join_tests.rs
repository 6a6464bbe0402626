//! Join, group join, and group by tests

use seqflow::prelude::*;
use seqflow::HashStrategy;

#[derive(Debug, Clone, PartialEq)]
struct Order {
    customer: u32,
    total: f64,
}

fn orders() -> Vec<Order> {
    vec![
        Order { customer: 2, total: 10.0 },
        Order { customer: 1, total: 4.5 },
        Order { customer: 2, total: 1.5 },
    ]
}

fn customers() -> Sequence<(u32, &'static str)> {
    Sequence::from(vec![(1, "ada"), (2, "brian"), (3, "carla")])
}

#[test]
fn test_join_cardinality() {
    let outer = Sequence::from(vec![1, 2, 2]);
    let inner = vec![(1, "x"), (2, "y"), (2, "z")];
    let joined = outer
        .join(inner, |k| *k, |(k, _)| *k, |k, (_, v)| (k, v))
        .to_vec();
    assert_eq!(
        joined,
        vec![(1, "x"), (2, "y"), (2, "z"), (2, "y"), (2, "z")]
    );
}

#[test]
fn test_join_drops_unmatched() {
    let names = customers()
        .join(
            orders(),
            |(id, _)| *id,
            |o| o.customer,
            |(_, name), o| (name, o.total),
        )
        .to_vec();
    assert_eq!(names, vec![("ada", 4.5), ("brian", 10.0), ("brian", 1.5)]);
}

#[test]
fn test_join_strategies_agree() {
    let outer = vec![3, 1, 2];
    let inner = vec![2, 3, 3];
    let hashed = Sequence::from(outer.clone())
        .join_by_hash(inner.clone(), |x| *x, |x| *x, |a, b| a * 10 + b)
        .to_vec();
    let ordered = Sequence::from(outer.clone())
        .join_by_order(inner.clone(), |x| *x, |x| *x, |a, b| a * 10 + b)
        .to_vec();
    let linear = Sequence::from(outer.clone())
        .join_by_equality(inner.clone(), |x| *x, |x| *x, |a, b| a * 10 + b)
        .to_vec();
    let explicit = Sequence::from(outer)
        .join_with(inner, |x| *x, |x| *x, |a, b| a * 10 + b, HashStrategy::default())
        .to_vec();
    assert_eq!(hashed, vec![33, 33, 22]);
    assert_eq!(hashed, ordered);
    assert_eq!(hashed, linear);
    assert_eq!(hashed, explicit);
}

#[test]
fn test_join_on_float_keys_uses_linear_scan() {
    let outer = Sequence::from(vec![0.5, 1.5]);
    let out = outer
        .join(vec![1.5, 1.5, 2.5], |x| *x, |x| *x, |a, _| a)
        .to_vec();
    assert_eq!(out, vec![1.5, 1.5]);
}

#[test]
fn test_group_join_keeps_every_outer_element() {
    let totals = customers()
        .group_join(
            orders(),
            |(id, _)| *id,
            |o| o.customer,
            |(_, name), matches| (name, matches.count()),
        )
        .to_vec();
    assert_eq!(totals, vec![("ada", 1), ("brian", 2), ("carla", 0)]);
}

#[test]
fn test_group_join_matches_are_queryable() {
    let spent = customers()
        .group_join_by_order(
            orders(),
            |(id, _)| *id,
            |o| o.customer,
            |(_, name), matches| {
                (name, matches.aggregate(0.0_f64, |acc, o: Order| acc + o.total))
            },
        )
        .to_vec();
    assert_eq!(spent[1], ("brian", 11.5));
    assert_eq!(spent[2], ("carla", 0.0));
}

#[test]
fn test_group_by_truncated_floats() {
    let groups = Sequence::from(vec![8.3, 4.9, 1.5, 4.3])
        .group_by(|x: &f64| x.trunc() as i64)
        .to_vec();

    let mut flat: Vec<(i64, Vec<f64>)> = groups
        .iter()
        .map(|g| (*g.key(), g.to_vec()))
        .collect();
    flat.sort_by_key(|(k, _)| *k);
    assert_eq!(
        flat,
        vec![(1, vec![1.5]), (4, vec![4.9, 4.3]), (8, vec![8.3])]
    );
}

#[test]
fn test_group_by_order_and_equality_output_order() {
    let input = vec!["bb", "a", "cc", "d", "eee"];
    let ordered = Sequence::from(input.clone())
        .group_by_order(|s| s.len(), |s| s, |k, g| (k, g.to_vec()))
        .to_vec();
    assert_eq!(
        ordered,
        vec![(1, vec!["a", "d"]), (2, vec!["bb", "cc"]), (3, vec!["eee"])]
    );

    let linear = Sequence::from(input)
        .group_by_equality(|s| s.len(), |s| s.to_uppercase(), |k, g| (k, g.count()))
        .to_vec();
    assert_eq!(linear, vec![(2, 2), (1, 2), (3, 1)]);
}

#[test]
fn test_group_by_element_and_result() {
    let mut by_customer = Sequence::from(orders())
        .group_by_element(|o| o.customer, |o| o.total)
        .select(|g| (*g.key(), g.aggregate(0.0_f64, |a, t| a + t)))
        .to_vec();
    by_customer.sort_by_key(|(c, _)| *c);
    assert_eq!(by_customer, vec![(1, 4.5), (2, 11.5)]);

    let mut counts = Sequence::from(orders())
        .group_by_result(|o| o.customer, |o| o, |k, g| (k, g.count()))
        .to_vec();
    counts.sort();
    assert_eq!(counts, vec![(1, 1), (2, 2)]);
}

#[test]
fn test_grouping_parts() {
    let groups = Sequence::from(vec![1, 1, 2])
        .group_by_order(|x| *x, |x| x, Grouping::new)
        .to_vec();
    let (key, elements) = groups[0].clone().into_parts();
    assert_eq!(key, 1);
    assert_eq!(elements.to_vec(), vec![1, 1]);
    assert_eq!(groups[1].elements().count(), 1);
}

#[test]
fn test_group_by_defers_until_read() {
    let source = Sequence::from_generator(vec![1, 2, 3]);
    let grouped = source.group_by(|x| x % 2);
    assert!(!grouped.is_materialized());
    assert_eq!(grouped.count(), 2);
}
