//! Linear-equality strategy: the fallback for keys that are neither hashable
//! nor totally ordered.
//!
//! Every insert and lookup scans the accumulator, so building a structure of
//! `n` distinct keys costs O(n²) comparisons. Output is first-occurrence order.

use std::fmt;
use std::rc::Rc;

use super::{EqualityComparer, KeyGroups, KeySet, Natural, Strategy, StrategyKind};
use crate::config;

pub struct EqualityStrategy<E = Natural> {
    comparer: Rc<E>,
}

impl Default for EqualityStrategy<Natural> {
    fn default() -> Self {
        Self::new(Natural)
    }
}

impl<E> EqualityStrategy<E> {
    pub fn new(comparer: E) -> Self {
        Self {
            comparer: Rc::new(comparer),
        }
    }
}

impl<E> Clone for EqualityStrategy<E> {
    fn clone(&self) -> Self {
        Self {
            comparer: Rc::clone(&self.comparer),
        }
    }
}

impl<E> fmt::Debug for EqualityStrategy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityStrategy").finish_non_exhaustive()
    }
}

impl<K, E> Strategy<K> for EqualityStrategy<E>
where
    E: EqualityComparer<K>,
{
    type Set = LinearKeySet<K, E>;
    type Groups<V> = LinearKeyGroups<K, V, E>;

    fn kind(&self) -> StrategyKind {
        StrategyKind::Linear
    }

    fn key_set(&self) -> Self::Set {
        LinearKeySet {
            keys: Vec::new(),
            comparer: Rc::clone(&self.comparer),
            watch: ScanWatch::new(),
        }
    }

    fn key_groups<V>(&self) -> Self::Groups<V> {
        LinearKeyGroups {
            groups: Vec::new(),
            comparer: Rc::clone(&self.comparer),
            watch: ScanWatch::new(),
        }
    }
}

/// Warns once when an accumulator grows past the configured threshold.
struct ScanWatch {
    threshold: usize,
    warned: bool,
}

impl ScanWatch {
    fn new() -> Self {
        Self {
            threshold: config::global().linear_scan_warn_threshold,
            warned: false,
        }
    }

    fn observe(&mut self, len: usize) {
        if self.warned || len < self.threshold {
            return;
        }
        self.warned = true;
        #[cfg(feature = "tracing")]
        tracing::warn!(
            entries = len,
            threshold = self.threshold,
            "linear-equality accumulator passed warning threshold; each lookup is O(n)"
        );
    }
}

pub struct LinearKeySet<K, E> {
    keys: Vec<K>,
    comparer: Rc<E>,
    watch: ScanWatch,
}

impl<K, E: EqualityComparer<K>> KeySet<K> for LinearKeySet<K, E> {
    fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        self.watch.observe(self.keys.len());
        true
    }

    fn contains(&self, key: &K) -> bool {
        self.keys.iter().any(|k| self.comparer.equals(k, key))
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn into_vec(self) -> Vec<K> {
        self.keys
    }
}

pub struct LinearKeyGroups<K, V, E> {
    groups: Vec<(K, Vec<V>)>,
    comparer: Rc<E>,
    watch: ScanWatch,
}

impl<K, V, E: EqualityComparer<K>> LinearKeyGroups<K, V, E> {
    fn position(&self, key: &K) -> Option<usize> {
        self.groups
            .iter()
            .position(|(k, _)| self.comparer.equals(k, key))
    }
}

impl<K, V, E: EqualityComparer<K>> KeyGroups<K, V> for LinearKeyGroups<K, V, E> {
    fn push(&mut self, key: K, value: V) {
        match self.position(&key) {
            Some(i) => self.groups[i].1.push(value),
            None => {
                self.groups.push((key, vec![value]));
                self.watch.observe(self.groups.len());
            }
        }
    }

    fn get(&self, key: &K) -> &[V] {
        self.position(key)
            .map_or(&[], |i| self.groups[i].1.as_slice())
    }

    fn len(&self) -> usize {
        self.groups.len()
    }

    fn into_vec(self) -> Vec<(K, Vec<V>)> {
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_in_first_occurrence_order() {
        let mut groups = Strategy::<f64>::key_groups::<f64>(&EqualityStrategy::default());
        for (k, v) in [(8.0, 8.3), (4.0, 4.9), (1.0, 1.5), (4.0, 4.3)] {
            groups.push(k, v);
        }
        assert_eq!(
            groups.into_vec(),
            vec![(8.0, vec![8.3]), (4.0, vec![4.9, 4.3]), (1.0, vec![1.5])]
        );
    }

    #[test]
    fn test_custom_equality_lookup() {
        let mod3 = EqualityStrategy::new(|a: &i32, b: &i32| a % 3 == b % 3);
        let mut groups = Strategy::<i32>::key_groups::<&str>(&mod3);
        groups.push(1, "one");
        groups.push(4, "four");
        assert_eq!(groups.get(&7), &["one", "four"]);
        assert!(groups.get(&3).is_empty());
    }

    #[test]
    fn test_watch_flags_once() {
        let mut watch = ScanWatch {
            threshold: 2,
            warned: false,
        };
        watch.observe(1);
        assert!(!watch.warned);
        watch.observe(2);
        assert!(watch.warned);
        watch.observe(3);
        assert!(watch.warned);
    }
}
