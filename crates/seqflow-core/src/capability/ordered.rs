//! Balanced-tree strategy. Iteration is key-sorted under the comparer.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use super::{KeyGroups, KeySet, Natural, OrderComparer, Strategy, StrategyKind};

pub struct OrderStrategy<C = Natural> {
    comparer: Rc<C>,
}

impl Default for OrderStrategy<Natural> {
    fn default() -> Self {
        Self::new(Natural)
    }
}

impl<C> OrderStrategy<C> {
    pub fn new(comparer: C) -> Self {
        Self {
            comparer: Rc::new(comparer),
        }
    }
}

impl<C> Clone for OrderStrategy<C> {
    fn clone(&self) -> Self {
        Self {
            comparer: Rc::clone(&self.comparer),
        }
    }
}

impl<C> fmt::Debug for OrderStrategy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStrategy").finish_non_exhaustive()
    }
}

impl<K, C> Strategy<K> for OrderStrategy<C>
where
    K: Clone + 'static,
    C: OrderComparer<K>,
{
    type Set = OrderedKeySet<K, C>;
    type Groups<V> = OrderedKeyGroups<K, V, C>;

    fn kind(&self) -> StrategyKind {
        StrategyKind::Ordered
    }

    fn key_set(&self) -> Self::Set {
        OrderedKeySet {
            set: BTreeSet::new(),
            comparer: Rc::clone(&self.comparer),
        }
    }

    fn key_groups<V>(&self) -> Self::Groups<V> {
        OrderedKeyGroups {
            map: BTreeMap::new(),
            comparer: Rc::clone(&self.comparer),
        }
    }
}

/// A key carrying the comparer that orders it inside the tree.
struct Ranked<K, C> {
    key: K,
    comparer: Rc<C>,
}

impl<K, C: OrderComparer<K>> PartialEq for Ranked<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, C: OrderComparer<K>> Eq for Ranked<K, C> {}

impl<K, C: OrderComparer<K>> PartialOrd for Ranked<K, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, C: OrderComparer<K>> Ord for Ranked<K, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparer.compare(&self.key, &other.key)
    }
}

pub struct OrderedKeySet<K, C> {
    set: BTreeSet<Ranked<K, C>>,
    comparer: Rc<C>,
}

/// Lookup key for `contains`/`get`. The tree only compares `Ranked` values,
/// so each lookup clones the key; `Borrow` cannot carry the comparer.
fn ranked<K: Clone, C>(key: &K, comparer: &Rc<C>) -> Ranked<K, C> {
    Ranked {
        key: key.clone(),
        comparer: Rc::clone(comparer),
    }
}

impl<K: Clone, C: OrderComparer<K>> KeySet<K> for OrderedKeySet<K, C> {
    fn insert(&mut self, key: K) -> bool {
        // BTreeSet::insert leaves an equal existing element untouched.
        self.set.insert(Ranked {
            key,
            comparer: Rc::clone(&self.comparer),
        })
    }

    fn contains(&self, key: &K) -> bool {
        self.set.contains(&ranked(key, &self.comparer))
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn into_vec(self) -> Vec<K> {
        self.set.into_iter().map(|r| r.key).collect()
    }
}

pub struct OrderedKeyGroups<K, V, C> {
    map: BTreeMap<Ranked<K, C>, Vec<V>>,
    comparer: Rc<C>,
}

impl<K: Clone, V, C: OrderComparer<K>> KeyGroups<K, V> for OrderedKeyGroups<K, V, C> {
    fn push(&mut self, key: K, value: V) {
        let ranked = Ranked {
            key,
            comparer: Rc::clone(&self.comparer),
        };
        self.map.entry(ranked).or_default().push(value);
    }

    fn get(&self, key: &K) -> &[V] {
        self.map
            .get(&ranked(key, &self.comparer))
            .map_or(&[], Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn into_vec(self) -> Vec<(K, Vec<V>)> {
        self.map.into_iter().map(|(r, vs)| (r.key, vs)).collect()
    }
}
