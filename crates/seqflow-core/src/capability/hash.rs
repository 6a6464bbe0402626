//! Hash-table strategy.

use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};

use super::{KeyGroups, KeySet, Strategy, StrategyKind};

/// Fixed-seed state so two runs over the same input iterate identically.
pub const HASH_RANDOM_STATE: RandomState = RandomState::with_seeds(0, 0, 0, 0);

#[derive(Debug, Clone)]
pub struct HashStrategy<S = RandomState> {
    state: S,
}

impl Default for HashStrategy<RandomState> {
    fn default() -> Self {
        Self {
            state: HASH_RANDOM_STATE,
        }
    }
}

impl<S> HashStrategy<S> {
    pub fn with_hasher(state: S) -> Self {
        Self { state }
    }
}

impl<K, S> Strategy<K> for HashStrategy<S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone + 'static,
{
    type Set = HashKeySet<K, S>;
    type Groups<V> = HashKeyGroups<K, V, S>;

    fn kind(&self) -> StrategyKind {
        StrategyKind::Hash
    }

    fn key_set(&self) -> Self::Set {
        HashKeySet {
            set: HashSet::with_hasher(self.state.clone()),
        }
    }

    fn key_groups<V>(&self) -> Self::Groups<V> {
        HashKeyGroups {
            map: HashMap::with_hasher(self.state.clone()),
        }
    }
}

#[derive(Debug)]
pub struct HashKeySet<K, S> {
    set: HashSet<K, S>,
}

impl<K: Hash + Eq, S: BuildHasher> KeySet<K> for HashKeySet<K, S> {
    fn insert(&mut self, key: K) -> bool {
        // hashbrown keeps the existing key on collision.
        self.set.insert(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.set.contains(key)
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn into_vec(self) -> Vec<K> {
        self.set.into_iter().collect()
    }
}

#[derive(Debug)]
pub struct HashKeyGroups<K, V, S> {
    map: HashMap<K, Vec<V>, S>,
}

impl<K: Hash + Eq, V, S: BuildHasher> KeyGroups<K, V> for HashKeyGroups<K, V, S> {
    fn push(&mut self, key: K, value: V) {
        self.map.entry(key).or_default().push(value);
    }

    fn get(&self, key: &K) -> &[V] {
        self.map.get(key).map_or(&[], Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn into_vec(self) -> Vec<(K, Vec<V>)> {
        self.map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_order_is_repeatable() {
        let run = || {
            let mut set = Strategy::<&str>::key_set(&HashStrategy::default());
            for k in ["delta", "alpha", "charlie", "bravo", "alpha"] {
                set.insert(k);
            }
            set.into_vec()
        };
        let first = run();
        assert_eq!(first.len(), 4);
        assert_eq!(first, run());
    }

    #[test]
    fn test_groups_keep_value_order() {
        let mut groups = Strategy::<u8>::key_groups::<&str>(&HashStrategy::default());
        groups.push(1u8, "a");
        groups.push(2u8, "b");
        groups.push(1u8, "c");
        assert_eq!(groups.get(&1), &["a", "c"]);
        assert!(groups.get(&9).is_empty());
        assert_eq!(groups.len(), 2);
    }
}
