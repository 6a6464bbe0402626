//! Comparison strategies for deduplication, grouping, and joining.
//!
//! Three strategies back every operator that compares keys:
//! - [`HashStrategy`]: hash table, order follows the (fixed-seed) table iteration.
//! - [`OrderStrategy`]: balanced tree, order is key-sorted.
//! - [`EqualityStrategy`]: linear scan over an accumulator, order is first
//!   occurrence. O(n²) in the number of distinct keys.
//!
//! [`Cascade`] picks one statically for a key type (hash, then order, then
//! equality). Operators also accept any [`Strategy`] explicitly.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

mod cascade;
pub mod hash;
pub mod linear;
pub mod ordered;

pub use cascade::Cascade;
pub use hash::{HashKeyGroups, HashKeySet, HashStrategy, HASH_RANDOM_STATE};
pub use linear::{EqualityStrategy, LinearKeyGroups, LinearKeySet};
pub use ordered::{OrderStrategy, OrderedKeyGroups, OrderedKeySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Hash,
    Ordered,
    Linear,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Hash => "hash",
            StrategyKind::Ordered => "ordered",
            StrategyKind::Linear => "linear",
        })
    }
}

/// A deduplicating key collection.
pub trait KeySet<K> {
    /// Insert `key` unless an equal key is present. Returns whether it was
    /// inserted; the first inserted representative is kept.
    fn insert(&mut self, key: K) -> bool;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining keys in the strategy's iteration order.
    fn into_vec(self) -> Vec<K>;
}

/// A key → values multimap. Values under one key keep insertion order.
pub trait KeyGroups<K, V> {
    fn push(&mut self, key: K, value: V);

    /// Values recorded under `key`; empty when the key was never pushed.
    fn get(&self, key: &K) -> &[V];

    /// Number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_vec(self) -> Vec<(K, Vec<V>)>;
}

/// Factory for the structures an operator needs to compare keys of type `K`.
pub trait Strategy<K>: 'static {
    type Set: KeySet<K>;
    type Groups<V>: KeyGroups<K, V>;

    fn kind(&self) -> StrategyKind;

    fn key_set(&self) -> Self::Set;

    fn key_groups<V>(&self) -> Self::Groups<V>;
}

/// Total order over `K` used by [`OrderStrategy`].
pub trait OrderComparer<K>: 'static {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Equivalence over `K` used by [`EqualityStrategy`].
pub trait EqualityComparer<K>: 'static {
    fn equals(&self, a: &K, b: &K) -> bool;
}

/// The key type's own `Ord` / `PartialEq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord> OrderComparer<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: PartialEq> EqualityComparer<K> for Natural {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

impl<K, F> OrderComparer<K> for F
where
    F: Fn(&K, &K) -> Ordering + 'static,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

impl<K, F> EqualityComparer<K> for F
where
    F: Fn(&K, &K) -> bool + 'static,
{
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
