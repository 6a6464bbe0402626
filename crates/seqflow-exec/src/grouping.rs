//! `Grouping<K, V>`: a sequence of elements tagged with the key they share.

use std::fmt;
use std::ops::Deref;

use crate::cursor::Cursor;
use crate::sequence::Sequence;

pub struct Grouping<K, V> {
    key: K,
    elements: Sequence<V>,
}

impl<K, V> Grouping<K, V> {
    pub fn new(key: K, elements: Sequence<V>) -> Self {
        Self { key, elements }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_parts(self) -> (K, Sequence<V>) {
        (self.key, self.elements)
    }

    pub fn elements(&self) -> &Sequence<V> {
        &self.elements
    }

    pub(crate) fn into_elements(self) -> Sequence<V> {
        self.elements
    }
}

impl<K, V> Deref for Grouping<K, V> {
    type Target = Sequence<V>;

    fn deref(&self) -> &Sequence<V> {
        &self.elements
    }
}

impl<K: Clone, V> Clone for Grouping<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            elements: self.elements.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq + 'static> PartialEq for Grouping<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.elements == other.elements
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Grouping<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouping")
            .field("key", &self.key)
            .field("elements", &self.elements)
            .finish()
    }
}

impl<K, V: Clone + 'static> IntoIterator for Grouping<K, V> {
    type Item = V;
    type IntoIter = Cursor<V>;

    fn into_iter(self) -> Cursor<V> {
        self.elements.into_cursor()
    }
}

impl<'a, K, V: Clone + 'static> IntoIterator for &'a Grouping<K, V> {
    type Item = V;
    type IntoIter = Cursor<V>;

    fn into_iter(self) -> Cursor<V> {
        self.elements.cursor()
    }
}
