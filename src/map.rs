//! Ordered map with unique keys, a thin wrapper enforcing the
//! one-entry-per-key policy above the engine.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::iter::{IntoIter, IntoKeys, IntoValues, Iter, Keys, Values};
use crate::tree::{BPlusTree, KeyOrder, Natural};
use std::{
    borrow::Borrow,
    fmt,
    fmt::Debug,
    hash::{Hash, Hasher},
    ops::Index,
};

/// Branching factor used by `Default`, `FromIterator` and serde
/// deserialization.
pub const DEFAULT_ORDER: usize = 64;

/// Ordered map from keys to values with entries kept sorted by a
/// caller-supplied total ordering. Keys are unique; `insert` replaces,
/// [`OrderedMap::try_insert`] rejects.
pub struct OrderedMap<K, V, C = Natural> {
    tree: BPlusTree<K, V, C>,
}

impl<K, V> OrderedMap<K, V> {
    /// Returns a new, empty map ordered by [`Ord`].
    ///
    /// Fails with [`Error::InvalidArgument`] unless `order` is an even
    /// integer in `MIN_ORDER..=MAX_ORDER`.
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self {
            tree: BPlusTree::new(order)?,
        })
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns a new, empty map with a caller-supplied key ordering.
    pub fn with_key_order(order: usize, cmp: C) -> Result<Self> {
        Ok(Self {
            tree: BPlusTree::with_key_order(order, cmp)?,
        })
    }

    /// Number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.count()
    }

    /// Is the map empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of branch levels below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// The branching factor the map was built with.
    #[must_use]
    pub fn order(&self) -> usize {
        self.tree.order()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The underlying engine, for use with detached cursors.
    ///
    /// Cursor operations take the engine by reference:
    /// `cursor.move_next(map.as_tree())`.
    #[must_use]
    pub fn as_tree(&self) -> &BPlusTree<K, V, C> {
        &self.tree
    }

    /// Get iterator of references to key-value pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Get iterator of references to keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Get iterator of references to values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Get consuming iterator of keys, in sorted order.
    #[must_use]
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.tree.into_iter())
    }

    /// Get consuming iterator of values, in key-sorted order.
    #[must_use]
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.tree.into_iter())
    }

    /// Cursor positioned before the first entry.
    #[must_use]
    pub fn iter_begin(&self) -> Cursor<K, V, C> {
        self.tree.iter_begin()
    }

    /// Cursor positioned after the last entry.
    #[must_use]
    pub fn iter_end(&self) -> Cursor<K, V, C> {
        self.tree.iter_end()
    }

    /// References to the first key and value.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    /// References to the last key and value.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    /// Cursor positioned at the first key `>=` the probe
    /// (`upper = false`) or `>` the probe (`upper = true`).
    pub fn find_bound<Q>(&self, key: &Q, upper: bool) -> Cursor<K, V, C>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.find_bound(key, upper)
    }

    /// Does the map have an entry for the key?
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.contains(key)
    }

    /// Reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.get(key)
    }

    /// Mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.get_mut(key)
    }

    /// Reference to the value corresponding to the key, or
    /// [`Error::NotFound`] when the key is absent.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.get(key).ok_or(Error::NotFound)
    }

    /// Insert a key-value pair, replacing and returning the previous
    /// value if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Clone,
        C: KeyOrder<K>,
    {
        self.tree.replace(key, value)
    }

    /// Insert a key-value pair, failing with [`Error::DuplicateKey`]
    /// when the key is already present. Nothing is updated on failure.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<()>
    where
        K: Clone,
        C: KeyOrder<K>,
    {
        if self.tree.try_insert(key, value) {
            Ok(())
        } else {
            Err(Error::DuplicateKey)
        }
    }

    /// Remove the entry for the key, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Clone,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.remove_entry(key).map(|(_k, v)| v)
    }

    /// Remove the entry for the key, returning the key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Clone,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.tree.remove_entry(key)
    }

    /// Remove and return the first entry in key order.
    pub fn pop_first(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.tree.pop_first()
    }

    /// Remove and return the last entry in key order.
    pub fn pop_last(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.tree.pop_last()
    }

    /// Copy all entries in key order into the head of `dest`, returning
    /// the number copied.
    ///
    /// Fails with [`Error::CapacityExceeded`] when `dest` is shorter
    /// than `len()`; nothing is written in that case.
    pub fn copy_into(&self, dest: &mut [(K, V)]) -> Result<usize>
    where
        K: Clone,
        V: Clone,
    {
        if dest.len() < self.len() {
            return Err(Error::CapacityExceeded {
                required: self.len(),
                capacity: dest.len(),
            });
        }
        for (slot, (k, v)) in dest.iter_mut().zip(self.iter()) {
            *slot = (k.clone(), v.clone());
        }
        Ok(self.len())
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER).expect("DEFAULT_ORDER is a valid order")
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Debug, V: Debug, C> Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for OrderedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consume the map, yielding entries in ascending key order.
    fn into_iter(self) -> IntoIter<K, V> {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for OrderedMap<K, V, C>
where
    K: Clone,
    C: KeyOrder<K>,
{
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, Q, V, C> Index<&Q> for OrderedMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: KeyOrder<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied
    /// key.
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

#[cfg(feature = "serde")]
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[cfg(feature = "serde")]
impl<K, V, C> Serialize for OrderedMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> OrderedMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord + Clone,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = OrderedMap::default();
        while let Some((k, v)) = access.next_entry()? {
            map.insert(k, v);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Ord + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
