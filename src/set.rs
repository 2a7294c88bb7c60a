//! Ordered set of keys, plus the sorted dual-iteration set algebra.
//!
//! All set-algebra operations walk the two sets' sorted iterators in
//! lock-step, so they run in O(n + m) with no storage beyond the two
//! walks. The left-hand set's key ordering drives every comparison;
//! combining sets built with different orderings is a caller error.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::iter::{IntoKeys, Keys};
use crate::tree::{BPlusTree, KeyOrder, Natural};
use crate::{Error, OrderedMap};
use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    fmt::Debug,
    iter::{FusedIterator, Peekable},
};

/// Ordered set of keys kept sorted by a caller-supplied total ordering.
pub struct OrderedSet<K, C = Natural> {
    map: OrderedMap<K, (), C>,
}

impl<K> OrderedSet<K> {
    /// Returns a new, empty set ordered by [`Ord`].
    ///
    /// Fails with [`Error::InvalidArgument`] unless `order` is an even
    /// integer in `MIN_ORDER..=MAX_ORDER`.
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self {
            map: OrderedMap::new(order)?,
        })
    }
}

impl<K, C> OrderedSet<K, C> {
    /// Returns a new, empty set with a caller-supplied key ordering.
    pub fn with_key_order(order: usize, cmp: C) -> Result<Self> {
        Ok(Self {
            map: OrderedMap::with_key_order(order, cmp)?,
        })
    }

    /// Number of keys in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Is the set empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all keys.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// The underlying engine, for use with detached cursors.
    #[must_use]
    pub fn as_tree(&self) -> &BPlusTree<K, (), C> {
        self.map.as_tree()
    }

    /// Iterator of key references in ascending order.
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, K> {
        SetIter(self.map.keys())
    }

    /// Cursor positioned before the first key.
    #[must_use]
    pub fn iter_begin(&self) -> Cursor<K, (), C> {
        self.map.iter_begin()
    }

    /// Cursor positioned after the last key.
    #[must_use]
    pub fn iter_end(&self) -> Cursor<K, (), C> {
        self.map.iter_end()
    }

    /// Cursor positioned at the first key `>=` the probe
    /// (`upper = false`) or `>` the probe (`upper = true`).
    pub fn find_bound<Q>(&self, key: &Q, upper: bool) -> Cursor<K, (), C>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.map.find_bound(key, upper)
    }

    /// Reference to the first key in order.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.map.first_key_value().map(|(k, _)| k)
    }

    /// Reference to the last key in order.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.map.last_key_value().map(|(k, _)| k)
    }

    /// Does the set contain the key?
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.map.contains_key(key)
    }

    /// Add a key to the set. Returns whether the key was newly added.
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Clone,
        C: KeyOrder<K>,
    {
        self.map.try_insert(key, ()).is_ok()
    }

    /// Remove a key from the set. Returns whether the key was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q> + Clone,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        self.map.remove(key).is_some()
    }

    /// Remove and return the first key in order.
    pub fn pop_first(&mut self) -> Option<K>
    where
        K: Clone,
    {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Remove and return the last key in order.
    pub fn pop_last(&mut self) -> Option<K>
    where
        K: Clone,
    {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Copy all keys in order into the head of `dest`, returning the
    /// number copied.
    ///
    /// Fails with [`Error::CapacityExceeded`] when `dest` is shorter
    /// than `len()`; nothing is written in that case.
    pub fn copy_into(&self, dest: &mut [K]) -> Result<usize>
    where
        K: Clone,
    {
        if dest.len() < self.len() {
            return Err(Error::CapacityExceeded {
                required: self.len(),
                capacity: dest.len(),
            });
        }
        for (slot, k) in dest.iter_mut().zip(self.iter()) {
            *slot = k.clone();
        }
        Ok(self.len())
    }

    fn cmp(&self) -> &C {
        self.map.as_tree().key_order()
    }

    /// Iterator over the keys present in either set, each once.
    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, K, C>
    where
        C: KeyOrder<K>,
    {
        Union {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.cmp(),
        }
    }

    /// Iterator over the keys present in both sets.
    pub fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, K, C>
    where
        C: KeyOrder<K>,
    {
        Intersection {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.cmp(),
        }
    }

    /// Iterator over the keys present in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, K, C>
    where
        C: KeyOrder<K>,
    {
        Difference {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.cmp(),
        }
    }

    /// Iterator over the keys present in exactly one of the two sets.
    pub fn symmetric_difference<'a>(&'a self, other: &'a Self) -> SymmetricDifference<'a, K, C>
    where
        C: KeyOrder<K>,
    {
        SymmetricDifference {
            a: self.iter().peekable(),
            b: other.iter().peekable(),
            cmp: self.cmp(),
        }
    }

    /// Is every key of `self` also in `other`?
    pub fn is_subset(&self, other: &Self) -> bool
    where
        C: KeyOrder<K>,
    {
        if self.len() > other.len() {
            return false;
        }
        let mut rhs = other.iter();
        'outer: for x in self.iter() {
            for y in rhs.by_ref() {
                match self.cmp().cmp(y, x) {
                    Ordering::Less => {}
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// Is every key of `other` also in `self`?
    pub fn is_superset(&self, other: &Self) -> bool
    where
        C: KeyOrder<K>,
    {
        other.is_subset(self)
    }

    /// Is `self` a subset of `other` with strictly fewer keys?
    pub fn is_proper_subset(&self, other: &Self) -> bool
    where
        C: KeyOrder<K>,
    {
        self.len() < other.len() && self.is_subset(other)
    }

    /// Is `self` a superset of `other` with strictly more keys?
    pub fn is_proper_superset(&self, other: &Self) -> bool
    where
        C: KeyOrder<K>,
    {
        other.is_proper_subset(self)
    }

    /// Do the two sets share at least one key?
    pub fn overlaps(&self, other: &Self) -> bool
    where
        C: KeyOrder<K>,
    {
        let mut a = self.iter().peekable();
        let mut b = other.iter().peekable();
        loop {
            let (x, y) = match (a.peek().copied(), b.peek().copied()) {
                (Some(x), Some(y)) => (x, y),
                _ => return false,
            };
            match self.cmp().cmp(x, y) {
                Ordering::Less => {
                    a.next();
                }
                Ordering::Greater => {
                    b.next();
                }
                Ordering::Equal => return true,
            }
        }
    }

    /// Do the two sets hold exactly the same keys?
    pub fn set_equals(&self, other: &Self) -> bool
    where
        C: KeyOrder<K>,
    {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(x, y)| self.cmp().cmp(x, y) == Ordering::Equal)
    }
}

impl<K> Default for OrderedSet<K> {
    fn default() -> Self {
        Self {
            map: OrderedMap::default(),
        }
    }
}

impl<K: Clone, C: Clone> Clone for OrderedSet<K, C> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K: Debug, C> Debug for OrderedSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, C> PartialEq for OrderedSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, C> Eq for OrderedSet<K, C> {}

impl<K, C> Extend<K> for OrderedSet<K, C>
where
    K: Clone,
    C: KeyOrder<K>,
{
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = K>,
    {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<K: Ord + Clone> FromIterator<K> for OrderedSet<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K, C> IntoIterator for OrderedSet<K, C> {
    type Item = K;
    type IntoIter = SetIntoIter<K>;

    /// Consume the set, yielding keys in ascending order.
    fn into_iter(self) -> SetIntoIter<K> {
        SetIntoIter(self.map.into_keys())
    }
}

impl<'a, K, C> IntoIterator for &'a OrderedSet<K, C> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;
    fn into_iter(self) -> SetIter<'a, K> {
        self.iter()
    }
}

/// Iterator of key references, returned by [`OrderedSet::iter`].
#[derive(Clone)]
pub struct SetIter<'a, K>(Keys<'a, K, ()>);

impl<'a, K> Iterator for SetIter<'a, K> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K> DoubleEndedIterator for SetIter<'a, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<'a, K> ExactSizeIterator for SetIter<'a, K> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a, K> FusedIterator for SetIter<'a, K> {}

/// Consuming iterator of keys, returned by [`OrderedSet::into_iter`].
pub struct SetIntoIter<K>(IntoKeys<K, ()>);

impl<K> Iterator for SetIntoIter<K> {
    type Item = K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K> DoubleEndedIterator for SetIntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<K> ExactSizeIterator for SetIntoIter<K> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K> FusedIterator for SetIntoIter<K> {}

/// Merge iterator returned by [`OrderedSet::union`].
pub struct Union<'a, K, C> {
    a: Peekable<SetIter<'a, K>>,
    b: Peekable<SetIter<'a, K>>,
    cmp: &'a C,
}

impl<'a, K, C: KeyOrder<K>> Iterator for Union<'a, K, C> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        match (self.a.peek().copied(), self.b.peek().copied()) {
            (Some(x), Some(y)) => match self.cmp.cmp(x, y) {
                Ordering::Less => self.a.next(),
                Ordering::Greater => self.b.next(),
                Ordering::Equal => {
                    self.b.next();
                    self.a.next()
                }
            },
            (Some(_), None) => self.a.next(),
            (None, _) => self.b.next(),
        }
    }
}

impl<'a, K, C: KeyOrder<K>> FusedIterator for Union<'a, K, C> {}

/// Merge iterator returned by [`OrderedSet::intersection`].
pub struct Intersection<'a, K, C> {
    a: Peekable<SetIter<'a, K>>,
    b: Peekable<SetIter<'a, K>>,
    cmp: &'a C,
}

impl<'a, K, C: KeyOrder<K>> Iterator for Intersection<'a, K, C> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let x = *self.a.peek()?;
            let y = *self.b.peek()?;
            match self.cmp.cmp(x, y) {
                Ordering::Less => {
                    self.a.next();
                }
                Ordering::Greater => {
                    self.b.next();
                }
                Ordering::Equal => {
                    self.b.next();
                    return self.a.next();
                }
            }
        }
    }
}

impl<'a, K, C: KeyOrder<K>> FusedIterator for Intersection<'a, K, C> {}

/// Merge iterator returned by [`OrderedSet::difference`].
pub struct Difference<'a, K, C> {
    a: Peekable<SetIter<'a, K>>,
    b: Peekable<SetIter<'a, K>>,
    cmp: &'a C,
}

impl<'a, K, C: KeyOrder<K>> Iterator for Difference<'a, K, C> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let x = *self.a.peek()?;
            let y = match self.b.peek() {
                None => return self.a.next(),
                Some(&y) => y,
            };
            match self.cmp.cmp(x, y) {
                Ordering::Less => return self.a.next(),
                Ordering::Greater => {
                    self.b.next();
                }
                Ordering::Equal => {
                    self.a.next();
                    self.b.next();
                }
            }
        }
    }
}

impl<'a, K, C: KeyOrder<K>> FusedIterator for Difference<'a, K, C> {}

/// Merge iterator returned by [`OrderedSet::symmetric_difference`].
pub struct SymmetricDifference<'a, K, C> {
    a: Peekable<SetIter<'a, K>>,
    b: Peekable<SetIter<'a, K>>,
    cmp: &'a C,
}

impl<'a, K, C: KeyOrder<K>> Iterator for SymmetricDifference<'a, K, C> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match (self.a.peek().copied(), self.b.peek().copied()) {
                (Some(x), Some(y)) => match self.cmp.cmp(x, y) {
                    Ordering::Less => return self.a.next(),
                    Ordering::Greater => return self.b.next(),
                    Ordering::Equal => {
                        self.a.next();
                        self.b.next();
                    }
                },
                (Some(_), None) => return self.a.next(),
                (None, Some(_)) => return self.b.next(),
                (None, None) => return None,
            }
        }
    }
}

impl<'a, K, C: KeyOrder<K>> FusedIterator for SymmetricDifference<'a, K, C> {}

#[cfg(feature = "serde")]
use serde::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[cfg(feature = "serde")]
impl<K, C> Serialize for OrderedSet<K, C>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for k in self {
            seq.serialize_element(k)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedSetVisitor<K> {
    marker: std::marker::PhantomData<fn() -> OrderedSet<K>>,
}

#[cfg(feature = "serde")]
impl<'de, K> Visitor<'de> for OrderedSetVisitor<K>
where
    K: Deserialize<'de> + Ord + Clone,
{
    type Value = OrderedSet<K>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = OrderedSet::default();
        while let Some(k) = access.next_element()? {
            set.insert(k);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, K> Deserialize<'de> for OrderedSet<K>
where
    K: Deserialize<'de> + Ord + Clone,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
