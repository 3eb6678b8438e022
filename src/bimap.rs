//! Bidirectional map with unique lookup in both directions.

use crate::errors::BimapError;
use std::{
    borrow::Borrow,
    collections::HashMap,
    hash::Hash,
    slice,
};

/// An ordered collection of pairs in which no key repeats and no value
/// repeats, giving O(1)-class lookup in both directions.
///
/// Pairs are held once, in insertion order, with two hash indices over the
/// same storage: forward lookup for parameter and verb resolution, inverse
/// lookup for rendering a verb back to its name. The inverse direction is a
/// structural dual of the same store, not an independent copy.
///
/// Typical lifetime is build-once, read-many: static codec tables are
/// constructed at startup and never written again, which also makes them safe
/// for unsynchronized concurrent reads.
///
/// # Examples
/// ```
/// use fcgi_web::BijectiveMap;
///
/// let map = BijectiveMap::from_pairs([("one", 1), ("two", 2)]).unwrap();
///
/// assert_eq!(map.get("one"), Ok(&1));
/// assert_eq!(map.get_inverse(&2), Ok(&"two"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BijectiveMap<K, V> {
    pairs: Vec<(K, V)>,
    by_key: HashMap<K, usize>,
    by_value: HashMap<V, usize>,
}

impl<K, V> BijectiveMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            by_key: HashMap::new(),
            by_value: HashMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` pairs.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
            by_key: HashMap::with_capacity(capacity),
            by_value: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a map from a literal pair list, validating uniqueness of both
    /// sides.
    ///
    /// # Errors
    ///
    /// [`BimapError::DuplicateKey`] or [`BimapError::DuplicateValue`] if the
    /// list repeats a key or a value.
    ///
    /// # Examples
    /// ```
    /// use fcgi_web::{BijectiveMap, BimapError};
    ///
    /// assert!(BijectiveMap::from_pairs([("a", 1), ("b", 2)]).is_ok());
    /// assert_eq!(
    ///     BijectiveMap::from_pairs([("a", 1), ("a", 2)]),
    ///     Err(BimapError::DuplicateKey),
    /// );
    /// assert_eq!(
    ///     BijectiveMap::from_pairs([("a", 1), ("b", 1)]),
    ///     Err(BimapError::DuplicateValue),
    /// );
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Result<Self, BimapError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let iter = pairs.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);

        for (key, value) in iter {
            if map.by_key.contains_key(&key) {
                return Err(BimapError::DuplicateKey);
            }
            if map.by_value.contains_key(&value) {
                return Err(BimapError::DuplicateValue);
            }

            map.push_pair(key, value);
        }

        Ok(map)
    }

    /// Forward lookup: the value associated with `key`.
    ///
    /// Accepts any borrowed form of the key, so a `BijectiveMap<String, _>`
    /// can be queried with `&str`.
    ///
    /// # Errors
    ///
    /// [`BimapError::KeyNotFound`] if the key is absent.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Result<&V, BimapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.by_key
            .get(key)
            .map(|&slot| &self.pairs[slot].1)
            .ok_or(BimapError::KeyNotFound)
    }

    /// Inverse lookup: the key that owns `value`.
    ///
    /// O(1) through the dual index; no scan and no rebuilt storage.
    ///
    /// # Errors
    ///
    /// [`BimapError::ValueNotFound`] if the value is absent.
    #[inline]
    pub fn get_inverse<Q>(&self, value: &Q) -> Result<&K, BimapError>
    where
        V: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.by_value
            .get(value)
            .map(|&slot| &self.pairs[slot].0)
            .ok_or(BimapError::ValueNotFound)
    }

    /// Inserts a pair, or overwrites the value of an existing key.
    ///
    /// Overwriting a key keeps its insertion position. Re-setting the exact
    /// pair already present is a no-op.
    ///
    /// # Errors
    ///
    /// [`BimapError::InvariantViolation`] if `value` is already bound to a
    /// *different* key; the map is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use fcgi_web::{BijectiveMap, BimapError};
    ///
    /// let mut map = BijectiveMap::from_pairs([("a", 1), ("b", 2)]).unwrap();
    ///
    /// map.set("a", 3).unwrap(); // plain overwrite
    /// assert_eq!(map.get("a"), Ok(&3));
    ///
    /// // 2 is owned by "b"; stealing it is rejected
    /// assert_eq!(map.set("a", 2), Err(BimapError::InvariantViolation));
    /// assert_eq!(map.get("a"), Ok(&3));
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Result<(), BimapError> {
        if let Some(&owner) = self.by_value.get(&value) {
            if self.pairs[owner].0 != key {
                return Err(BimapError::InvariantViolation);
            }

            // Exact pair already present.
            return Ok(());
        }

        match self.by_key.get(&key) {
            Some(&slot) => {
                let old = std::mem::replace(&mut self.pairs[slot].1, value.clone());
                self.by_value.remove(&old);
                self.by_value.insert(value, slot);
            }
            None => self.push_pair(key, value),
        }

        Ok(())
    }

    /// Builds the flipped map (value → key).
    ///
    /// An O(n) one-time build; intended for static tables constructed once at
    /// startup. Hot-path inverse lookups should use [`get_inverse`] on the
    /// dual index instead. The result is always valid because the source is
    /// bijective.
    ///
    /// [`get_inverse`]: Self::get_inverse
    pub fn inverse(&self) -> BijectiveMap<V, K> {
        let mut flipped = BijectiveMap::with_capacity(self.pairs.len());

        for (key, value) in &self.pairs {
            flipped.push_pair(value.clone(), key.clone());
        }

        flipped
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.by_key.contains_key(key)
    }

    /// Returns `true` if `value` is present.
    #[inline]
    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.by_value.contains_key(value)
    }

    /// Iterates pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, (K, V)> {
        self.pairs.iter()
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    // Caller guarantees neither side is present.
    #[inline(always)]
    fn push_pair(&mut self, key: K, value: V) {
        let slot = self.pairs.len();
        self.by_key.insert(key.clone(), slot);
        self.by_value.insert(value.clone(), slot);
        self.pairs.push((key, value));
    }
}

impl<K, V> PartialEq for BijectiveMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl<'a, K, V> IntoIterator for &'a BijectiveMap<K, V> {
    type Item = &'a (K, V);
    type IntoIter = slice::Iter<'a, (K, V)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BijectiveMap<&'static str, u32> {
        BijectiveMap::from_pairs([("one", 1), ("two", 2), ("three", 3)]).unwrap()
    }

    #[test]
    fn round_trip() {
        let map = sample();

        for (key, value) in map.iter() {
            assert_eq!(map.get(key), Ok(value));
            assert_eq!(map.get_inverse(value), Ok(key));
        }
    }

    #[test]
    fn lookup_miss() {
        let map = sample();

        assert_eq!(map.get("four"), Err(BimapError::KeyNotFound));
        assert_eq!(map.get_inverse(&4), Err(BimapError::ValueNotFound));
    }

    #[test]
    fn construction_rejects_duplicates() {
        assert_eq!(
            BijectiveMap::from_pairs([("a", 1), ("a", 2)]),
            Err(BimapError::DuplicateKey)
        );
        assert_eq!(
            BijectiveMap::from_pairs([("a", 1), ("b", 1)]),
            Err(BimapError::DuplicateValue)
        );
    }

    #[test]
    fn set_inserts_and_overwrites() {
        let mut map = sample();

        map.set("four", 4).unwrap();
        assert_eq!(map.get("four"), Ok(&4));

        map.set("one", 10).unwrap();
        assert_eq!(map.get("one"), Ok(&10));
        assert_eq!(map.get_inverse(&1), Err(BimapError::ValueNotFound));

        // Overwrite keeps insertion position
        assert_eq!(map.iter().next(), Some(&("one", 10)));
    }

    #[test]
    fn set_rejects_stolen_value() {
        let mut map = sample();

        assert_eq!(map.set("one", 2), Err(BimapError::InvariantViolation));

        // Rejected write leaves the map untouched
        assert_eq!(map.get("one"), Ok(&1));
        assert_eq!(map.get_inverse(&2), Ok(&"two"));
    }

    #[test]
    fn set_same_pair_is_noop() {
        let mut map = sample();

        map.set("one", 1).unwrap();
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn inverse_flips_every_pair() {
        let map = sample();
        let inv = map.inverse();

        assert_eq!(inv.len(), map.len());
        for (key, value) in map.iter() {
            assert_eq!(inv.get(value), Ok(key));
        }
    }

    #[test]
    fn borrowed_lookup() {
        let map =
            BijectiveMap::from_pairs([(String::from("a"), 1)]).unwrap();

        assert_eq!(map.get("a"), Ok(&1));
    }
}
