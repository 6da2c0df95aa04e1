use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::DefaultHashBuilder;
use crate::hash_table::Entry;
use crate::hash_table::HashTable;

/// A hash set backed by [`HashTable`] with unit values.
///
/// Values are stored as the table's keys, so the set inherits the table's
/// behavior wholesale: golden-ratio multiplicative indexing, chained
/// buckets, and clustering-driven growth.
///
/// # Examples
///
/// ```rust
/// use clump_hash::HashSet;
///
/// let mut set: HashSet<i32> = HashSet::new();
/// assert!(set.insert(37));
/// assert!(!set.insert(37));
/// assert!(set.contains(&37));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T, (), S>,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S>
where
    S: Default,
{
    /// Creates an empty set with the default 32 buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty set with at least `buckets` bucket slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn with_capacity(buckets: usize) -> Self {
        Self::with_capacity_and_hasher(buckets, S::default())
    }
}

impl<T, S> HashSet<T, S> {
    /// Creates an empty set with the default 32 buckets and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    /// Creates an empty set with at least `buckets` bucket slots and the
    /// given hasher builder.
    pub fn with_capacity_and_hasher(buckets: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity_and_hasher(buckets, hash_builder),
        }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of bucket slots.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Computes the underlying table's clustering score.
    pub fn clustering(&self) -> f64 {
        self.table.clustering()
    }

    /// Removes every value and restores the default 32-bucket geometry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the values of the set, in the table's
    /// bucket order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.keys(),
        }
    }

    /// Removes every value, yielding them in the table's bucket order. The
    /// bucket count is kept.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Keeps only the values for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = (0..8).collect();
    /// set.retain(|v| v % 2 == 0);
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.table.retain(|value, _| f(value));
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was not already present. Adding an
    /// already-present value leaves the set untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        match self.table.entry(value) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(());
                true
            }
        }
    }

    /// Adds a value, returning the previously stored equal value if there
    /// was one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.replace(1), Some(1));
    /// assert_eq!(set.replace(2), None);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        let old = self.table.remove_entry(&value).map(|(stored, ())| stored);
        self.table.insert(value, ());
        old
    }

    /// Returns `true` if the set contains a value equal to the given one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.table.contains_key(value)
    }

    /// Returns a reference to the stored value equal to the given one.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.table.get_key_value(value).map(|(stored, _)| stored)
    }

    /// Removes a value from the set, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.table.remove(value).is_some()
    }

    /// Removes and returns the stored value equal to the given one.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.table.remove_entry(value).map(|(stored, ())| stored)
    }

    /// Returns `true` if the two sets share no values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let a: HashSet<i32> = (0..3).collect();
    /// let b: HashSet<i32> = (3..6).collect();
    /// assert!(a.is_disjoint(&b));
    /// ```
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if `other` contains every value of `self`.
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if `self` contains every value of `other`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the values in either set, without
    /// duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let a: HashSet<i32> = (0..3).collect();
    /// let b: HashSet<i32> = (2..5).collect();
    /// assert_eq!(a.union(&b).count(), 5);
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            rest: other.iter(),
            first: self,
        }
    }

    /// Returns an iterator over the values present in both sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let a: HashSet<i32> = (0..3).collect();
    /// let b: HashSet<i32> = (2..5).collect();
    /// assert_eq!(a.intersection(&b).count(), 1);
    /// ```
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        if self.len() <= other.len() {
            Intersection {
                iter: self.iter(),
                other,
            }
        } else {
            Intersection {
                iter: other.iter(),
                other: self,
            }
        }
    }

    /// Returns an iterator over the values in `self` but not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let a: HashSet<i32> = (0..3).collect();
    /// let b: HashSet<i32> = (2..5).collect();
    /// assert_eq!(a.difference(&b).count(), 2);
    /// ```
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in exactly one of the sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashSet;
    ///
    /// let a: HashSet<i32> = (0..3).collect();
    /// let b: HashSet<i32> = (2..5).collect();
    /// assert_eq!(a.symmetric_difference(&b).count(), 4);
    /// ```
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<T, S> Default for HashSet<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the values of a [`HashSet`].
pub struct Iter<'a, T> {
    inner: crate::hash_table::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A draining iterator over the values of a [`HashSet`].
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T, ()>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }
}

/// A consuming iterator over the values of a [`HashSet`].
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, ())| value)
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    rest: Iter<'a, T>,
    first: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.rest.next()?;
            if !self.first.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            Self {
                k1: OsRng.try_next_u64().unwrap_or(0),
                k2: OsRng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let set: HashSet<i32, SipHashBuilder> = HashSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.capacity(), 32);

        let set2 = HashSet::<i32, _>::with_hasher(SipHashBuilder::default());
        assert!(set2.is_empty());
        assert_eq!(set2.capacity(), 32);
    }

    #[test]
    fn test_with_capacity() {
        let set: HashSet<i32, SipHashBuilder> = HashSet::with_capacity(100);
        assert_eq!(set.capacity(), 128);
        assert!(set.is_empty());

        let set2 = HashSet::<i32, _>::with_capacity_and_hasher(200, SipHashBuilder::default());
        assert_eq!(set2.capacity(), 256);
        assert!(set2.is_empty());
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());

        assert!(set.insert(1));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&1));

        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);

        assert!(set.insert(2));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&2));
        assert!(!set.contains(&3));
    }

    #[test]
    fn test_remove() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);
        set.insert(3);

        assert!(set.remove(&2));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&2));

        assert!(!set.remove(&2));
        assert!(!set.remove(&4));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_take_and_get() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.insert(42);

        assert_eq!(set.get(&42), Some(&42));
        assert_eq!(set.get(&1), None);

        assert_eq!(set.take(&42), Some(42));
        assert_eq!(set.take(&42), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_replace() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.insert("one".to_string());

        assert_eq!(set.replace("one".to_string()), Some("one".to_string()));
        assert_eq!(set.replace("two".to_string()), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut set: HashSet<i32, SipHashBuilder> = (0..350).collect();
        assert!(set.capacity() > 32);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 32);
        assert!(!set.contains(&1));
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_growth_tracks_clustering() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        for i in 0..1000 {
            assert!(set.insert(i));
        }
        assert_eq!(set.len(), 1000);
        assert!(set.capacity() > 32);
        assert!(set.clustering() <= 2.0);

        for i in (0..1000).step_by(2) {
            assert!(set.remove(&i));
        }
        assert_eq!(set.len(), 500);
        for i in (1..1000).step_by(2) {
            assert!(set.contains(&i));
        }
        for i in (0..1000).step_by(2) {
            assert!(!set.contains(&i));
        }
    }

    #[test]
    fn test_iter() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);
        set.insert(3);

        let values: Vec<i32> = set.iter().copied().collect();
        assert_eq!(values.len(), 3);
        assert!(values.contains(&1));
        assert!(values.contains(&2));
        assert!(values.contains(&3));

        let borrowed: Vec<i32> = (&set).into_iter().copied().collect();
        assert_eq!(borrowed.len(), 3);

        let owned: Vec<i32> = set.into_iter().collect();
        assert_eq!(owned.len(), 3);
    }

    #[test]
    fn test_drain() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);
        set.insert(3);

        let drained: Vec<i32> = set.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(set.is_empty());
        assert!(drained.contains(&1));
        assert!(drained.contains(&2));
        assert!(drained.contains(&3));
    }

    #[test]
    fn test_retain() {
        let mut set: HashSet<i32, SipHashBuilder> = (0..100).collect();
        set.retain(|v| v % 2 == 0);
        assert_eq!(set.len(), 50);
        assert!(set.contains(&0));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_string_values() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());

        assert!(set.insert("hello".to_string()));
        assert!(set.insert("world".to_string()));
        assert!(!set.insert("hello".to_string()));

        assert!(set.contains(&"hello".to_string()));
        assert!(!set.contains(&"missing".to_string()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_complex_values() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());

        let vec1 = vec![1, 2, 3];
        let vec2 = vec![4, 5, 6];
        let vec3 = vec![1, 2, 3];

        assert!(set.insert(vec1.clone()));
        assert!(set.insert(vec2.clone()));
        assert!(!set.insert(vec3));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&vec1));
        assert!(set.contains(&vec2));
    }

    #[test]
    fn test_default_trait() {
        let set: HashSet<i32, SipHashBuilder> = HashSet::default();
        assert!(set.is_empty());
    }

    #[test]
    fn test_equality() {
        let a: HashSet<i32, SipHashBuilder> = (0..10).collect();
        let b: HashSet<i32, SipHashBuilder> = (0..10).rev().collect();
        assert_eq!(a, b);

        let c: HashSet<i32, SipHashBuilder> = (0..11).collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_is_disjoint() {
        let a: HashSet<i32, SipHashBuilder> = (1..=3).collect();
        let mut b: HashSet<i32, SipHashBuilder> = (4..=6).collect();

        assert!(a.is_disjoint(&b));
        assert!(b.is_disjoint(&a));

        b.insert(2);
        assert!(!a.is_disjoint(&b));
        assert!(!b.is_disjoint(&a));
    }

    #[test]
    fn test_is_subset_and_superset() {
        let a: HashSet<i32, SipHashBuilder> = (1..=2).collect();
        let b: HashSet<i32, SipHashBuilder> = (1..=3).collect();

        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(a.is_subset(&a));

        assert!(b.is_superset(&a));
        assert!(!a.is_superset(&b));
        assert!(a.is_superset(&a));
    }

    #[test]
    fn test_union() {
        let a: HashSet<i32, SipHashBuilder> = (1..=3).collect();
        let b: HashSet<i32, SipHashBuilder> = (3..=5).collect();

        let union: Vec<_> = a.union(&b).copied().collect();
        assert_eq!(union.len(), 5);
        for v in 1..=5 {
            assert!(union.contains(&v));
        }
    }

    #[test]
    fn test_intersection() {
        let a: HashSet<i32, SipHashBuilder> = (1..=3).collect();
        let b: HashSet<i32, SipHashBuilder> = (2..=4).collect();

        let intersection: Vec<_> = a.intersection(&b).copied().collect();
        assert_eq!(intersection.len(), 2);
        assert!(intersection.contains(&2));
        assert!(intersection.contains(&3));
    }

    #[test]
    fn test_difference() {
        let a: HashSet<i32, SipHashBuilder> = (1..=3).collect();
        let b: HashSet<i32, SipHashBuilder> = (2..=4).collect();

        let difference: Vec<_> = a.difference(&b).copied().collect();
        assert_eq!(difference, vec![1]);
    }

    #[test]
    fn test_symmetric_difference() {
        let a: HashSet<i32, SipHashBuilder> = (1..=3).collect();
        let b: HashSet<i32, SipHashBuilder> = (2..=4).collect();

        let sym_diff: Vec<_> = a.symmetric_difference(&b).copied().collect();
        assert_eq!(sym_diff.len(), 2);
        assert!(sym_diff.contains(&1));
        assert!(sym_diff.contains(&4));
    }
}
