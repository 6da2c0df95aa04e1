use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;
use core::mem;
use core::ops::Index;

use crate::error::Error;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Default hasher builder for [`HashTable`] and
        /// [`HashSet`](crate::hash_set::HashSet).
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Default hasher builder for [`HashTable`] and
        /// [`HashSet`](crate::hash_set::HashSet).
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder hasher builder used when neither the `std` nor the
        /// `foldhash` feature is enabled.
        ///
        /// This type is uninhabited; construct tables through
        /// [`HashTable::with_hasher`] or
        /// [`HashTable::with_capacity_and_hasher`] instead.
        pub enum DefaultHashBuilder {}
    }
}

/// Default bucket-count exponent; a fresh table has `2^5 == 32` buckets.
pub const DEFAULT_SIZE_EXPONENT: u32 = 5;

/// Smallest bucket-count exponent a table will use (4 buckets).
pub const MIN_SIZE_EXPONENT: u32 = 2;

/// Largest bucket-count exponent a table will use (2^31 buckets).
///
/// The index derivation keeps the top `size_exponent` bits of a 32-bit
/// product, so the exponent can never reach 32.
pub const MAX_SIZE_EXPONENT: u32 = 31;

/// Knuth's multiplicative hashing constant, `2^32` times the golden ratio.
const HASH_MULTIPLIER: u32 = 0x9E37_79B1;

/// Derives a bucket index from a 32-bit hash: multiply by the golden-ratio
/// constant (wrapping) and keep the top `size_exponent` bits.
#[inline(always)]
fn index_for(hash: u32, size_exponent: u32) -> usize {
    (hash.wrapping_mul(HASH_MULTIPLIER) >> (32 - size_exponent)) as usize
}

/// The published clustering formula. Both factors compare against 1: a score
/// of 0 means perfectly even chains, negative means better than even, and
/// anything large and positive means the keys are clumping.
#[inline(always)]
fn clustering_score(len: usize, chain_moment: f64, capacity: usize) -> f64 {
    (len as f64 / capacity as f64 - 1.0) * (chain_moment / capacity as f64 - 1.0)
}

/// Bucket-count exponent for a requested bucket count, rounded up to the
/// next power of two and clamped to the supported range.
fn exponent_for(buckets: usize) -> u32 {
    let buckets = buckets.clamp(1, 1 << MAX_SIZE_EXPONENT);
    buckets
        .next_power_of_two()
        .trailing_zeros()
        .clamp(MIN_SIZE_EXPONENT, MAX_SIZE_EXPONENT)
}

fn empty_buckets<K, V>(capacity: usize) -> Box<[Option<Vec<(K, V)>>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

/// A separately-chained hash table that grows when its keys measurably clump
/// together, rather than when a load factor is crossed.
///
/// Storage is `2^size_exponent` bucket slots, each either absent or holding
/// a growable chain of `(K, V)` pairs. Bucket indexes come from golden-ratio
/// multiplicative hashing: the key's 64-bit hash is truncated to 32 bits,
/// multiplied (wrapping) by `0x9E3779B1`, and the top `size_exponent` bits
/// of the product select the bucket.
///
/// Every insertion that lands in an occupied bucket counts one collision.
/// Once more than [`max_allowed_collisions`](Self::max_allowed_collisions)
/// collisions accumulate, the table evaluates
///
/// ```text
/// ((len / capacity) - 1) * ((sum of squared chain lengths / capacity) - 1)
/// ```
///
/// and, while the score exceeds
/// [`max_allowed_clustering`](Self::max_allowed_clustering), doubles the
/// bucket count before rehashing, possibly several times within a single
/// insertion. Evenly spread keys can push the table far past 100% load
/// without a resize; badly clumped keys grow it early.
///
/// Iteration yields entries bucket by bucket in index order, and within a
/// bucket in insertion order. The borrow checker rules out mutating the
/// table while any lazy iterator over it is alive.
///
/// # Examples
///
/// ```rust
/// use clump_hash::HashTable;
///
/// let mut table: HashTable<&str, u32> = HashTable::new();
/// table.insert("a", 1u32);
/// table.insert("b", 2);
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.capacity(), 32);
/// assert_eq!(table.try_get(&"a"), Some(&1));
/// assert_eq!(table.insert("a", 10), Some(1));
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    buckets: Box<[Option<Vec<(K, V)>>]>,
    len: usize,
    size_exponent: u32,
    collisions: u32,
    /// Collisions tolerated before the next resize check runs. Defaults to
    /// `10`.
    pub max_allowed_collisions: u32,
    /// Clustering score a resize check must see before it actually grows
    /// the table. Defaults to `2.0`.
    pub max_allowed_clustering: f64,
    hash_builder: S,
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    S: Default,
{
    /// Creates an empty table with the default 32 buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let table: HashTable<u64, u64> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 32);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty table with at least `buckets` bucket slots.
    ///
    /// The hint counts buckets, not elements: it is rounded up to the next
    /// power of two and clamped to `[4, 2^31]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(500);
    /// assert_eq!(table.capacity(), 512);
    /// ```
    pub fn with_capacity(buckets: usize) -> Self {
        Self::with_capacity_and_hasher(buckets, S::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table with the default 32 buckets and the given
    /// hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use core::hash::BuildHasher;
    ///
    /// use clump_hash::HashTable;
    /// use siphasher::sip::SipHasher;
    ///
    /// struct FixedSip;
    /// impl BuildHasher for FixedSip {
    ///     type Hasher = SipHasher;
    ///
    ///     fn build_hasher(&self) -> Self::Hasher {
    ///         SipHasher::new_with_keys(1, 2)
    ///     }
    /// }
    ///
    /// let table: HashTable<u64, u64, _> = HashTable::with_hasher(FixedSip);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(1 << DEFAULT_SIZE_EXPONENT, hash_builder)
    }

    /// Creates an empty table with at least `buckets` bucket slots and the
    /// given hasher builder.
    ///
    /// The hint counts buckets, not elements; see
    /// [`with_capacity`](Self::with_capacity).
    pub fn with_capacity_and_hasher(buckets: usize, hash_builder: S) -> Self {
        let size_exponent = exponent_for(buckets);
        Self {
            buckets: empty_buckets(1 << size_exponent),
            len: 0,
            size_exponent,
            collisions: 0,
            max_allowed_collisions: 10,
            max_allowed_clustering: 2.0,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, &str> = HashTable::new();
    /// table.insert(1u32, "one");
    /// assert_eq!(table.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of bucket slots.
    ///
    /// This counts buckets, not elements: chains let the table hold more
    /// entries than it has buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        1 << self.size_exponent
    }

    /// Always `false`; the table never refuses mutation. Kept for parity
    /// with collection interfaces that carry a read-only flag.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Computes the table's clustering score.
    ///
    /// `0.0` for an empty table; otherwise
    /// `((len / capacity) - 1) * ((sum of squared chain lengths / capacity) - 1)`.
    /// Zero indicates perfectly even chains, negative better than even, and
    /// large positive values heavy clumping. This is the score resize
    /// checks compare against
    /// [`max_allowed_clustering`](Self::max_allowed_clustering).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, ()> = HashTable::new();
    /// assert_eq!(table.clustering(), 0.0);
    ///
    /// for key in 0u32..350 {
    ///     table.insert(key, ());
    /// }
    /// assert!(table.clustering() <= 2.0);
    /// ```
    pub fn clustering(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        clustering_score(self.len, self.squared_chain_sum(), self.capacity())
    }

    /// Sum over all buckets of the squared chain length.
    fn squared_chain_sum(&self) -> f64 {
        self.buckets
            .iter()
            .map(|slot| match slot {
                Some(chain) => (chain.len() * chain.len()) as f64,
                None => 0.0,
            })
            .sum()
    }

    /// Removes every entry and restores the default geometry: 32 buckets,
    /// zero length, zero pending collisions. The tuning knobs keep their
    /// values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u64, u64> = HashTable::with_capacity(500);
    /// assert_eq!(table.capacity(), 512);
    ///
    /// table.clear();
    /// assert_eq!(table.capacity(), 32);
    /// assert!(table.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.size_exponent = DEFAULT_SIZE_EXPONENT;
        self.buckets = empty_buckets(1 << DEFAULT_SIZE_EXPONENT);
        self.len = 0;
        self.collisions = 0;
    }

    /// Returns an iterator over `(&K, &V)` pairs, bucket by bucket in index
    /// order and within a bucket in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
        }
    }

    /// Returns an iterator over `(&K, &mut V)` pairs in the same order as
    /// [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: Default::default(),
        }
    }

    /// Returns an iterator over the keys in iteration order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in iteration order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, yielding them in iteration order. Unlike
    /// [`clear`](Self::clear), the bucket count is kept.
    ///
    /// Dropping the iterator drops whatever it has not yielded yet.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.len = 0;
        self.collisions = 0;
        let capacity = self.buckets.len();
        let old = mem::replace(&mut self.buckets, empty_buckets(capacity));
        Drain {
            buckets: old.into_vec().into_iter(),
            chain: Vec::new().into_iter(),
            _table: PhantomData,
        }
    }

    /// Keeps only the entries for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, u32> = (0..8).map(|k| (k, k)).collect();
    /// table.retain(|key, _| key % 2 == 0);
    /// assert_eq!(table.len(), 4);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut removed = 0;
        for slot in &mut self.buckets {
            let Some(chain) = slot else { continue };
            chain.retain_mut(|(key, value)| {
                let keep = f(key, value);
                if !keep {
                    removed += 1;
                }
                keep
            });
            if chain.is_empty() {
                *slot = None;
            }
        }
        self.len -= removed;
    }

    /// Clones every entry into `dst` starting at `start`, in iteration
    /// order.
    ///
    /// # Errors
    ///
    /// [`Error::StartIndexOutOfRange`] if `start > dst.len()`, and
    /// [`Error::CapacityExceeded`] if fewer than [`len`](Self::len) slots
    /// remain from `start` to the end of `dst`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let table: HashTable<u32, u32> = (0..4).map(|k| (k, k * 10)).collect();
    ///
    /// let mut dst = [(0, 0); 6];
    /// table.copy_to(&mut dst, 2).unwrap();
    /// assert!(table.copy_to(&mut dst, 3).is_err());
    /// ```
    pub fn copy_to(&self, dst: &mut [(K, V)], start: usize) -> Result<(), Error>
    where
        K: Clone,
        V: Clone,
    {
        if start > dst.len() {
            return Err(Error::StartIndexOutOfRange {
                start,
                len: dst.len(),
            });
        }
        let available = dst.len() - start;
        if available < self.len {
            return Err(Error::CapacityExceeded {
                required: self.len,
                available,
            });
        }
        for (slot, (key, value)) in dst[start..].iter_mut().zip(self.iter()) {
            *slot = (key.clone(), value.clone());
        }
        Ok(())
    }

    /// Shared access to an entry whose coordinates the caller has proven
    /// occupied.
    fn occupied(&self, bucket: usize, pos: usize) -> &(K, V) {
        match &self.buckets[bucket] {
            Some(chain) => &chain[pos],
            None => unreachable!("stale bucket coordinates"),
        }
    }

    /// Mutable access to an entry whose coordinates the caller has proven
    /// occupied.
    fn occupied_mut(&mut self, bucket: usize, pos: usize) -> &mut (K, V) {
        match &mut self.buckets[bucket] {
            Some(chain) => &mut chain[pos],
            None => unreachable!("stale bucket coordinates"),
        }
    }

    /// Removes the entry at proven coordinates, storing the slot back to
    /// absent when its chain empties.
    fn remove_at(&mut self, bucket: usize, pos: usize) -> (K, V) {
        let chain = match &mut self.buckets[bucket] {
            Some(chain) => chain,
            None => unreachable!("stale bucket coordinates"),
        };
        let entry = chain.remove(pos);
        if chain.is_empty() {
            self.buckets[bucket] = None;
        }
        self.len -= 1;
        entry
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline(always)]
    fn bucket_index(&self, key: &K) -> usize {
        index_for(self.hash_builder.hash_one(key) as u32, self.size_exponent)
    }

    /// Coordinates of the entry with this key, if present.
    fn find(&self, key: &K) -> Option<(usize, usize)> {
        let bucket = self.bucket_index(key);
        let chain = self.buckets[bucket].as_ref()?;
        let pos = chain.iter().position(|(k, _)| k == key)?;
        Some((bucket, pos))
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// A replacement swaps the value in place: it does not move the entry,
    /// count a collision, or ever trigger a resize. A genuinely new entry
    /// landing in an occupied bucket counts one collision and may grow the
    /// table before this call returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, &str> = HashTable::new();
    /// assert_eq!(table.insert(7u32, "old"), None);
    /// assert_eq!(table.insert(7, "new"), Some("old"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_index(&key);
        let pos = match &mut self.buckets[bucket] {
            slot @ None => {
                *slot = Some(vec![(key, value)]);
                self.len += 1;
                return None;
            }
            Some(chain) => {
                if let Some(entry) = chain.iter_mut().find(|e| e.0 == key) {
                    return Some(mem::replace(&mut entry.1, value));
                }
                chain.push((key, value));
                chain.len() - 1
            }
        };
        self.len += 1;
        self.collisions += 1;
        if self.collisions > self.max_allowed_collisions {
            self.try_resize((bucket, pos));
        }
        None
    }

    /// The append path for a key the caller has proven absent. Returns the
    /// entry's coordinates, accounting for any resize this insertion
    /// triggered.
    fn insert_vacant(&mut self, key: K, value: V) -> (usize, usize) {
        let bucket = self.bucket_index(&key);
        let pos = match &mut self.buckets[bucket] {
            slot @ None => {
                *slot = Some(vec![(key, value)]);
                self.len += 1;
                return (bucket, 0);
            }
            Some(chain) => {
                chain.push((key, value));
                chain.len() - 1
            }
        };
        self.len += 1;
        self.collisions += 1;
        if self.collisions > self.max_allowed_collisions {
            self.try_resize((bucket, pos))
        } else {
            (bucket, pos)
        }
    }

    /// Grows the table while the clustering score is above the allowed
    /// threshold, then rehashes.
    ///
    /// The exponent may step several times within one call: each trial pass
    /// walks the still-installed buckets and counts the collisions the new
    /// geometry would produce; when the count overruns mid-pass and the
    /// clustering score projected onto the trial capacity is still too
    /// high, the pass is abandoned and the table doubles again. Only the
    /// final pass moves entries. Returns `inserted` mapped to wherever the
    /// commit relocated it.
    fn try_resize(&mut self, inserted: (usize, usize)) -> (usize, usize) {
        self.collisions = 0;
        if self.size_exponent >= MAX_SIZE_EXPONENT
            || self.clustering() <= self.max_allowed_clustering
        {
            return inserted;
        }

        // Second moment of the pre-resize chains. Trial passes never touch
        // the installed buckets, so this holds for every retry.
        let old_moment = self.squared_chain_sum();

        loop {
            self.size_exponent += 1;
            if self.trial_pass(old_moment) {
                break;
            }
        }

        self.commit(inserted)
    }

    /// One trial of the rehash at the current exponent. Tallies destination
    /// chain lengths without moving entries, counting collisions exactly as
    /// the rehash will. Returns `false` if the pass was abandoned because
    /// the table must double again first.
    fn trial_pass(&mut self, old_moment: f64) -> bool {
        let capacity = 1usize << self.size_exponent;
        let mut lens = vec![0u32; capacity];
        for slot in self.buckets.iter() {
            let Some(chain) = slot else { continue };
            for (key, _) in chain.iter() {
                let index = index_for(self.hash_builder.hash_one(key) as u32, self.size_exponent);
                if lens[index] > 0 {
                    self.collisions += 1;
                    if self.collisions > self.max_allowed_collisions {
                        self.collisions = 0;
                        if self.size_exponent < MAX_SIZE_EXPONENT
                            && clustering_score(self.len, old_moment, capacity)
                                > self.max_allowed_clustering
                        {
                            return false;
                        }
                    }
                }
                lens[index] += 1;
            }
        }
        true
    }

    /// Moves every entry into a fresh bucket array sized for the current
    /// exponent, in the same walk order the trial used. Watches `tracked`
    /// and returns where that entry landed.
    fn commit(&mut self, tracked: (usize, usize)) -> (usize, usize) {
        let capacity = 1usize << self.size_exponent;
        let old = mem::replace(&mut self.buckets, empty_buckets(capacity));
        let mut moved = tracked;
        for (source_bucket, slot) in old.into_vec().into_iter().enumerate() {
            let Some(chain) = slot else { continue };
            for (source_pos, (key, value)) in chain.into_iter().enumerate() {
                let index = self.bucket_index(&key);
                let pos = match &mut self.buckets[index] {
                    slot @ None => {
                        *slot = Some(vec![(key, value)]);
                        0
                    }
                    Some(new_chain) => {
                        new_chain.push((key, value));
                        new_chain.len() - 1
                    }
                };
                if (source_bucket, source_pos) == tracked {
                    moved = (index, pos);
                }
            }
        }
        moved
    }

    /// Returns a reference to the value for this key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent. Use
    /// [`try_get`](Self::try_get) or [`contains_key`](Self::contains_key)
    /// when absence is expected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::{Error, HashTable};
    ///
    /// let mut table: HashTable<u32, &str> = HashTable::new();
    /// table.insert(1u32, "one");
    /// assert_eq!(table.get(&1), Ok(&"one"));
    /// assert_eq!(table.get(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn get(&self, key: &K) -> Result<&V, Error> {
        self.try_get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for this key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        self.try_get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a reference to the value for this key, or `None` if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, &str> = HashTable::new();
    /// table.insert(1u32, "one");
    /// assert_eq!(table.try_get(&1), Some(&"one"));
    /// assert_eq!(table.try_get(&2), None);
    /// ```
    pub fn try_get(&self, key: &K) -> Option<&V> {
        let chain = self.buckets[self.bucket_index(key)].as_ref()?;
        chain.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for this key, or `None` if
    /// absent.
    pub fn try_get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        let chain = self.buckets[bucket].as_mut()?;
        chain.iter_mut().find(|e| e.0 == *key).map(|e| &mut e.1)
    }

    /// Returns the stored key and value for this key, or `None` if absent.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let chain = self.buckets[self.bucket_index(key)].as_ref()?;
        chain.iter().find(|(k, _)| k == key).map(|(k, v)| (k, v))
    }

    /// Returns `true` if the table holds an entry for this key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.try_get(key).is_some()
    }

    /// Removes the entry for this key, returning its value.
    ///
    /// Removing a key that is not present is a no-op returning `None`. The
    /// table never shrinks on removal, and pending collision counts are
    /// left alone.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, &str> = HashTable::new();
    /// table.insert(1u32, "one");
    /// assert_eq!(table.remove(&1), Some("one"));
    /// assert_eq!(table.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry for this key, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let (bucket, pos) = self.find(key)?;
        Some(self.remove_at(bucket, pos))
    }

    /// Returns the entry for this key for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clump_hash::HashTable;
    ///
    /// let mut counts: HashTable<char, u32> = HashTable::new();
    /// for c in "banana".chars() {
    ///     *counts.entry(c).or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.try_get(&'a'), Some(&3));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        match self.find(&key) {
            Some((bucket, pos)) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                pos,
            }),
            None => Entry::Vacant(VacantEntry { table: self, key }),
        }
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.try_get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Index<&K> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Indexed access; the panicking twin of [`HashTable::try_get`].
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &K) -> &V {
        match self.try_get(key) {
            Some(value) => value,
            None => panic!("key not found"),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// A view into a single table slot, either vacant or occupied.
///
/// Constructed by [`HashTable::entry`].
pub enum Entry<'a, K, V, S = DefaultHashBuilder> {
    /// No entry for the key.
    Vacant(VacantEntry<'a, K, V, S>),
    /// An existing entry for the key.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts `default` if the entry is vacant; returns a mutable
    /// reference to the value either way.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the closure's value if the entry is vacant; returns a
    /// mutable reference to the value either way.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Mutates the value in place if the entry is occupied.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Hash + Eq,
    V: Default,
    S: BuildHasher,
{
    /// Inserts `V::default()` if the entry is vacant; returns a mutable
    /// reference to the value either way.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant table slot.
pub struct VacantEntry<'a, K, V, S = DefaultHashBuilder> {
    table: &'a mut HashTable<K, V, S>,
    key: K,
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S> {
    /// Returns a reference to the key that would be inserted.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a value for the key, returning a mutable reference to it.
    ///
    /// This runs the full insertion path: the new entry may count a
    /// collision and grow the table, and the returned reference points at
    /// the entry wherever the rehash placed it.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let (bucket, pos) = table.insert_vacant(self.key, value);
        &mut table.occupied_mut(bucket, pos).1
    }
}

/// A view into an occupied table slot.
pub struct OccupiedEntry<'a, K, V, S = DefaultHashBuilder> {
    table: &'a mut HashTable<K, V, S>,
    bucket: usize,
    pos: usize,
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S> {
    /// Returns a reference to the stored key.
    pub fn key(&self) -> &K {
        &self.table.occupied(self.bucket, self.pos).0
    }

    /// Returns a reference to the value.
    pub fn get(&self) -> &V {
        &self.table.occupied(self.bucket, self.pos).1
    }

    /// Returns a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.occupied_mut(self.bucket, self.pos).1
    }

    /// Converts the view into a mutable reference tied to the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.occupied_mut(self.bucket, self.pos).1
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry, returning the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.table.remove_at(self.bucket, self.pos)
    }
}

/// An iterator over `(&K, &V)` pairs of a [`HashTable`].
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Option<Vec<(K, V)>>>,
    chain: core::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.chain.next() {
                return Some((k, v));
            }
            if let Some(chain) = self.buckets.next()? {
                self.chain = chain.iter();
            }
        }
    }
}

/// An iterator over `(&K, &mut V)` pairs of a [`HashTable`].
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Option<Vec<(K, V)>>>,
    chain: core::slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.chain.next() {
                return Some((&*k, v));
            }
            if let Some(chain) = self.buckets.next()? {
                self.chain = chain.iter_mut();
            }
        }
    }
}

/// An iterator over the keys of a [`HashTable`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashTable`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An iterator over mutable references to the values of a [`HashTable`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    buckets: alloc::vec::IntoIter<Option<Vec<(K, V)>>>,
    chain: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some(entry);
            }
            if let Some(chain) = self.buckets.next()? {
                self.chain = chain.into_iter();
            }
        }
    }
}

/// A draining iterator over the entries of a [`HashTable`].
///
/// Produced by [`HashTable::drain`]; the table is already empty by the time
/// this exists, and unyielded entries are dropped with it.
pub struct Drain<'a, K, V> {
    buckets: alloc::vec::IntoIter<Option<Vec<(K, V)>>>,
    chain: alloc::vec::IntoIter<(K, V)>,
    _table: PhantomData<&'a mut ()>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some(entry);
            }
            if let Some(chain) = self.buckets.next()? {
                self.chain = chain.into_iter();
            }
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashTable<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_vec().into_iter(),
            chain: Vec::new().into_iter(),
        }
    }
}

/// Chain-level statistics for table analysis.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct ChainStats {
    /// Number of entries currently in the table.
    pub populated: usize,
    /// Number of bucket slots.
    pub capacity: usize,
    /// Number of bucket slots holding at least one entry.
    pub occupied_buckets: usize,
    /// Length of the longest chain.
    pub longest_chain: usize,
    /// `histogram[n]` counts the buckets whose chain holds `n` entries.
    pub histogram: Vec<usize>,
    /// The table's clustering score.
    pub clustering: f64,
    /// Collisions observed since the last resize check.
    pub collisions: u32,
}

#[cfg(feature = "stats")]
impl ChainStats {
    /// Pretty-prints the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chain Statistics ===");
        println!(
            "Population: {}/{} buckets occupied, {} entries",
            self.occupied_buckets, self.capacity, self.populated
        );
        println!(
            "Clustering: {:.4} ({} pending collisions)",
            self.clustering, self.collisions
        );
        println!("Longest chain: {}", self.longest_chain);
        for (len, count) in self.histogram.iter().enumerate() {
            if *count > 0 {
                println!("  chains of length {len:>3}: {count}");
            }
        }
    }
}

#[cfg(feature = "stats")]
impl<K, V, S> HashTable<K, V, S> {
    /// Takes a snapshot of the chain geometry.
    pub fn chain_stats(&self) -> ChainStats {
        let mut histogram = vec![0usize; 1];
        let mut occupied_buckets = 0;
        let mut longest_chain = 0;
        for slot in self.buckets.iter() {
            let len = slot.as_ref().map_or(0, Vec::len);
            if len > 0 {
                occupied_buckets += 1;
                longest_chain = longest_chain.max(len);
            }
            if len >= histogram.len() {
                histogram.resize(len + 1, 0);
            }
            histogram[len] += 1;
        }
        ChainStats {
            populated: self.len,
            capacity: self.capacity(),
            occupied_buckets,
            longest_chain,
            histogram,
            clustering: self.clustering(),
            collisions: self.collisions,
        }
    }
}
