//! `ExpandingIndex` — a chained hash index with explicit, observable growth.
//!
//! # Layout
//!
//! Entries live in an owned `Vec` of buckets, each bucket a small
//! `Vec<(K, V)>`.  A key's bucket is `hash(key) % bucket_count`.
//!
//! # Growth
//!
//! The index starts with [`INITIAL_BUCKETS`] buckets.  Before a *new* key is
//! inserted, if `(len + 1) / bucket_count` would exceed the maximum load
//! factor, the bucket count doubles (repeatedly, if the factor is tiny) and
//! every entry is rehashed into the new table.  Overwrites never grow.  So
//! the load factor after any operation is always `<= max_load_factor`, and
//! rehashing is the only O(n) operation.
//!
//! The default hasher is `FxBuildHasher`, which is unseeded: bucket
//! placement is identical from run to run.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Bucket count of a fresh (or [`reset`](ExpandingIndex::reset)) index.
pub const INITIAL_BUCKETS: usize = 8;

/// Load factor used by [`ExpandingIndex::new`] and as the fallback for
/// invalid factors.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.5;

/// Smallest accepted load factor.  Lower requests are raised to this, which
/// caps the bucket count at 100 per key.
pub const MIN_MAX_LOAD_FACTOR: f64 = 0.01;

/// Hash index mapping `K` to `V` that doubles its bucket array whenever the
/// load factor would exceed a fixed maximum.
#[derive(Clone)]
pub struct ExpandingIndex<K, V, S = FxBuildHasher> {
    buckets:         Vec<Vec<(K, V)>>,
    len:             usize,
    max_load_factor: f64,
    hasher:          S,
}

impl<K, V> ExpandingIndex<K, V> {
    /// Empty index with 8 buckets and a 0.5 maximum load factor.
    pub fn new() -> Self {
        Self::with_max_load_factor(DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Empty index with a custom maximum load factor.
    ///
    /// A factor that is not a positive finite number falls back to
    /// [`DEFAULT_MAX_LOAD_FACTOR`]; a positive factor below
    /// [`MIN_MAX_LOAD_FACTOR`] is raised to it.
    pub fn with_max_load_factor(max_load_factor: f64) -> Self {
        Self::with_hasher(max_load_factor, FxBuildHasher)
    }
}

impl<K, V> Default for ExpandingIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ExpandingIndex<K, V, S> {
    /// Empty index using `hasher` for bucket placement.  `max_load_factor`
    /// is sanitised as in [`ExpandingIndex::with_max_load_factor`].
    pub fn with_hasher(max_load_factor: f64, hasher: S) -> Self {
        let max_load_factor = if max_load_factor.is_finite() && max_load_factor > 0.0 {
            max_load_factor.max(MIN_MAX_LOAD_FACTOR)
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        Self {
            buckets: empty_buckets(INITIAL_BUCKETS),
            len: 0,
            max_load_factor,
            hasher,
        }
    }

    /// Number of distinct keys.
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.  Always a power-of-two multiple of
    /// [`INITIAL_BUCKETS`].
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Current entries-per-bucket ratio.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Drop every association and shrink back to the initial bucket count.
    pub fn reset(&mut self) {
        self.buckets = empty_buckets(INITIAL_BUCKETS);
        self.len = 0;
    }

    /// Iterate over all `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ExpandingIndex<K, V, S> {
    /// Bind `value` to `key`, replacing any previous value.
    ///
    /// Inserting a new key may double the bucket count first; overwriting
    /// an existing key leaves size and capacity unchanged.
    pub fn associate(&mut self, key: K, value: V) {
        if let Some(slot) = self.find_mut(&key) {
            *slot = value;
            return;
        }
        self.insert_new(key, value);
    }

    /// Value bound to `key`, or `None` if the key is absent.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_of(key);
        self.buckets[idx]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_of(key);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Mutable access to the value bound to `key`, inserting `default()`
    /// first if the key is absent.
    pub fn find_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let idx = self.bucket_of(&key);
        if let Some(pos) = self.buckets[idx].iter().position(|(k, _)| *k == key) {
            return &mut self.buckets[idx][pos].1;
        }
        let (idx, pos) = self.insert_new(key, default());
        &mut self.buckets[idx][pos].1
    }

    /// Insert a key known to be absent.  Returns its `(bucket, position)`.
    fn insert_new(&mut self, key: K, value: V) -> (usize, usize) {
        while (self.len + 1) as f64 > self.max_load_factor * self.buckets.len() as f64 {
            self.rehash(self.buckets.len() * 2);
        }
        let idx = self.bucket_of(&key);
        self.buckets[idx].push((key, value));
        self.len += 1;
        (idx, self.buckets[idx].len() - 1)
    }

    /// Move every entry into a fresh table of `bucket_count` buckets.
    fn rehash(&mut self, bucket_count: usize) {
        let mut fresh = empty_buckets(bucket_count);
        for (k, v) in std::mem::take(&mut self.buckets).into_iter().flatten() {
            let idx = (self.hasher.hash_one(&k) % bucket_count as u64) as usize;
            fresh[idx].push((k, v));
        }
        self.buckets = fresh;
    }

    #[inline]
    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ExpandingIndex<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    (0..count).map(|_| Vec::new()).collect()
}
