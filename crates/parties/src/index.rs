//! Fixed-size hash index with separate chaining.
//!
//! The bucket count is chosen once and never changes; chains just grow. That
//! is fine for a store's customer list, which is loaded once and bounded, but
//! lookups degrade linearly once the entry count is far beyond the bucket
//! count.

use reelhouse_core::CustomerId;

/// Default number of buckets (prime).
pub const DEFAULT_BUCKETS: usize = 101;

/// Maps a key to a bucket in `0..buckets`.
pub trait BucketHash {
    fn bucket(&self, buckets: usize) -> usize;
}

impl BucketHash for u32 {
    fn bucket(&self, buckets: usize) -> usize {
        *self as usize % buckets
    }
}

impl BucketHash for u64 {
    fn bucket(&self, buckets: usize) -> usize {
        (*self % buckets as u64) as usize
    }
}

impl BucketHash for i32 {
    fn bucket(&self, buckets: usize) -> usize {
        i64::from(*self).rem_euclid(buckets as i64) as usize
    }
}

impl BucketHash for CustomerId {
    fn bucket(&self, buckets: usize) -> usize {
        self.get().bucket(buckets)
    }
}

/// Polynomial rolling hash, multiplier 31, reduced at every step.
impl BucketHash for str {
    fn bucket(&self, buckets: usize) -> usize {
        self.bytes()
            .fold(0usize, |hash, byte| (hash * 31 + byte as usize) % buckets)
    }
}

impl BucketHash for String {
    fn bucket(&self, buckets: usize) -> usize {
        self.as_str().bucket(buckets)
    }
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Associative index: O(1) average lookup, upsert on insert, no resizing.
#[derive(Debug, Clone)]
pub struct HashIndex<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
}

impl<K, V> Default for HashIndex<K, V> {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

impl<K, V> HashIndex<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index with `buckets` chains. Zero is bumped to one.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        Self {
            buckets: (0..buckets).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries in bucket order, chain order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> HashIndex<K, V>
where
    K: BucketHash + Eq,
{
    fn chain(&self, key: &K) -> &[Entry<K, V>] {
        &self.buckets[key.bucket(self.buckets.len())]
    }

    /// Insert or overwrite. Returns the previous value when `key` was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = key.bucket(self.buckets.len());
        let chain = &mut self.buckets[bucket];
        if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
            return Some(core::mem::replace(&mut entry.value, value));
        }
        chain.push(Entry { key, value });
        self.len += 1;
        None
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        self.chain(key)
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    pub fn exists(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}
