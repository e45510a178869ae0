//! Hash table of buckets shared by `Map` and `Set`.
//!
//! A bucket holds the indices (into the backing sequence) of every key that
//! shares a hash. The table is derived data: it is built once from the
//! backing sequence and rebuilt, never patched, when keys are removed.

use crate::dispatch::Dispatcher;
use crate::errors::Error;
use crate::values::Value;
use hashbrown::HashMap;
use smallvec::SmallVec;

type Bucket = SmallVec<[usize; 2]>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketTable {
    buckets: HashMap<u64, Bucket>,
}

impl BucketTable {
    /// Builds the table from the hash of each key, in backing order. The key
    /// at position `i` lands in the bucket of `hashes[i]`.
    pub fn build(hashes: impl IntoIterator<Item = u64>) -> Self {
        let mut buckets: HashMap<u64, Bucket> = HashMap::new();
        for (index, hash) in hashes.into_iter().enumerate() {
            buckets.entry(hash).or_default().push(index);
        }
        Self { buckets }
    }

    /// Indices of the keys sharing `hash`, in backing order.
    pub fn candidates(&self, hash: u64) -> &[usize] {
        self.buckets.get(&hash).map(|b| b.as_slice()).unwrap_or(&[])
    }

    /// A copy of this table with `index` appended to the bucket for `hash`.
    pub fn with_index(&self, hash: u64, index: usize) -> Self {
        let mut buckets = self.buckets.clone();
        buckets.entry(hash).or_default().push(index);
        Self { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of indexed keys across all buckets.
    pub fn indexed_len(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &[usize])> {
        self.buckets.iter().map(|(hash, b)| (*hash, b.as_slice()))
    }
}

/// Scans only the bucket for `hash` and returns the position of the first
/// key equal to `key`.
pub(crate) fn position<'a, E>(
    d: &Dispatcher<'a>,
    table: &BucketTable,
    items: &[E],
    key_of: impl Fn(&E) -> &Value<'a>,
    hash: u64,
    key: &Value<'a>,
) -> Result<Option<usize>, Error> {
    for &index in table.candidates(hash) {
        if matches_key(d, key_of(&items[index]), key)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Positions of every key in the bucket for `hash` that equals `key`, in
/// backing order.
pub(crate) fn positions<'a, E>(
    d: &Dispatcher<'a>,
    table: &BucketTable,
    items: &[E],
    key_of: impl Fn(&E) -> &Value<'a>,
    hash: u64,
    key: &Value<'a>,
) -> Result<SmallVec<[usize; 2]>, Error> {
    let mut found = SmallVec::new();
    for &index in table.candidates(hash) {
        if matches_key(d, key_of(&items[index]), key)? {
            found.push(index);
        }
    }
    Ok(found)
}

/// Key equality as the bucket table sees it. Hashes agree with `equal` only
/// across embeddings, so a candidate whose tag does not unify with the probe
/// losslessly is a collision, whatever the comparison policy.
fn matches_key<'a>(d: &Dispatcher<'a>, candidate: &Value<'a>, key: &Value<'a>) -> Result<bool, Error> {
    match d.unify(candidate.tag, key.tag) {
        Ok(common) if common.is_embedding() => d.equal_embedded(candidate, key),
        _ => Ok(false),
    }
}
