//! Immutable hash map keyed by heterogeneous values.
//!
//! A map is a backing sequence of key/value entries plus a [`BucketTable`]
//! indexing the keys by hash. Key hashing and key equality go through the
//! dispatcher, so any value whose tag models `Hashable` and `Comparable` can
//! be a key. All operations return new maps.

use crate::Vec;
use crate::dispatch::Dispatcher;
use crate::errors::Error;
use crate::values::buckets::{self, BucketTable};
use crate::values::{Optional, Tuple, Value};
use alloc::rc::Rc;
use core::fmt;

type Entry<'a> = (Value<'a>, Value<'a>);

#[derive(Clone)]
pub struct Map<'a> {
    entries: Rc<[Entry<'a>]>,
    table: Rc<BucketTable>,
}

impl<'a> Map<'a> {
    pub fn empty() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
            table: Rc::new(BucketTable::default()),
        }
    }

    /// Builds a map from key/value pairs in the given order.
    ///
    /// Keys are not checked for uniqueness. When a key appears more than once,
    /// lookups return the first occurrence.
    pub fn make(
        d: &Dispatcher<'a>,
        entries: impl IntoIterator<Item = Entry<'a>>,
    ) -> Result<Self, Error> {
        let entries: Rc<[Entry<'a>]> = entries.into_iter().collect();
        let hashes = entries
            .iter()
            .map(|(k, _)| d.hash(k))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            table: Rc::new(BucketTable::build(hashes)),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in backing order.
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn bucket_table(&self) -> &BucketTable {
        &self.table
    }

    pub fn keys(&self) -> Tuple<'a> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Tuple<'a> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    fn locate(&self, d: &Dispatcher<'a>, key: &Value<'a>) -> Result<(u64, Option<usize>), Error> {
        let hash = d.hash(key)?;
        let index = buckets::position(d, &self.table, &self.entries, |(k, _)| k, hash, key)?;
        Ok((hash, index))
    }

    /// Entries reachable through lookup: the first occurrence of each key, in
    /// backing order. Keys that never equal themselves (NaN) are all kept.
    pub fn distinct_entries(&self, d: &Dispatcher<'a>) -> Result<Vec<&Entry<'a>>, Error> {
        let mut distinct = Vec::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            match self.locate(d, &entry.0)?.1 {
                Some(first) if first != index => {}
                _ => distinct.push(entry),
            }
        }
        Ok(distinct)
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, d: &Dispatcher<'a>, key: &Value<'a>) -> Result<Option<&Value<'a>>, Error> {
        let (_, index) = self.locate(d, key)?;
        Ok(index.map(|i| &self.entries[i].1))
    }

    pub fn find(&self, d: &Dispatcher<'a>, key: &Value<'a>) -> Result<Optional<'a>, Error> {
        Ok(self.get(d, key)?.cloned().into())
    }

    pub fn contains(&self, d: &Dispatcher<'a>, key: &Value<'a>) -> Result<bool, Error> {
        Ok(self.locate(d, key)?.1.is_some())
    }

    /// The value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent. Use [`Map::find`] for a checked lookup.
    pub fn at_key(&self, d: &Dispatcher<'a>, key: &Value<'a>) -> Result<&Value<'a>, Error> {
        match self.get(d, key)? {
            Some(value) => Ok(value),
            None => panic!("key {} not present in map", key),
        }
    }

    /// Adds `key -> value` unless the key is already present, in which case
    /// the map is returned unchanged.
    pub fn insert(
        &self,
        d: &Dispatcher<'a>,
        key: Value<'a>,
        value: Value<'a>,
    ) -> Result<Self, Error> {
        let (hash, index) = self.locate(d, &key)?;
        if index.is_some() {
            return Ok(self.clone());
        }
        let position = self.entries.len();
        let entries: Rc<[Entry<'a>]> = self
            .entries
            .iter()
            .cloned()
            .chain(core::iter::once((key, value)))
            .collect();
        Ok(Self {
            entries,
            table: Rc::new(self.table.with_index(hash, position)),
        })
    }

    /// Removes every entry whose key equals `key`, duplicates from `make`
    /// included. The bucket table is rebuilt from the remaining entries.
    pub fn erase_key(&self, d: &Dispatcher<'a>, key: &Value<'a>) -> Result<Self, Error> {
        let hash = d.hash(key)?;
        let erased = buckets::positions(d, &self.table, &self.entries, |(k, _)| k, hash, key)?;
        if erased.is_empty() {
            return Ok(self.clone());
        }
        let remaining = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| !erased.contains(i))
            .map(|(_, entry)| entry.clone());
        Self::make(d, remaining)
    }

    /// Every entry of `self`, plus the entries of `other` whose keys are not
    /// already present. On a shared key the value from `self` wins.
    pub fn union(&self, d: &Dispatcher<'a>, other: &Map<'a>) -> Result<Self, Error> {
        other
            .entries
            .iter()
            .try_fold(self.clone(), |acc, (k, v)| acc.insert(d, k.clone(), v.clone()))
    }

    /// Entries of `self` whose keys are present in `other`.
    pub fn intersection(&self, d: &Dispatcher<'a>, other: &Map<'a>) -> Result<Self, Error> {
        let mut kept = Vec::new();
        for (k, v) in self.entries.iter() {
            if other.contains(d, k)? {
                kept.push((k.clone(), v.clone()));
            }
        }
        Self::make(d, kept)
    }

    /// Entries of `self` whose keys are absent from `other`.
    pub fn difference(&self, d: &Dispatcher<'a>, other: &Map<'a>) -> Result<Self, Error> {
        other
            .entries
            .iter()
            .try_fold(self.clone(), |acc, (k, _)| acc.erase_key(d, k))
    }
}

/// Structural equality over the backing sequence. Order-insensitive map
/// equality is the dispatcher's `equal` operation.
impl PartialEq for Map<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Map<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
