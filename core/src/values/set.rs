//! Immutable hash set of heterogeneous values.
//!
//! Same layout as [`Map`](crate::values::Map): a backing sequence of elements
//! plus a bucket table keyed by each element's hash.

use crate::Vec;
use crate::dispatch::Dispatcher;
use crate::errors::Error;
use crate::values::buckets::{self, BucketTable};
use crate::values::{Optional, Tuple, Value};
use alloc::rc::Rc;
use core::fmt;

#[derive(Clone)]
pub struct Set<'a> {
    elements: Rc<[Value<'a>]>,
    table: Rc<BucketTable>,
}

impl<'a> Set<'a> {
    pub fn empty() -> Self {
        Self {
            elements: Rc::from(Vec::new()),
            table: Rc::new(BucketTable::default()),
        }
    }

    /// Builds a set from elements in the given order, without a uniqueness
    /// check. Lookups of a repeated element find its first occurrence.
    pub fn make(
        d: &Dispatcher<'a>,
        elements: impl IntoIterator<Item = Value<'a>>,
    ) -> Result<Self, Error> {
        let elements: Rc<[Value<'a>]> = elements.into_iter().collect();
        let hashes = elements
            .iter()
            .map(|e| d.hash(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            table: Rc::new(BucketTable::build(hashes)),
            elements,
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Value<'a>] {
        &self.elements
    }

    pub fn bucket_table(&self) -> &BucketTable {
        &self.table
    }

    /// The elements as a tuple, in backing order.
    pub fn to_tuple(&self) -> Tuple<'a> {
        self.elements.iter().cloned().collect()
    }

    fn locate(&self, d: &Dispatcher<'a>, value: &Value<'a>) -> Result<(u64, Option<usize>), Error> {
        let hash = d.hash(value)?;
        let index = buckets::position(d, &self.table, &self.elements, |e| e, hash, value)?;
        Ok((hash, index))
    }

    pub fn contains(&self, d: &Dispatcher<'a>, value: &Value<'a>) -> Result<bool, Error> {
        Ok(self.locate(d, value)?.1.is_some())
    }

    /// The first occurrence of each element, in backing order. Elements that
    /// never equal themselves (NaN) are all kept.
    pub fn distinct_elements(&self, d: &Dispatcher<'a>) -> Result<Vec<&Value<'a>>, Error> {
        let mut distinct = Vec::with_capacity(self.elements.len());
        for (index, element) in self.elements.iter().enumerate() {
            match self.locate(d, element)?.1 {
                Some(first) if first != index => {}
                _ => distinct.push(element),
            }
        }
        Ok(distinct)
    }

    /// The stored element equal to `value`, if any. The stored element may
    /// carry a different tag than the probe (e.g. `1_i32` found by `1_i64`).
    pub fn find(&self, d: &Dispatcher<'a>, value: &Value<'a>) -> Result<Optional<'a>, Error> {
        let (_, index) = self.locate(d, value)?;
        Ok(index.map(|i| self.elements[i].clone()).into())
    }

    pub fn insert(&self, d: &Dispatcher<'a>, value: Value<'a>) -> Result<Self, Error> {
        let (hash, index) = self.locate(d, &value)?;
        if index.is_some() {
            return Ok(self.clone());
        }
        let position = self.elements.len();
        let elements: Rc<[Value<'a>]> = self
            .elements
            .iter()
            .cloned()
            .chain(core::iter::once(value))
            .collect();
        Ok(Self {
            elements,
            table: Rc::new(self.table.with_index(hash, position)),
        })
    }

    /// Removes every element equal to `value`, duplicates from `make`
    /// included.
    pub fn erase(&self, d: &Dispatcher<'a>, value: &Value<'a>) -> Result<Self, Error> {
        let hash = d.hash(value)?;
        let erased = buckets::positions(d, &self.table, &self.elements, |e| e, hash, value)?;
        if erased.is_empty() {
            return Ok(self.clone());
        }
        let remaining = self
            .elements
            .iter()
            .enumerate()
            .filter(|(i, _)| !erased.contains(i))
            .map(|(_, e)| e.clone());
        Self::make(d, remaining)
    }

    pub fn union(&self, d: &Dispatcher<'a>, other: &Set<'a>) -> Result<Self, Error> {
        other
            .elements
            .iter()
            .try_fold(self.clone(), |acc, e| acc.insert(d, e.clone()))
    }

    pub fn intersection(&self, d: &Dispatcher<'a>, other: &Set<'a>) -> Result<Self, Error> {
        let mut kept = Vec::new();
        for e in self.elements.iter() {
            if other.contains(d, e)? {
                kept.push(e.clone());
            }
        }
        Self::make(d, kept)
    }

    pub fn difference(&self, d: &Dispatcher<'a>, other: &Set<'a>) -> Result<Self, Error> {
        other
            .elements
            .iter()
            .try_fold(self.clone(), |acc, e| acc.erase(d, e))
    }

    /// Elements in exactly one of the two sets.
    pub fn symmetric_difference(&self, d: &Dispatcher<'a>, other: &Set<'a>) -> Result<Self, Error> {
        let left = self.difference(d, other)?;
        let right = other.difference(d, self)?;
        left.union(d, &right)
    }
}

impl PartialEq for Set<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl fmt::Debug for Set<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}
