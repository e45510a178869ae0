//! Map instances: order-insensitive equality and hashing, Foldable over
//! key/value pairs, and Searchable by key through the bucket table.

use super::{HASH_MAP, combine_unordered, satisfies, truth};
use crate::{
    Vec,
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    tags::Tag,
    values::{Map, Value},
};
use core::hash::Hasher;

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let map = builder.tags().map();
    builder
        .implement(Operation::Equal, &[map, map], equal)
        .implement(Operation::Hash, &[map], hash)
        .implement(Operation::Length, &[map], length)
        .implement(Operation::FoldLeft, &[map], fold_left)
        .implement(Operation::FoldRight, &[map], fold_right)
        .implement(Operation::FindIf, &[map], find_if)
        .implement(Operation::Find, &[map], find)
        .implement(Operation::Contains, &[map], contains);
}

/// Entries as `Pair` values, in backing order.
fn pairs<'a>(d: &Dispatcher<'a>, map: &Map<'a>) -> Vec<Value<'a>> {
    map.entries()
        .iter()
        .map(|(k, v)| Value::pair(d.tags(), k.clone(), v.clone()))
        .collect()
}

/// Every key of one is found in the other with an equal value, counting the
/// first occurrence of each key. Runs in embedding-only mode so that equal
/// maps always hash alike.
fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a, b) = (args[0].as_map()?, args[1].as_map()?);
    let same = d.with_embedding_only(|| Ok::<_, Error>(included(d, a, b)? && included(d, b, a)?))?;
    Ok(truth(d, same))
}

fn included<'a>(d: &Dispatcher<'a>, a: &Map<'a>, b: &Map<'a>) -> Result<bool, Error> {
    for (k, v) in a.distinct_entries(d)? {
        match b.get(d, k)? {
            Some(w) if d.equal_embedded(v, w)? => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let entry_hashes = args[0]
        .as_map()?
        .distinct_entries(d)?
        .into_iter()
        .map(|(k, v)| {
            let (hk, hv) = (d.hash(k)?, d.hash(v)?);
            Ok(d.hash_with(|state| {
                state.write_u64(hk);
                state.write_u64(hv);
            }))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(combine_unordered(d, HASH_MAP, entry_hashes))
}

fn length<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::u64(d.tags(), args[0].as_map()?.len() as u64))
}

fn fold_left<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[2];
    pairs(d, args[0].as_map()?)
        .into_iter()
        .try_fold(args[1].clone(), |acc, p| d.apply(f, &[acc, p]))
}

fn fold_right<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[2];
    pairs(d, args[0].as_map()?)
        .into_iter()
        .rev()
        .try_fold(args[1].clone(), |acc, p| d.apply(f, &[p, acc]))
}

/// The value under the first key satisfying the predicate.
fn find_if<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    for (k, v) in args[0].as_map()?.entries() {
        if satisfies(d, &args[1], k)? {
            return Ok(Value::just(d.tags(), v.clone()));
        }
    }
    Ok(Value::nothing(d.tags()))
}

fn find<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let found = args[0].as_map()?.find(d, &args[1])?;
    Ok(Value::from_optional(d.tags(), found))
}

fn contains<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    Ok(truth(d, args[0].as_map()?.contains(d, &args[1])?))
}
