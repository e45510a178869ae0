//! Set instances: order-insensitive equality and hashing, Foldable over the
//! elements, and Searchable through the bucket table.

use super::{HASH_SET, combine_unordered, satisfies, truth};
use crate::{
    Vec,
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    tags::Tag,
    values::{Set, Value},
};

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let set = builder.tags().set();
    builder
        .implement(Operation::Equal, &[set, set], equal)
        .implement(Operation::Hash, &[set], hash)
        .implement(Operation::Length, &[set], length)
        .implement(Operation::FoldLeft, &[set], fold_left)
        .implement(Operation::FoldRight, &[set], fold_right)
        .implement(Operation::FindIf, &[set], find_if)
        .implement(Operation::Find, &[set], find)
        .implement(Operation::Contains, &[set], contains);
}

/// Mutual containment over the distinct elements, in embedding-only mode so
/// that equal sets always hash alike.
fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a, b) = (args[0].as_set()?, args[1].as_set()?);
    let same = d.with_embedding_only(|| Ok::<_, Error>(included(d, a, b)? && included(d, b, a)?))?;
    Ok(truth(d, same))
}

fn included<'a>(d: &Dispatcher<'a>, a: &Set<'a>, b: &Set<'a>) -> Result<bool, Error> {
    for x in a.distinct_elements(d)? {
        if !b.contains(d, x)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let hashes = args[0]
        .as_set()?
        .distinct_elements(d)?
        .into_iter()
        .map(|x| d.hash(x))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(combine_unordered(d, HASH_SET, hashes))
}

fn length<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::u64(d.tags(), args[0].as_set()?.len() as u64))
}

fn fold_left<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[2];
    args[0]
        .as_set()?
        .elements()
        .iter()
        .try_fold(args[1].clone(), |acc, x| d.apply(f, &[acc, x.clone()]))
}

fn fold_right<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[2];
    args[0]
        .as_set()?
        .elements()
        .iter()
        .rev()
        .try_fold(args[1].clone(), |acc, x| d.apply(f, &[x.clone(), acc]))
}

fn find_if<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    for x in args[0].as_set()?.elements() {
        if satisfies(d, &args[1], x)? {
            return Ok(Value::just(d.tags(), x.clone()));
        }
    }
    Ok(Value::nothing(d.tags()))
}

fn find<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let found = args[0].as_set()?.find(d, &args[1])?;
    Ok(Value::from_optional(d.tags(), found))
}

fn contains<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    Ok(truth(d, args[0].as_set()?.contains(d, &args[1])?))
}
