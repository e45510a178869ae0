//! Pair instances (Product): projections, component-wise equality,
//! lexicographic ordering and hashing.

use super::{HASH_PAIR, combine, truth};
use crate::{
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    tags::Tag,
    values::Value,
};

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let pair = builder.tags().pair();
    builder
        .implement(Operation::First, &[pair], first)
        .implement(Operation::Second, &[pair], second)
        .implement(Operation::Equal, &[pair, pair], equal)
        .implement(Operation::Less, &[pair, pair], less)
        .implement(Operation::Hash, &[pair], hash);
}

fn first<'a>(_d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(args[0].as_pair()?.0.clone())
}

fn second<'a>(_d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(args[0].as_pair()?.1.clone())
}

fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a1, a2) = args[0].as_pair()?;
    let (b1, b2) = args[1].as_pair()?;
    Ok(truth(d, d.equal(a1, b1)? && d.equal(a2, b2)?))
}

fn less<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a1, a2) = args[0].as_pair()?;
    let (b1, b2) = args[1].as_pair()?;
    let result = d.less(a1, b1)? || (!d.less(b1, a1)? && d.less(a2, b2)?);
    Ok(truth(d, result))
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a, b) = args[0].as_pair()?;
    Ok(combine(d, HASH_PAIR, &[d.hash(a)?, d.hash(b)?]))
}
