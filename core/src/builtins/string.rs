//! Str instances: lexicographic comparison, hashing, and the concatenation
//! monoid with the empty string as identity.

use super::{HASH_STR, truth};
use crate::{
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    tags::Tag,
    values::Value,
};
use core::hash::Hash;
use ecow::EcoString;

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let str = builder.tags().str();
    builder
        .implement(Operation::Equal, &[str, str], equal)
        .implement(Operation::Less, &[str, str], less)
        .implement(Operation::Hash, &[str], hash)
        .implement(Operation::Zero, &[str], zero)
        .implement(Operation::Plus, &[str, str], plus);
}

fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(truth(d, args[0].as_str()? == args[1].as_str()?))
}

fn less<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(truth(d, args[0].as_str()? < args[1].as_str()?))
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let s = args[0].as_str()?;
    let h = d.hash_with(|state| {
        HASH_STR.hash(state);
        s.hash(state);
    });
    Ok(Value::u64(d.tags(), h))
}

fn zero<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, _args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::str(d.tags(), ""))
}

fn plus<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let mut joined = EcoString::from(args[0].as_str()?);
    joined.push_str(args[1].as_str()?);
    Ok(Value::str(d.tags(), &joined))
}
