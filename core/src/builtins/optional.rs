//! Optional instances: Comparable, Orderable (nothing sorts first),
//! Hashable, Foldable, Functor, Searchable, Applicative and Monad.

use super::{HASH_OPTIONAL, combine, satisfies, truth};
use crate::{
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    tags::Tag,
    values::{Optional, Value},
};

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let optional = builder.tags().optional();
    builder
        .implement(Operation::Equal, &[optional, optional], equal)
        .implement(Operation::Less, &[optional, optional], less)
        .implement(Operation::Hash, &[optional], hash)
        .implement(Operation::FoldLeft, &[optional], fold_left)
        .implement(Operation::FoldRight, &[optional], fold_right)
        .implement(Operation::Transform, &[optional], transform)
        .implement(Operation::FindIf, &[optional], find_if)
        .implement(Operation::Lift, &[optional], lift)
        .implement(Operation::Flatten, &[optional], flatten)
        .implement(Operation::Chain, &[optional], chain);
}

fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let result = match (args[0].as_optional()?.value(), args[1].as_optional()?.value()) {
        (None, None) => true,
        (Some(a), Some(b)) => d.equal(a, b)?,
        _ => false,
    };
    Ok(truth(d, result))
}

fn less<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let result = match (args[0].as_optional()?.value(), args[1].as_optional()?.value()) {
        (None, Some(_)) => true,
        (Some(a), Some(b)) => d.less(a, b)?,
        _ => false,
    };
    Ok(truth(d, result))
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    match args[0].as_optional()?.value() {
        None => Ok(combine(d, HASH_OPTIONAL, &[])),
        Some(x) => Ok(combine(d, HASH_OPTIONAL, &[d.hash(x)?])),
    }
}

fn fold_left<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    match args[0].as_optional()?.value() {
        None => Ok(args[1].clone()),
        Some(x) => d.apply(&args[2], &[args[1].clone(), x.clone()]),
    }
}

fn fold_right<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    match args[0].as_optional()?.value() {
        None => Ok(args[1].clone()),
        Some(x) => d.apply(&args[2], &[x.clone(), args[1].clone()]),
    }
}

fn transform<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[1];
    let mapped = args[0]
        .as_optional()?
        .transform(|x| d.apply(f, core::slice::from_ref(x)))?;
    Ok(Value::from_optional(d.tags(), mapped))
}

fn find_if<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let found = match args[0].as_optional()?.value() {
        Some(x) if satisfies(d, &args[1], x)? => Optional::just(x.clone()),
        _ => Optional::nothing(),
    };
    Ok(Value::from_optional(d.tags(), found))
}

fn lift<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::just(d.tags(), args[0].clone()))
}

fn flatten<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let flat = args[0].as_optional()?.flatten()?;
    Ok(Value::from_optional(d.tags(), flat))
}

fn chain<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let f = &args[1];
    let bound = args[0]
        .as_optional()?
        .chain(|x| d.apply(f, core::slice::from_ref(x)))?;
    Ok(Value::from_optional(d.tags(), bound))
}
