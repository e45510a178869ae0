//! Tuple instances: Comparable, Orderable, Hashable, Monoid (empty tuple and
//! concatenation), Foldable, Iterable, Functor, Searchable, Applicative and
//! Monad (`flatten` concatenates; `chain` comes from the default rule).

use super::{HASH_TUPLE, combine, satisfies, truth};
use crate::{
    Vec,
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    tags::Tag,
    values::{Tuple, Value},
};

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let tuple = builder.tags().tuple();
    builder
        .implement(Operation::Equal, &[tuple, tuple], equal)
        .implement(Operation::Less, &[tuple, tuple], less)
        .implement(Operation::Hash, &[tuple], hash)
        .implement(Operation::Zero, &[tuple], zero)
        .implement(Operation::Plus, &[tuple, tuple], plus)
        .implement(Operation::Length, &[tuple], length)
        .implement(Operation::At, &[tuple], at)
        .implement(Operation::FoldLeft, &[tuple], fold_left)
        .implement(Operation::FoldRight, &[tuple], fold_right)
        .implement(Operation::Transform, &[tuple], transform)
        .implement(Operation::FindIf, &[tuple], find_if)
        .implement(Operation::Lift, &[tuple], lift)
        .implement(Operation::Flatten, &[tuple], flatten);
}

// ============================================================================
// Comparable / Orderable / Hashable
// ============================================================================

/// Position-wise equality. Tuples of different lengths are unequal.
fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a, b) = (args[0].as_tuple()?, args[1].as_tuple()?);
    if a.len() != b.len() {
        return Ok(truth(d, false));
    }
    for (x, y) in a.iter().zip(b.iter()) {
        if !d.equal(x, y)? {
            return Ok(truth(d, false));
        }
    }
    Ok(truth(d, true))
}

/// Lexicographic ordering; a proper prefix is less than the longer tuple.
fn less<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (a, b) = (args[0].as_tuple()?, args[1].as_tuple()?);
    for (x, y) in a.iter().zip(b.iter()) {
        if d.less(x, y)? {
            return Ok(truth(d, true));
        }
        if d.less(y, x)? {
            return Ok(truth(d, false));
        }
    }
    Ok(truth(d, a.len() < b.len()))
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let parts = args[0]
        .as_tuple()?
        .iter()
        .map(|x| d.hash(x))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(combine(d, HASH_TUPLE, &parts))
}

// ============================================================================
// Monoid
// ============================================================================

fn zero<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, _args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::from_tuple(d.tags(), Tuple::empty()))
}

fn plus<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let joined = args[0].as_tuple()?.concat(args[1].as_tuple()?);
    Ok(Value::from_tuple(d.tags(), joined))
}

// ============================================================================
// Foldable / Iterable / Functor / Searchable
// ============================================================================

fn length<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::u64(d.tags(), args[0].as_tuple()?.len() as u64))
}

/// Element at a position. An out-of-range index is a contract violation and
/// panics.
fn at<'a>(_d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let tuple = args[0].as_tuple()?;
    let index = args[1].as_index()?;
    Ok(tuple.at(index).clone())
}

fn fold_left<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[2];
    args[0]
        .as_tuple()?
        .fold_left(args[1].clone(), |acc, x| d.apply(f, &[acc, x.clone()]))
}

fn fold_right<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[2];
    args[0]
        .as_tuple()?
        .fold_right(args[1].clone(), |x, acc| d.apply(f, &[x.clone(), acc]))
}

fn transform<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let f = &args[1];
    let mapped = args[0]
        .as_tuple()?
        .transform(|x| d.apply(f, core::slice::from_ref(x)))?;
    Ok(Value::from_tuple(d.tags(), mapped))
}

fn find_if<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    for x in args[0].as_tuple()? {
        if satisfies(d, &args[1], x)? {
            return Ok(Value::just(d.tags(), x.clone()));
        }
    }
    Ok(Value::nothing(d.tags()))
}

// ============================================================================
// Applicative / Monad
// ============================================================================

fn lift<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    Ok(Value::tuple(d.tags(), [args[0].clone()]))
}

/// Concatenates a tuple of tuples.
fn flatten<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let mut elements = Vec::new();
    for inner in args[0].as_tuple()? {
        elements.extend(inner.as_tuple()?.iter().cloned());
    }
    Ok(Value::tuple(d.tags(), elements))
}
