//! Scalar instances: Comparable, Orderable and Hashable for every scalar,
//! Monoid, Group and Ring for every numeric tag, EuclideanRing for integers.

use super::truth;
use crate::{
    dispatch::{Dispatcher, DispatcherBuilder, Operation},
    errors::Error,
    format,
    tags::Tag,
    values::{Scalar, Value},
};

pub(super) fn register<'a>(builder: &mut DispatcherBuilder<'a>) {
    let tags = builder.tags();
    let integral = [
        tags.i8(),
        tags.i16(),
        tags.i32(),
        tags.i64(),
        tags.u8(),
        tags.u16(),
        tags.u32(),
        tags.u64(),
    ];
    let numeric: crate::Vec<_> = integral
        .iter()
        .copied()
        .chain([tags.f32(), tags.f64()])
        .collect();
    let scalars: crate::Vec<_> = numeric
        .iter()
        .copied()
        .chain([tags.bool(), tags.char()])
        .collect();

    builder
        .implement_all(Operation::Equal, &scalars, equal)
        .implement_all(Operation::Less, &scalars, less)
        .implement_all(Operation::Hash, &scalars, hash)
        .implement_all(Operation::Zero, &numeric, zero)
        .implement_all(Operation::One, &numeric, one)
        .implement_all(Operation::Plus, &numeric, plus)
        .implement_all(Operation::Minus, &numeric, minus)
        .implement_all(Operation::Negate, &numeric, negate)
        .implement_all(Operation::Times, &numeric, times)
        .implement_all(Operation::Quotient, &integral, quotient)
        .implement_all(Operation::Remainder, &integral, remainder);
}

fn operands(args: &[Value<'_>]) -> Result<(Scalar, Scalar), Error> {
    Ok((args[0].as_scalar()?, args[1].as_scalar()?))
}

// ============================================================================
// Comparable / Orderable / Hashable
// ============================================================================

fn equal<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (x, y) = operands(args)?;
    Ok(truth(d, x == y))
}

fn less<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let (x, y) = operands(args)?;
    Ok(truth(d, x < y))
}

fn hash<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    let x = args[0].as_scalar()?;
    let h = d.hash_with(|state| x.hash_normalized(state));
    Ok(Value::u64(d.tags(), h))
}

// ============================================================================
// Arithmetic
// ============================================================================

fn identity<'a>(
    d: &Dispatcher<'a>,
    tag: &'a Tag<'a>,
    make: fn(&Tag<'_>) -> Option<Scalar>,
) -> Result<Value<'a>, Error> {
    let scalar = make(tag).ok_or_else(|| Error::mismatch("a numeric tag", tag))?;
    Ok(Value::scalar(d.tags(), scalar))
}

fn zero<'a>(d: &Dispatcher<'a>, tag: &'a Tag<'a>, _args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    identity(d, tag, Scalar::zero)
}

fn one<'a>(d: &Dispatcher<'a>, tag: &'a Tag<'a>, _args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    identity(d, tag, Scalar::one)
}

/// Applies a same-variant scalar operation to the first two arguments.
fn binary<'a>(
    d: &Dispatcher<'a>,
    args: &[Value<'a>],
    op: fn(Scalar, Scalar) -> Option<Scalar>,
) -> Result<Value<'a>, Error> {
    let (x, y) = operands(args)?;
    let result =
        op(x, y).ok_or_else(|| Error::mismatch(format!("{}", args[0].tag), args[1].tag))?;
    Ok(Value::scalar(d.tags(), result))
}

fn plus<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    binary(d, args, Scalar::plus)
}

fn minus<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    binary(d, args, Scalar::minus)
}

fn times<'a>(d: &Dispatcher<'a>, _tag: &'a Tag<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
    binary(d, args, Scalar::times)
}

fn quotient<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    if args[1].as_scalar()?.is_zero() {
        return Err(Error::DivisionByZero);
    }
    binary(d, args, Scalar::quotient)
}

fn remainder<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    if args[1].as_scalar()?.is_zero() {
        return Err(Error::DivisionByZero);
    }
    binary(d, args, Scalar::remainder)
}

fn negate<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let x = args[0].as_scalar()?;
    let result = x
        .negate()
        .ok_or_else(|| Error::mismatch("a numeric value", args[0].tag))?;
    Ok(Value::scalar(d.tags(), result))
}
