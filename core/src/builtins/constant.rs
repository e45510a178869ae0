//! Constant wrappers delegate to the tag they wrap.
//!
//! Comparisons and `hash` unwrap their arguments and answer for the wrapped
//! tag. Arithmetic unwraps, computes on the wrapped tag and re-wraps, so
//! `Constant[I32] + Constant[I32]` is a `Constant[I32]`. Every rule applies
//! only when all dispatch tags are the same constant tag and the wrapped tag
//! supports the operation.

use crate::{
    Vec,
    dispatch::{DefaultRule, Dispatcher, Operation},
    errors::Error,
    tags::Tag,
    values::Value,
};
use smallvec::SmallVec;

fn delegates_to_wrapped<'a>(d: &Dispatcher<'a>, op: Operation, tags: &[&'a Tag<'a>]) -> bool {
    let Some(&first) = tags.first() else {
        return false;
    };
    let Some(inner) = first.value_type() else {
        return false;
    };
    if tags.iter().any(|&t| t != first) {
        return false;
    }
    let inner_tags: SmallVec<[&'a Tag<'a>; 2]> = tags.iter().map(|_| inner).collect();
    d.resolve(op, &inner_tags).is_supported()
}

fn on_wrapped<'a>(
    d: &Dispatcher<'a>,
    op: Operation,
    tag: &'a Tag<'a>,
    args: &[Value<'a>],
    rewrap: bool,
) -> Result<Value<'a>, Error> {
    let inner = tag
        .value_type()
        .ok_or_else(|| Error::mismatch("a constant", tag))?;
    let result = if op.takes_tag() {
        d.call_with_tag(op, inner, args)?
    } else {
        let unwrapped = args
            .iter()
            .map(|a| a.as_constant().cloned())
            .collect::<Result<Vec<_>, _>>()?;
        d.call(op, &unwrapped)?
    };
    if rewrap {
        Ok(Value::constant(d.tags(), result))
    } else {
        Ok(result)
    }
}

macro_rules! constant_rules {
    ($($op:ident => $guard:ident, $imp:ident, rewrap: $rewrap:expr;)*) => {
        $(
            fn $guard<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
                delegates_to_wrapped(d, Operation::$op, tags)
            }

            fn $imp<'a>(
                d: &Dispatcher<'a>,
                tag: &'a Tag<'a>,
                args: &[Value<'a>],
            ) -> Result<Value<'a>, Error> {
                on_wrapped(d, Operation::$op, tag, args, $rewrap)
            }
        )*

        pub static CONSTANT_RULES: &[DefaultRule] = &[
            DefaultRule {
                op: Operation::Value,
                name: "constant_value",
                guard: is_constant,
                imp: unwrap,
            },
            $(
                DefaultRule {
                    op: Operation::$op,
                    name: concat!("constant_", stringify!($imp)),
                    guard: $guard,
                    imp: $imp,
                },
            )*
        ];
    };
}

constant_rules! {
    Equal => equal_guard, equal, rewrap: false;
    Less => less_guard, less, rewrap: false;
    Hash => hash_guard, hash, rewrap: false;
    Zero => zero_guard, zero, rewrap: true;
    One => one_guard, one, rewrap: true;
    Plus => plus_guard, plus, rewrap: true;
    Minus => minus_guard, minus, rewrap: true;
    Negate => negate_guard, negate, rewrap: true;
    Times => times_guard, times, rewrap: true;
    Quotient => quotient_guard, quotient, rewrap: true;
    Remainder => remainder_guard, remainder, rewrap: true;
}

fn is_constant<'a>(_d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    matches!(tags, [Tag::Constant(_)])
}

fn unwrap<'a>(
    _d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    args[0].as_constant().cloned()
}
