//! Default rules: operations derived from more primitive ones.
//!
//! Each rule applies only when its guard holds, and guards only resolve.
//! A rule never runs for tags where the operations it is built from would be
//! unsupported.

use super::truth;
use crate::{
    dispatch::{DefaultRule, Dispatcher, Operation},
    errors::Error,
    tags::Tag,
    values::Value,
};

pub static DEFAULT_RULES: &[DefaultRule] = &[
    DefaultRule {
        op: Operation::NotEqual,
        name: "not_equal_from_equal",
        guard: equal_resolves,
        imp: not_equal,
    },
    DefaultRule {
        op: Operation::LessEqual,
        name: "less_equal_from_less",
        guard: swapped_less_resolves,
        imp: less_equal,
    },
    DefaultRule {
        op: Operation::Greater,
        name: "greater_from_less",
        guard: swapped_less_resolves,
        imp: greater,
    },
    DefaultRule {
        op: Operation::GreaterEqual,
        name: "greater_equal_from_less",
        guard: less_resolves,
        imp: greater_equal,
    },
    DefaultRule {
        op: Operation::Minus,
        name: "minus_from_plus_negate",
        guard: plus_and_negate_overridden,
        imp: minus,
    },
    DefaultRule {
        op: Operation::Negate,
        name: "negate_from_minus",
        guard: minus_overridden,
        imp: negate,
    },
    DefaultRule {
        op: Operation::Length,
        name: "length_from_fold",
        guard: fold_left_resolves,
        imp: length,
    },
    DefaultRule {
        op: Operation::AnyOf,
        name: "any_of_from_find_if",
        guard: find_if_resolves,
        imp: any_of,
    },
    DefaultRule {
        op: Operation::Find,
        name: "find_from_find_if",
        guard: find_if_resolves,
        imp: find,
    },
    DefaultRule {
        op: Operation::Contains,
        name: "contains_from_find_if",
        guard: find_if_resolves,
        imp: contains,
    },
    DefaultRule {
        op: Operation::Chain,
        name: "chain_from_flatten_transform",
        guard: transform_and_flatten_resolve,
        imp: chain,
    },
    DefaultRule {
        op: Operation::Flatten,
        name: "flatten_from_chain",
        guard: chain_overridden,
        imp: flatten,
    },
];

// ============================================================================
// Guards
// ============================================================================

fn equal_resolves<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    d.resolve(Operation::Equal, tags).is_supported()
}

fn less_resolves<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    d.resolve(Operation::Less, tags).is_supported()
}

fn swapped_less_resolves<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    match tags {
        &[x, y] => d.resolve(Operation::Less, &[y, x]).is_supported(),
        _ => false,
    }
}

// Only explicit overrides count here: resolving `minus` and `negate` through
// each other's default would loop.
fn plus_and_negate_overridden<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    match tags {
        &[x, y] if x == y => {
            d.has_override(Operation::Plus, tags) && d.has_override(Operation::Negate, &[x])
        }
        _ => false,
    }
}

fn minus_overridden<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    match tags {
        &[t] => {
            d.has_override(Operation::Minus, &[t, t])
                && d.resolve(Operation::Zero, &[t]).is_supported()
        }
        _ => false,
    }
}

fn fold_left_resolves<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    d.resolve(Operation::FoldLeft, tags).is_supported()
}

fn find_if_resolves<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    d.resolve(Operation::FindIf, tags).is_supported()
}

fn transform_and_flatten_resolve<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    d.resolve(Operation::Transform, tags).is_supported()
        && d.resolve(Operation::Flatten, tags).is_supported()
}

fn chain_overridden<'a>(d: &Dispatcher<'a>, tags: &[&'a Tag<'a>]) -> bool {
    d.has_override(Operation::Chain, tags)
}

// ============================================================================
// Comparisons
// ============================================================================

fn not_equal<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    Ok(truth(d, !d.equal(&args[0], &args[1])?))
}

fn less_equal<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    Ok(truth(d, !d.less(&args[1], &args[0])?))
}

fn greater<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    Ok(truth(d, d.less(&args[1], &args[0])?))
}

fn greater_equal<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    Ok(truth(d, !d.less(&args[0], &args[1])?))
}

// ============================================================================
// Group
// ============================================================================

fn minus<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    d.plus(&args[0], &d.negate(&args[1])?)
}

fn negate<'a>(
    d: &Dispatcher<'a>,
    tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    d.minus(&d.zero(tag)?, &args[0])
}

// ============================================================================
// Foldable / Searchable
// ============================================================================

fn length<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let tags = d.tags();
    let count = Value::function(tags, |d, args| {
        let n = args[0].as_index()?;
        Ok(Value::u64(d.tags(), n as u64 + 1))
    });
    d.fold_left(&args[0], &Value::u64(tags, 0), &count)
}

fn any_of<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let found = d.find_if(&args[0], &args[1])?;
    Ok(truth(d, found.as_optional()?.is_just()))
}

/// A predicate matching elements equal to `key`. Elements whose tag has no
/// common type with the key never match.
fn equal_to<'a>(d: &Dispatcher<'a>, key: &Value<'a>) -> Value<'a> {
    let key = key.clone();
    Value::function(d.tags(), move |d, args| {
        let x = &args[0];
        let matches = d.unify(x.tag, key.tag).is_ok() && d.equal(x, &key)?;
        Ok(Value::bool(d.tags(), matches))
    })
}

fn find<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    d.find_if(&args[0], &equal_to(d, &args[1]))
}

fn contains<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let found = d.find_if(&args[0], &equal_to(d, &args[1]))?;
    Ok(truth(d, found.as_optional()?.is_just()))
}

// ============================================================================
// Monad
// ============================================================================

fn chain<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    d.flatten(&d.transform(&args[0], &args[1])?)
}

fn flatten<'a>(
    d: &Dispatcher<'a>,
    _tag: &'a Tag<'a>,
    args: &[Value<'a>],
) -> Result<Value<'a>, Error> {
    let id = Value::function(d.tags(), |_, args| Ok(args[0].clone()));
    d.chain(&args[0], &id)
}

