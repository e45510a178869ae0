//! Builtin instances
//!
//! Registers the standard implementations every dispatcher starts with:
//! - Scalars: comparison, hashing and arithmetic for every numeric width
//! - Str: comparison, hashing and concatenation
//! - Constant wrappers: delegation to the wrapped tag
//! - Pair, Tuple, Optional, Map, Set: the container instances
//!
//! plus the default rules that derive operations from more primitive ones.

use crate::dispatch::{Dispatcher, DispatcherBuilder};
use crate::errors::Error;
use crate::values::Value;
use core::hash::Hasher;

mod constant;
mod defaults;
mod map;
mod optional;
mod pair;
mod scalar;
mod set;
mod string;
mod tuple;


pub use constant::CONSTANT_RULES;
pub use defaults::DEFAULT_RULES;

/// Register every builtin instance and default rule in `builder`.
pub fn register(builder: &mut DispatcherBuilder<'_>) {
    for rule in CONSTANT_RULES.iter().chain(DEFAULT_RULES) {
        builder.default_rule(rule);
    }
    scalar::register(builder);
    string::register(builder);
    pair::register(builder);
    tuple::register(builder);
    optional::register(builder);
    map::register(builder);
    set::register(builder);
}

// Leading byte of every builtin hash, so that values of unrelated shapes
// rarely collide.
const HASH_STR: u8 = 4;
const HASH_PAIR: u8 = 5;
const HASH_TUPLE: u8 = 6;
const HASH_OPTIONAL: u8 = 7;
const HASH_MAP: u8 = 8;
const HASH_SET: u8 = 9;

fn truth<'a>(d: &Dispatcher<'a>, b: bool) -> Value<'a> {
    Value::bool(d.tags(), b)
}

/// Hash of an ordered sequence of component hashes.
fn combine<'a>(d: &Dispatcher<'a>, discriminant: u8, parts: &[u64]) -> Value<'a> {
    let h = d.hash_with(|state| {
        state.write_u8(discriminant);
        state.write_usize(parts.len());
        for &part in parts {
            state.write_u64(part);
        }
    });
    Value::u64(d.tags(), h)
}

/// Hash of an unordered collection of component hashes.
fn combine_unordered<'a>(
    d: &Dispatcher<'a>,
    discriminant: u8,
    parts: impl IntoIterator<Item = u64>,
) -> Value<'a> {
    let mut count = 0usize;
    let mut sum = 0u64;
    for part in parts {
        count += 1;
        sum = sum.wrapping_add(part);
    }
    let h = d.hash_with(|state| {
        state.write_u8(discriminant);
        state.write_usize(count);
        state.write_u64(sum);
    });
    Value::u64(d.tags(), h)
}

fn satisfies<'a>(d: &Dispatcher<'a>, pred: &Value<'a>, x: &Value<'a>) -> Result<bool, Error> {
    d.apply(pred, core::slice::from_ref(x))?.as_bool()
}
