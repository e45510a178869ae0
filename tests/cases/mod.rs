//! Shared fixtures for the property tests.

#![allow(dead_code, unused_macros)]

use concord::prelude::*;

/// A mixed bag of values covering every builtin tag family, including
/// pairs of values that are equal across tags.
pub fn samples<'a>(d: &Dispatcher<'a>) -> Vec<Value<'a>> {
    let tags = d.tags();
    let int_set = Set::make(d, [1, 2, 3].map(|x| Value::i32(tags, x))).expect("set");
    let int_map = Map::make(
        d,
        [
            (Value::i32(tags, 1), Value::str(tags, "one")),
            (Value::str(tags, "two"), Value::i64(tags, 2)),
        ],
    )
    .expect("map");

    vec![
        Value::bool(tags, true),
        Value::char(tags, 'q'),
        Value::i8(tags, -3),
        Value::i32(tags, -3),
        Value::u16(tags, 7),
        Value::i64(tags, 7),
        Value::f32(tags, 0.5),
        Value::f64(tags, 0.5),
        Value::f64(tags, 7.0),
        Value::str(tags, ""),
        Value::str(tags, "concord"),
        Value::pair(tags, Value::i32(tags, 1), Value::str(tags, "a")),
        Value::tuple(tags, []),
        Value::tuple(tags, [Value::i32(tags, 1), Value::str(tags, "a"), Value::bool(tags, true)]),
        Value::tuple(tags, [Value::i64(tags, 1), Value::str(tags, "a"), Value::bool(tags, true)]),
        Value::nothing(tags),
        Value::just(tags, Value::u8(tags, 5)),
        Value::just(tags, Value::i64(tags, 5)),
        Value::constant(tags, Value::i32(tags, 9)),
        Value::constant(tags, Value::i64(tags, 9)),
        Value::from_set(tags, int_set),
        Value::from_map(tags, int_map),
    ]
}

pub fn dispatcher(arena: &bumpalo::Bump) -> Dispatcher<'_> {
    Dispatcher::new(arena, DispatchOptions::default(), |_, _| {})
}

/// Runs `$body` for every ordered pair of samples whose `equal` is defined.
macro_rules! for_each_comparable_pair {
    ($d:expr, |$x:ident, $y:ident| $body:block) => {{
        let samples = cases::samples(&$d);
        for $x in &samples {
            for $y in &samples {
                if $d.equal($x, $y).is_err() {
                    continue;
                }
                $body
            }
        }
    }};
}
