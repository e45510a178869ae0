use crate::{
    ComparisonPolicy, Concept, DispatchOptions, Dispatcher, Error, Map, Operation, Resolution,
    Set, Value, dispatch::Refusal, test_utils::init_test_logging,
};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

fn dispatcher(arena: &Bump) -> Dispatcher<'_> {
    Dispatcher::new(arena, DispatchOptions::default(), |_, _| {})
}

/// Integers modulo 7, registered with `plus`, `negate` and `zero` only.
fn mod7(arena: &Bump) -> Dispatcher<'_> {
    Dispatcher::new(arena, DispatchOptions::default(), |tags, b| {
        let m = tags.custom("Mod7");
        b.implement(Operation::Zero, &[m], |d, _, _| {
            Ok(Value::custom(d.tags(), "Mod7", [Value::i64(d.tags(), 0)]))
        })
        .implement(Operation::Plus, &[m, m], |d, _, args| {
            let x = args[0].as_custom()?.at(0).as_integer()?;
            let y = args[1].as_custom()?.at(0).as_integer()?;
            let sum = Value::i64(d.tags(), ((x + y) % 7) as i64);
            Ok(Value::custom(d.tags(), "Mod7", [sum]))
        })
        .implement(Operation::Negate, &[m], |d, _, args| {
            let x = args[0].as_custom()?.at(0).as_integer()?;
            let neg = Value::i64(d.tags(), ((7 - x) % 7) as i64);
            Ok(Value::custom(d.tags(), "Mod7", [neg]))
        })
        .implement(Operation::Equal, &[m, m], |d, _, args| {
            let x = args[0].as_custom()?.at(0);
            let y = args[1].as_custom()?.at(0);
            Ok(Value::bool(d.tags(), d.equal(x, y)?))
        });
    })
}

fn mod7_value<'a>(d: &Dispatcher<'a>, n: i64) -> Value<'a> {
    Value::custom(d.tags(), "Mod7", [Value::i64(d.tags(), n)])
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_override() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();
    let resolution = d.resolve(Operation::Equal, &[tags.i32(), tags.i32()]);
    assert!(matches!(resolution, Resolution::Override(_)));
    assert_eq!(resolution.route(), "override");
}

#[test]
fn test_resolve_default_rule() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();
    let resolution = d.resolve(Operation::NotEqual, &[tags.str(), tags.str()]);
    assert_eq!(resolution.route(), "not_equal_from_equal");

    let resolution = d.resolve(Operation::Length, &[tags.optional()]);
    assert_eq!(resolution.route(), "length_from_fold");
}

#[test]
fn test_resolve_via_common() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();
    match d.resolve(Operation::Equal, &[tags.i16(), tags.u32()]) {
        Resolution::ViaCommon(common) => {
            assert_eq!(common.tag, tags.u32());
        }
        other => panic!("expected ViaCommon, got {:?}", other),
    }
    // u32 -> i64 is an embedding, so the comparison goes through.
    assert!(
        d.resolve(Operation::Less, &[tags.u32(), tags.i64()])
            .is_supported()
    );
}

#[test]
fn test_resolve_refusals() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    assert!(matches!(
        d.resolve(Operation::Equal, &[tags.i32(), tags.u32()]),
        Resolution::Unsupported(Refusal::NotEmbedded(t)) if t == tags.u32()
    ));
    assert!(matches!(
        d.resolve(Operation::Equal, &[tags.str(), tags.i32()]),
        Resolution::Unsupported(Refusal::NoCommonType)
    ));
    assert!(matches!(
        d.resolve(Operation::Transform, &[tags.i32()]),
        Resolution::Unsupported(Refusal::NoImplementation)
    ));
    // Arithmetic may go through a lossy promotion.
    assert!(
        d.resolve(Operation::Plus, &[tags.i32(), tags.u32()])
            .is_supported()
    );
}

#[test]
fn test_resolve_is_deterministic() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();
    for &op in Operation::ALL {
        for tag in [tags.i32(), tags.str(), tags.tuple(), tags.optional(), tags.map()] {
            let key: crate::Vec<_> = core::iter::repeat_n(tag, op.dispatch_arity()).collect();
            assert_eq!(
                d.resolve(op, &key).route(),
                d.resolve(op, &key).route(),
                "{} on {}",
                op,
                tag
            );
        }
    }
}

// ============================================================================
// Concepts
// ============================================================================

#[test]
fn test_models_numeric() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    for concept in [
        Concept::Comparable,
        Concept::Orderable,
        Concept::Hashable,
        Concept::Monoid,
        Concept::Group,
        Concept::Ring,
        Concept::EuclideanRing,
    ] {
        assert!(d.models(tags.i32(), concept), "I32 should model {}", concept);
    }
    assert!(d.models(tags.f64(), Concept::Ring));
    assert!(!d.models(tags.f64(), Concept::EuclideanRing));
    assert!(!d.models(tags.bool(), Concept::Monoid));
    assert!(!d.models(tags.i32(), Concept::Foldable));
}

#[test]
fn test_models_containers() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    assert!(d.models(tags.str(), Concept::Monoid));
    assert!(!d.models(tags.str(), Concept::Group));

    assert!(d.models(tags.tuple(), Concept::Sequence));
    assert!(d.models(tags.tuple(), Concept::Monad));
    assert!(d.models(tags.tuple(), Concept::Monoid));

    assert!(d.models(tags.optional(), Concept::Monad));
    assert!(d.models(tags.optional(), Concept::Searchable));
    assert!(!d.models(tags.optional(), Concept::Sequence));

    assert!(d.models(tags.map(), Concept::Searchable));
    assert!(d.models(tags.map(), Concept::Foldable));
    assert!(!d.models(tags.map(), Concept::Functor));
    assert!(d.models(tags.set(), Concept::Hashable));

    assert!(d.models(tags.pair(), Concept::Product));
    assert!(!d.models(tags.function(), Concept::Comparable));
}

#[test]
fn test_models_constant() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let c = tags.constant(tags.i32());
    assert!(d.models(c, Concept::Constant));
    assert!(d.models(c, Concept::Ring));
    assert!(d.models(c, Concept::Orderable));
    assert!(!d.models(tags.i32(), Concept::Constant));
    assert!(!d.models(tags.constant(tags.str()), Concept::Group));
}

#[test]
fn test_models_never_invokes() {
    let arena = Bump::new();
    let d = Dispatcher::new(&arena, DispatchOptions::default(), |tags, b| {
        let t = tags.custom("Explosive");
        b.implement(Operation::Equal, &[t, t], |_, _, _| {
            panic!("models must not run implementations")
        });
    });
    let t = d.tags().custom("Explosive");
    assert!(d.models(t, Concept::Comparable));
    assert!(!d.models(t, Concept::Orderable));
}

#[test]
fn test_concept_metadata() {
    assert_eq!(Concept::Monad.name(), "Monad");
    assert_eq!(
        Concept::Monad.refines(),
        &[Concept::Functor, Concept::Applicative]
    );
    assert!(Concept::Searchable.signature().contains(&Operation::Find));
    for concept in Concept::ALL {
        assert!(!concept.signature().is_empty());
        assert!(!concept.description().is_empty());
    }
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_cross_tag_comparisons() {
    init_test_logging();
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let a = Value::i8(tags, 3);
    let b = Value::i32(tags, 3);
    let c = Value::f64(tags, 3.5);
    assert!(d.equal(&a, &b).unwrap());
    assert!(d.less(&b, &c).unwrap());
    assert!(d.greater(&c, &a).unwrap());
    assert!(d.less_equal(&a, &b).unwrap());
    assert!(d.greater_equal(&b, &a).unwrap());
    assert!(d.not_equal(&a, &c).unwrap());

    // i64 does not embed into f64.
    assert!(d.less(&Value::i64(tags, 3), &c).is_err());
}

#[test]
fn test_lossy_comparison_is_refused() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let err = d
        .equal(&Value::i32(tags, -1), &Value::u32(tags, u32::MAX))
        .unwrap_err();
    assert_eq!(
        err,
        Error::NotEmbedded {
            op: Operation::Equal,
            left: "I32".into(),
            right: "U32".into(),
            common: "U32".into(),
        }
    );
}

#[test]
fn test_lossy_comparison_allowed_by_policy() {
    let arena = Bump::new();
    let options = DispatchOptions {
        comparison: ComparisonPolicy::AllowLossy,
        ..Default::default()
    };
    let d = Dispatcher::new(&arena, options, |_, _| {});
    let tags = d.tags();

    // -1 converts to u32::MAX under the usual arithmetic conversions.
    assert!(
        d.equal(&Value::i32(tags, -1), &Value::u32(tags, u32::MAX))
            .unwrap()
    );
}

#[test]
fn test_hashed_containers_ignore_lossy_policy() {
    let arena = Bump::new();
    let options = DispatchOptions {
        comparison: ComparisonPolicy::AllowLossy,
        ..Default::default()
    };
    let d = Dispatcher::new(&arena, options, |_, _| {});
    let tags = d.tags();

    let exact = Value::i64(tags, (1 << 53) + 1);
    let rounded = Value::f64(tags, (1u64 << 53) as f64);
    assert!(d.equal(&exact, &rounded).unwrap());
    assert!(!d.equal_embedded(&exact, &rounded).unwrap());

    let set = Set::make(&d, [rounded.clone()]).unwrap();
    assert!(!set.contains(&d, &exact).unwrap());
    assert!(set.contains(&d, &Value::f64(tags, (1u64 << 53) as f64)).unwrap());

    let exact_set = Value::from_set(tags, Set::make(&d, [exact.clone()]).unwrap());
    let rounded_set = Value::from_set(tags, set);
    assert!(!d.equal(&exact_set, &rounded_set).unwrap());
    assert!(!d.equal(&rounded_set, &exact_set).unwrap());

    let key = || Value::str(tags, "k");
    let exact_map = Value::from_map(tags, Map::make(&d, [(key(), exact.clone())]).unwrap());
    let rounded_map = Value::from_map(tags, Map::make(&d, [(key(), rounded.clone())]).unwrap());
    assert!(!d.equal(&exact_map, &rounded_map).unwrap());

    // The policy still applies outside hashed containers.
    assert!(d.less_equal(&exact, &rounded).unwrap());
}

#[test]
fn test_cross_tag_arithmetic_promotes() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let sum = d.plus(&Value::i16(tags, 2), &Value::i64(tags, 40)).unwrap();
    assert_eq!(sum, Value::i64(tags, 42));

    let product = d.times(&Value::u8(tags, 3), &Value::f32(tags, 0.5)).unwrap();
    assert_eq!(product, Value::f32(tags, 1.5));
}

#[test]
fn test_unsupported_error() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let f = Value::function(tags, |_, args| Ok(args[0].clone()));
    let err = d.transform(&Value::i32(tags, 1), &f).unwrap_err();
    assert_eq!(
        err,
        Error::Unsupported {
            op: Operation::Transform,
            tags: "I32".into(),
        }
    );
    assert_eq!(format!("{}", err), "`transform` is not supported for (I32)");

    let err = d
        .equal(&Value::str(tags, "1"), &Value::i32(tags, 1))
        .unwrap_err();
    assert_eq!(
        err,
        Error::NoCommonType {
            left: "Str".into(),
            right: "I32".into(),
        }
    );
}

#[test]
fn test_arity_errors() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let err = d
        .call(Operation::Plus, &[Value::i32(tags, 1)])
        .unwrap_err();
    assert_eq!(
        err,
        Error::Arity {
            op: Operation::Plus,
            expected: 2,
            found: 1,
        }
    );

    let err = d.call(Operation::Zero, &[]).unwrap_err();
    assert_eq!(
        err,
        Error::Arity {
            op: Operation::Zero,
            expected: 1,
            found: 0,
        }
    );
}

#[test]
fn test_division_by_zero() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    assert_eq!(
        d.quotient(&Value::i32(tags, 1), &Value::i32(tags, 0)),
        Err(Error::DivisionByZero)
    );
    assert_eq!(
        d.remainder(&Value::u8(tags, 1), &Value::u8(tags, 0)),
        Err(Error::DivisionByZero)
    );
    assert_eq!(
        d.quotient(&Value::i32(tags, 7), &Value::i32(tags, 2)),
        Ok(Value::i32(tags, 3))
    );
}

#[test]
fn test_depth_limit() {
    let arena = Bump::new();
    let options = DispatchOptions {
        max_depth: 16,
        ..Default::default()
    };
    let d = Dispatcher::new(&arena, options, |tags, b| {
        let t = tags.custom("Loop");
        b.implement(Operation::Equal, &[t, t], |d, _, args| {
            Ok(Value::bool(d.tags(), d.equal(&args[0], &args[1])?))
        });
    });
    let x = Value::custom(d.tags(), "Loop", []);
    assert_eq!(
        d.equal(&x, &x),
        Err(Error::DepthExceeded {
            depth: 17,
            max_depth: 16,
        })
    );
    // The depth counter unwinds after the failure.
    assert!(d.equal(&Value::i32(d.tags(), 1), &Value::i32(d.tags(), 1)).unwrap());
}

#[test]
fn test_user_override_replaces_builtin() {
    let arena = Bump::new();
    let d = Dispatcher::new(&arena, DispatchOptions::default(), |tags, b| {
        // Case-insensitive string equality.
        b.implement(Operation::Equal, &[tags.str(), tags.str()], |d, _, args| {
            let (a, b) = (args[0].as_str()?, args[1].as_str()?);
            Ok(Value::bool(d.tags(), a.eq_ignore_ascii_case(b)))
        });
    });
    let tags = d.tags();
    assert!(
        d.equal(&Value::str(tags, "Hello"), &Value::str(tags, "hello"))
            .unwrap()
    );
    // The derived `not_equal` follows the override.
    assert!(
        !d.not_equal(&Value::str(tags, "Hello"), &Value::str(tags, "HELLO"))
            .unwrap()
    );
}

#[test]
fn test_group_defaults_from_monoid_and_negate() {
    let arena = Bump::new();
    let d = mod7(&arena);
    let m = d.tags().custom("Mod7");

    assert_eq!(d.resolve(Operation::Minus, &[m, m]).route(), "minus_from_plus_negate");
    assert!(d.models(m, Concept::Group));

    let diff = d.minus(&mod7_value(&d, 2), &mod7_value(&d, 5)).unwrap();
    assert!(d.equal(&diff, &mod7_value(&d, 4)).unwrap());
}

#[test]
fn test_negate_default_from_minus() {
    let arena = Bump::new();
    let d = Dispatcher::new(&arena, DispatchOptions::default(), |tags, b| {
        let t = tags.custom("Counter");
        b.implement(Operation::Zero, &[t], |d, _, _| {
            Ok(Value::custom(d.tags(), "Counter", [Value::i64(d.tags(), 0)]))
        })
        .implement(Operation::Minus, &[t, t], |d, _, args| {
            let x = args[0].as_custom()?.at(0);
            let y = args[1].as_custom()?.at(0);
            Ok(Value::custom(d.tags(), "Counter", [d.minus(x, y)?]))
        });
    });
    let t = d.tags().custom("Counter");
    assert_eq!(d.resolve(Operation::Negate, &[t]).route(), "negate_from_minus");

    let x = Value::custom(d.tags(), "Counter", [Value::i64(d.tags(), 9)]);
    let negated = d.negate(&x).unwrap();
    assert_eq!(negated.as_custom().unwrap().at(0), &Value::i64(d.tags(), -9));
}

#[test]
fn test_registered_common_type_enables_comparison() {
    let arena = Bump::new();
    let d = Dispatcher::new(&arena, DispatchOptions::default(), |tags, b| {
        let cents = tags.custom("Cents");
        let dollars = tags.custom("Dollars");
        b.implement(Operation::Equal, &[cents, cents], |d, _, args| {
            let (x, y) = (args[0].as_custom()?.at(0), args[1].as_custom()?.at(0));
            Ok(Value::bool(d.tags(), d.equal(x, y)?))
        })
        .common_type(cents, dollars, cents)
        .conversion(dollars, cents, true, |tags, v| {
            let amount = v.as_custom()?.at(0).as_integer()?;
            Ok(Value::custom(tags, "Cents", [Value::i64(tags, (amount * 100) as i64)]))
        });
    });
    let tags = d.tags();
    let dollar = Value::custom(tags, "Dollars", [Value::i64(tags, 2)]);
    let cents = Value::custom(tags, "Cents", [Value::i64(tags, 200)]);
    assert!(d.equal(&dollar, &cents).unwrap());
    assert!(d.equal(&cents, &dollar).unwrap());
}

#[test]
fn test_common_type_without_conversion_is_unsupported() {
    let arena = Bump::new();
    let d = Dispatcher::new(&arena, DispatchOptions::default(), |tags, b| {
        let meters = tags.custom("Meters");
        let feet = tags.custom("Feet");
        b.implement(Operation::Equal, &[meters, meters], |d, _, args| {
            let (x, y) = (args[0].as_custom()?.at(0), args[1].as_custom()?.at(0));
            Ok(Value::bool(d.tags(), d.equal(x, y)?))
        })
        .common_type(meters, feet, meters);
    });
    let tags = d.tags();
    let (meters, feet) = (tags.custom("Meters"), tags.custom("Feet"));

    let resolution = d.resolve(Operation::Equal, &[feet, meters]);
    assert!(matches!(
        resolution,
        Resolution::Unsupported(Refusal::NoImplementation)
    ));

    let m = Value::custom(tags, "Meters", [Value::i64(tags, 3)]);
    let f = Value::custom(tags, "Feet", [Value::i64(tags, 10)]);
    assert_eq!(
        d.equal(&f, &m).unwrap_err(),
        Error::Unsupported {
            op: Operation::Equal,
            tags: "Feet, Meters".into(),
        }
    );
    assert!(d.models(meters, Concept::Comparable));
}

#[test]
fn test_constant_delegation() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let two = Value::constant(tags, Value::i32(tags, 2));
    let three = Value::constant(tags, Value::i32(tags, 3));

    let sum = d.plus(&two, &three).unwrap();
    assert_eq!(sum, Value::constant(tags, Value::i32(tags, 5)));
    assert_eq!(d.value(&sum).unwrap(), Value::i32(tags, 5));
    assert!(d.less(&two, &three).unwrap());
    assert!(d.not_equal(&two, &three).unwrap());
    assert_eq!(
        d.zero(tags.constant(tags.i32())).unwrap(),
        Value::constant(tags, Value::i32(tags, 0))
    );

    // Constants of different widths unify through their wrapped tags.
    let wide = Value::constant(tags, Value::i64(tags, 2));
    assert!(d.equal(&two, &wide).unwrap());
    assert_eq!(d.hash(&two).unwrap(), d.hash(&wide).unwrap());
}

#[test]
fn test_hash_consistent_across_widths() {
    let arena = Bump::new();
    let d = dispatcher(&arena);
    let tags = d.tags();

    let pairs = [
        (Value::i8(tags, -5), Value::i64(tags, -5)),
        (Value::u16(tags, 300), Value::i32(tags, 300)),
        (Value::f32(tags, 0.25), Value::f64(tags, 0.25)),
        (Value::i16(tags, 4), Value::f64(tags, 4.0)),
    ];
    for (x, y) in pairs {
        assert!(d.equal(&x, &y).unwrap(), "{:?} == {:?}", x, y);
        assert_eq!(d.hash(&x).unwrap(), d.hash(&y).unwrap(), "{:?} / {:?}", x, y);
    }
}
