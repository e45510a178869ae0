use super::*;
use crate::{Error, TagManager, Value};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

#[test]
fn test_unify_identical() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let common = unifier.unify(tags.str(), tags.str()).unwrap();
    assert_eq!(common.tag, tags.str());
    assert!(common.is_embedding());
}

#[test]
fn test_unify_numeric_is_symmetric() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let numeric = [
        tags.i8(),
        tags.i16(),
        tags.i32(),
        tags.i64(),
        tags.u8(),
        tags.u16(),
        tags.u32(),
        tags.u64(),
        tags.f32(),
        tags.f64(),
    ];
    for a in numeric {
        for b in numeric {
            let ab = unifier.unify(a, b).unwrap();
            let ba = unifier.unify(b, a).unwrap();
            assert!(
                core::ptr::eq(ab.tag, ba.tag),
                "unify({}, {}) = {} but unify({}, {}) = {}",
                a,
                b,
                ab.tag,
                b,
                a,
                ba.tag
            );
            assert_eq!(ab.left_embeds, ba.right_embeds);
        }
    }
}

#[test]
fn test_unify_embedding_flags() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let common = unifier.unify(tags.i32(), tags.i64()).unwrap();
    assert_eq!(common.tag, tags.i64());
    assert!(common.is_embedding());

    // i32 + u32 promotes to u32, which cannot hold negative values.
    let common = unifier.unify(tags.i32(), tags.u32()).unwrap();
    assert_eq!(common.tag, tags.u32());
    assert!(!common.left_embeds);
    assert!(common.right_embeds);

    // i64 + f32 promotes to f32, which loses precision.
    let common = unifier.unify(tags.i64(), tags.f32()).unwrap();
    assert_eq!(common.tag, tags.f32());
    assert!(!common.left_embeds);
}

#[test]
fn test_unify_constants_recurse() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let a = tags.constant(tags.i16());
    let b = tags.constant(tags.i64());
    let common = unifier.unify(a, b).unwrap();
    assert_eq!(common.tag, tags.constant(tags.i64()));
    assert!(common.is_embedding());
}

#[test]
fn test_unify_constant_with_plain_fails() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let err = unifier
        .unify(tags.constant(tags.i32()), tags.i32())
        .unwrap_err();
    assert_eq!(
        err,
        Error::NoCommonType {
            left: "Constant[I32]".into(),
            right: "I32".into(),
        }
    );
}

#[test]
fn test_unify_unrelated_fails() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    assert!(unifier.unify(tags.str(), tags.i32()).is_err());
    assert!(unifier.unify(tags.tuple(), tags.optional()).is_err());
    assert!(unifier.unify(tags.bool(), tags.u8()).is_err());
}

#[test]
fn test_registered_common_type() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let mut unifier = Unifier::new(tags);

    let meters = tags.custom("Meters");
    let feet = tags.custom("Feet");
    let length = tags.custom("Length");
    unifier.register_common_type(meters, feet, length);
    unifier.register_conversion(
        meters,
        length,
        Conversion::new(true, |tags, v| {
            Ok(Value::custom(tags, "Length", v.as_custom()?.iter().cloned()))
        }),
    );

    let common = unifier.unify(feet, meters).unwrap();
    assert_eq!(common.tag, length);
    assert!(!common.left_embeds);
    assert!(common.right_embeds);
    assert_eq!(
        unifier.unify(meters, feet).unwrap().tag,
        unifier.unify(feet, meters).unwrap().tag
    );
}

#[test]
fn test_convert_numeric() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let v = unifier.convert(&Value::i8(tags, -3), tags.i64()).unwrap();
    assert_eq!(v, Value::i64(tags, -3));

    let v = unifier.convert(&Value::u16(tags, 7), tags.f64()).unwrap();
    assert_eq!(v, Value::f64(tags, 7.0));
}

#[test]
fn test_convert_constant_rewraps() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let c = Value::constant(tags, Value::i32(tags, 5));
    let v = unifier
        .convert(&c, tags.constant(tags.i64()))
        .unwrap();
    assert_eq!(v, Value::constant(tags, Value::i64(tags, 5)));
}

#[test]
fn test_convert_identity_and_missing() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let unifier = Unifier::new(tags);

    let s = Value::str(tags, "x");
    assert_eq!(unifier.convert(&s, tags.str()).unwrap(), s);
    assert_eq!(
        unifier.convert(&s, tags.i32()).unwrap_err(),
        Error::NoConversion {
            from: "Str".into(),
            to: "I32".into(),
        }
    );
}

#[test]
fn test_convert_registered() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let mut unifier = Unifier::new(tags);

    unifier.register_conversion(
        tags.bool(),
        tags.i32(),
        Conversion::new(true, |tags, v| Ok(Value::i32(tags, v.as_bool()? as i32))),
    );
    assert!(unifier.embeds(tags.bool(), tags.i32()));
    let v = unifier.convert(&Value::bool(tags, true), tags.i32()).unwrap();
    assert_eq!(v, Value::i32(tags, 1));
}

#[test]
fn test_convert_registered_wrong_tag() {
    let bump = Bump::new();
    let tags = TagManager::new(&bump);
    let mut unifier = Unifier::new(tags);

    unifier.register_conversion(
        tags.char(),
        tags.str(),
        Conversion::new(false, |tags, _| Ok(Value::i32(tags, 0))),
    );
    assert!(matches!(
        unifier.convert(&Value::char(tags, 'a'), tags.str()),
        Err(Error::TypeMismatch { .. })
    ));
}
