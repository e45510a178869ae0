use super::{NumericKind, Tag, TagManager};
use alloc::string::ToString;
use bumpalo::Bump;

#[test]
fn test_interning() {
    let bump = Bump::new();
    let manager = TagManager::new(&bump);

    let i32_tag = manager.i32();
    let f64_tag = manager.f64();

    assert!(core::ptr::eq(i32_tag, manager.i32()));
    assert!(core::ptr::eq(f64_tag, manager.f64()));
    assert!(!core::ptr::eq(i32_tag, manager.i64()));
}

#[test]
fn test_interning_containers() {
    let bump = Bump::new();
    let manager = TagManager::new(&bump);

    assert!(core::ptr::eq(manager.tuple(), manager.tuple()));
    assert!(core::ptr::eq(manager.optional(), manager.optional()));
    assert!(core::ptr::eq(manager.map(), manager.map()));
    assert!(!core::ptr::eq(manager.map(), manager.set()));
}

#[test]
fn test_interning_constant() {
    let bump = Bump::new();
    let manager = TagManager::new(&bump);

    let c1 = manager.constant(manager.i32());
    let c2 = manager.constant(manager.i32());
    assert!(core::ptr::eq(c1, c2));

    let c3 = manager.constant(manager.i64());
    assert!(!core::ptr::eq(c1, c3));

    // Nested constants intern structurally too
    let nested = manager.constant(c1);
    assert!(core::ptr::eq(nested, manager.constant(manager.constant(manager.i32()))));
    assert_eq!(nested.value_type(), Some(c1));
}

#[test]
fn test_interning_custom() {
    let bump = Bump::new();
    let manager = TagManager::new(&bump);

    let name = "Celsius".to_string();
    let celsius = manager.custom(&name);
    drop(name);

    assert!(core::ptr::eq(celsius, manager.custom("Celsius")));
    assert!(!core::ptr::eq(celsius, manager.custom("Kelvin")));
    assert_eq!(celsius.to_string(), "Celsius");
}

#[test]
fn test_numeric_classification() {
    assert_eq!(Tag::I16.numeric(), Some((NumericKind::Signed, 16)));
    assert_eq!(Tag::U64.numeric(), Some((NumericKind::Unsigned, 64)));
    assert_eq!(Tag::F32.numeric(), Some((NumericKind::Float, 32)));
    assert_eq!(Tag::Bool.numeric(), None);

    assert!(Tag::U8.is_integral());
    assert!(!Tag::F64.is_integral());
    assert!(Tag::F64.is_float());
    assert!(Tag::Char.is_scalar());
    assert!(!Tag::Str.is_scalar());
}

#[test]
fn test_display() {
    let bump = Bump::new();
    let manager = TagManager::new(&bump);

    assert_eq!(manager.i32().to_string(), "I32");
    assert_eq!(manager.tuple().to_string(), "Tuple");
    assert_eq!(
        manager.constant(manager.constant(manager.u8())).to_string(),
        "Constant[Constant[U8]]"
    );
}
