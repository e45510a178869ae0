//! Built-in arithmetic promotion table.
//!
//! Follows the usual arithmetic conversions: the wider operand wins within a
//! family, an unsigned operand absorbs a signed one of equal or smaller width,
//! and any float absorbs any integer. This is the only unification step that
//! may be lossy; [`widens`] reports the value-preserving directions.

use crate::tags::{NumericKind, Tag, TagManager};

/// The promoted tag for two arithmetic tags, `None` if either is not
/// arithmetic.
pub fn promote<'a>(
    tags: &'a TagManager<'a>,
    a: &'a Tag<'a>,
    b: &'a Tag<'a>,
) -> Option<&'a Tag<'a>> {
    use NumericKind::*;

    let (ka, wa) = a.numeric()?;
    let (kb, wb) = b.numeric()?;
    let (kind, bits) = match (ka, kb) {
        _ if ka == kb => (ka, wa.max(wb)),
        (Float, _) => (Float, wa),
        (_, Float) => (Float, wb),
        (Signed, Unsigned) if wa > wb => (Signed, wa),
        (Unsigned, Signed) if wb > wa => (Signed, wb),
        _ => (Unsigned, wa.max(wb)),
    };
    tags.numeric(kind, bits)
}

/// True when every value of `from` is represented exactly by `to`.
pub fn widens(from: &Tag<'_>, to: &Tag<'_>) -> bool {
    use NumericKind::*;

    let (Some((kf, wf)), Some((kt, wt))) = (from.numeric(), to.numeric()) else {
        return false;
    };
    match (kf, kt) {
        (Signed, Signed) | (Unsigned, Unsigned) | (Float, Float) => wt >= wf,
        (Unsigned, Signed) => wt > wf,
        // f32 carries a 24-bit significand, f64 a 53-bit one.
        (Signed | Unsigned, Float) => (wt == 32 && wf <= 16) || (wt == 64 && wf <= 32),
        (Signed, Unsigned) | (Float, Signed | Unsigned) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn test_promote_same_family() {
        let bump = Bump::new();
        let tags = TagManager::new(&bump);
        assert_eq!(promote(tags, tags.i8(), tags.i32()), Some(tags.i32()));
        assert_eq!(promote(tags, tags.u64(), tags.u16()), Some(tags.u64()));
        assert_eq!(promote(tags, tags.f32(), tags.f64()), Some(tags.f64()));
    }

    #[test]
    fn test_promote_mixed_signedness() {
        let bump = Bump::new();
        let tags = TagManager::new(&bump);
        assert_eq!(promote(tags, tags.i64(), tags.u32()), Some(tags.i64()));
        assert_eq!(promote(tags, tags.u32(), tags.i64()), Some(tags.i64()));
        assert_eq!(promote(tags, tags.i32(), tags.u32()), Some(tags.u32()));
        assert_eq!(promote(tags, tags.i32(), tags.u64()), Some(tags.u64()));
    }

    #[test]
    fn test_promote_integer_float() {
        let bump = Bump::new();
        let tags = TagManager::new(&bump);
        assert_eq!(promote(tags, tags.i64(), tags.f32()), Some(tags.f32()));
        assert_eq!(promote(tags, tags.f64(), tags.u8()), Some(tags.f64()));
    }

    #[test]
    fn test_promote_non_arithmetic() {
        let bump = Bump::new();
        let tags = TagManager::new(&bump);
        assert_eq!(promote(tags, tags.bool(), tags.i32()), None);
        assert_eq!(promote(tags, tags.str(), tags.str()), None);
    }

    #[test]
    fn test_widens() {
        assert!(widens(&Tag::I8, &Tag::I64));
        assert!(widens(&Tag::U8, &Tag::U8));
        assert!(widens(&Tag::U32, &Tag::I64));
        assert!(!widens(&Tag::U32, &Tag::I32));
        assert!(!widens(&Tag::I32, &Tag::U64));
        assert!(!widens(&Tag::I64, &Tag::I32));
        assert!(widens(&Tag::I16, &Tag::F32));
        assert!(!widens(&Tag::I32, &Tag::F32));
        assert!(widens(&Tag::U32, &Tag::F64));
        assert!(!widens(&Tag::I64, &Tag::F64));
        assert!(widens(&Tag::F32, &Tag::F64));
        assert!(!widens(&Tag::F64, &Tag::F32));
        assert!(!widens(&Tag::F32, &Tag::I64));
        assert!(!widens(&Tag::Bool, &Tag::I8));
    }
}
