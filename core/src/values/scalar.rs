//! Inline scalar payloads: booleans, characters and every numeric width.

use crate::tags::{Tag, TagManager};
use core::fmt;
use core::hash::{Hash, Hasher};

/// A scalar payload. The variant always agrees with the value's tag.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Scalar {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

static_assertions::assert_eq_size!(Scalar, [u64; 2]);

/// Applies an integer method and a float operator to two scalars of the same
/// numeric variant. Evaluates to `None` on a variant mismatch.
macro_rules! numeric_binop {
    ($a:expr, $b:expr, $int:ident, $float:tt) => {
        match ($a, $b) {
            (Scalar::I8(x), Scalar::I8(y)) => Some(Scalar::I8(x.$int(y))),
            (Scalar::I16(x), Scalar::I16(y)) => Some(Scalar::I16(x.$int(y))),
            (Scalar::I32(x), Scalar::I32(y)) => Some(Scalar::I32(x.$int(y))),
            (Scalar::I64(x), Scalar::I64(y)) => Some(Scalar::I64(x.$int(y))),
            (Scalar::U8(x), Scalar::U8(y)) => Some(Scalar::U8(x.$int(y))),
            (Scalar::U16(x), Scalar::U16(y)) => Some(Scalar::U16(x.$int(y))),
            (Scalar::U32(x), Scalar::U32(y)) => Some(Scalar::U32(x.$int(y))),
            (Scalar::U64(x), Scalar::U64(y)) => Some(Scalar::U64(x.$int(y))),
            (Scalar::F32(x), Scalar::F32(y)) => Some(Scalar::F32(x $float y)),
            (Scalar::F64(x), Scalar::F64(y)) => Some(Scalar::F64(x $float y)),
            _ => None,
        }
    };
}

/// Same as `numeric_binop` but integers only.
macro_rules! integral_binop {
    ($a:expr, $b:expr, $int:ident) => {
        match ($a, $b) {
            (Scalar::I8(x), Scalar::I8(y)) => Some(Scalar::I8(x.$int(y))),
            (Scalar::I16(x), Scalar::I16(y)) => Some(Scalar::I16(x.$int(y))),
            (Scalar::I32(x), Scalar::I32(y)) => Some(Scalar::I32(x.$int(y))),
            (Scalar::I64(x), Scalar::I64(y)) => Some(Scalar::I64(x.$int(y))),
            (Scalar::U8(x), Scalar::U8(y)) => Some(Scalar::U8(x.$int(y))),
            (Scalar::U16(x), Scalar::U16(y)) => Some(Scalar::U16(x.$int(y))),
            (Scalar::U32(x), Scalar::U32(y)) => Some(Scalar::U32(x.$int(y))),
            (Scalar::U64(x), Scalar::U64(y)) => Some(Scalar::U64(x.$int(y))),
            _ => None,
        }
    };
}

/// Casts a primitive to the scalar variant named by an arithmetic tag.
macro_rules! cast_to {
    ($v:expr, $to:expr) => {
        match $to {
            Tag::I8 => Some(Scalar::I8($v as i8)),
            Tag::I16 => Some(Scalar::I16($v as i16)),
            Tag::I32 => Some(Scalar::I32($v as i32)),
            Tag::I64 => Some(Scalar::I64($v as i64)),
            Tag::U8 => Some(Scalar::U8($v as u8)),
            Tag::U16 => Some(Scalar::U16($v as u16)),
            Tag::U32 => Some(Scalar::U32($v as u32)),
            Tag::U64 => Some(Scalar::U64($v as u64)),
            Tag::F32 => Some(Scalar::F32($v as f32)),
            Tag::F64 => Some(Scalar::F64($v as f64)),
            _ => None,
        }
    };
}

impl Scalar {
    pub fn tag<'a>(self, tags: &'a TagManager<'a>) -> &'a Tag<'a> {
        match self {
            Scalar::Bool(_) => tags.bool(),
            Scalar::Char(_) => tags.char(),
            Scalar::I8(_) => tags.i8(),
            Scalar::I16(_) => tags.i16(),
            Scalar::I32(_) => tags.i32(),
            Scalar::I64(_) => tags.i64(),
            Scalar::U8(_) => tags.u8(),
            Scalar::U16(_) => tags.u16(),
            Scalar::U32(_) => tags.u32(),
            Scalar::U64(_) => tags.u64(),
            Scalar::F32(_) => tags.f32(),
            Scalar::F64(_) => tags.f64(),
        }
    }

    /// The additive identity of an arithmetic tag.
    pub fn zero(tag: &Tag<'_>) -> Option<Scalar> {
        cast_to!(0u8, tag)
    }

    /// The multiplicative identity of an arithmetic tag.
    pub fn one(tag: &Tag<'_>) -> Option<Scalar> {
        cast_to!(1u8, tag)
    }

    /// Numeric conversion with `as` semantics. `Bool` and `Char` only convert
    /// to themselves.
    pub fn cast(self, to: &Tag<'_>) -> Option<Scalar> {
        match self {
            Scalar::Bool(_) => matches!(to, Tag::Bool).then_some(self),
            Scalar::Char(_) => matches!(to, Tag::Char).then_some(self),
            Scalar::I8(v) => cast_to!(v, to),
            Scalar::I16(v) => cast_to!(v, to),
            Scalar::I32(v) => cast_to!(v, to),
            Scalar::I64(v) => cast_to!(v, to),
            Scalar::U8(v) => cast_to!(v, to),
            Scalar::U16(v) => cast_to!(v, to),
            Scalar::U32(v) => cast_to!(v, to),
            Scalar::U64(v) => cast_to!(v, to),
            Scalar::F32(v) => cast_to!(v, to),
            Scalar::F64(v) => cast_to!(v, to),
        }
    }

    /// Integer payload widened to `i128`, `None` for non-integers.
    pub fn as_i128(self) -> Option<i128> {
        match self {
            Scalar::I8(v) => Some(v as i128),
            Scalar::I16(v) => Some(v as i128),
            Scalar::I32(v) => Some(v as i128),
            Scalar::I64(v) => Some(v as i128),
            Scalar::U8(v) => Some(v as i128),
            Scalar::U16(v) => Some(v as i128),
            Scalar::U32(v) => Some(v as i128),
            Scalar::U64(v) => Some(v as i128),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64`, `None` for `Bool` and `Char`.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Scalar::F32(v) => Some(v as f64),
            Scalar::F64(v) => Some(v),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Scalar::F32(v) => v == 0.0,
            Scalar::F64(v) => v == 0.0,
            other => other.as_i128() == Some(0),
        }
    }

    pub fn plus(self, other: Scalar) -> Option<Scalar> {
        numeric_binop!(self, other, wrapping_add, +)
    }

    pub fn minus(self, other: Scalar) -> Option<Scalar> {
        numeric_binop!(self, other, wrapping_sub, -)
    }

    pub fn times(self, other: Scalar) -> Option<Scalar> {
        numeric_binop!(self, other, wrapping_mul, *)
    }

    /// Integer quotient. The caller checks for a zero divisor.
    pub fn quotient(self, other: Scalar) -> Option<Scalar> {
        integral_binop!(self, other, wrapping_div)
    }

    /// Integer remainder. The caller checks for a zero divisor.
    pub fn remainder(self, other: Scalar) -> Option<Scalar> {
        integral_binop!(self, other, wrapping_rem)
    }

    pub fn negate(self) -> Option<Scalar> {
        match self {
            Scalar::I8(v) => Some(Scalar::I8(v.wrapping_neg())),
            Scalar::I16(v) => Some(Scalar::I16(v.wrapping_neg())),
            Scalar::I32(v) => Some(Scalar::I32(v.wrapping_neg())),
            Scalar::I64(v) => Some(Scalar::I64(v.wrapping_neg())),
            Scalar::U8(v) => Some(Scalar::U8(v.wrapping_neg())),
            Scalar::U16(v) => Some(Scalar::U16(v.wrapping_neg())),
            Scalar::U32(v) => Some(Scalar::U32(v.wrapping_neg())),
            Scalar::U64(v) => Some(Scalar::U64(v.wrapping_neg())),
            Scalar::F32(v) => Some(Scalar::F32(-v)),
            Scalar::F64(v) => Some(Scalar::F64(-v)),
            Scalar::Bool(_) | Scalar::Char(_) => None,
        }
    }

    /// Feeds a width-independent key into `state`.
    ///
    /// Integers hash by value and floats by the bits of their `f64` widening,
    /// except that integral floats hash as integers. Scalars that compare
    /// equal through a promotion land in the same hash bucket.
    pub fn hash_normalized<H: Hasher>(self, state: &mut H) {
        match self {
            Scalar::Bool(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Scalar::Char(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            Scalar::F32(_) | Scalar::F64(_) => {
                let v = self.as_f64().unwrap_or_default();
                // Integral floats (including -0.0) hash like the integer
                // they equal.
                let whole = v as i128;
                if v.is_finite() && whole as f64 == v {
                    3u8.hash(state);
                    whole.hash(state);
                } else {
                    2u8.hash(state);
                    v.to_bits().hash(state);
                }
            }
            integer => {
                3u8.hash(state);
                integer.as_i128().unwrap_or_default().hash(state);
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Char(v) => write!(f, "{:?}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::F32(v) => format_float(f, *v as f64),
            Scalar::F64(v) => format_float(f, *v),
        }
    }
}

/// Format a float ensuring it always has a decimal point.
fn format_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(f, "nan")
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            write!(f, "inf")
        } else {
            write!(f, "-inf")
        }
    } else {
        let s = crate::format!("{}", value);
        if s.contains('.') || s.contains('e') || s.contains('E') {
            write!(f, "{}", s)
        } else {
            write!(f, "{}.", s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use hashbrown::DefaultHashBuilder;
    use core::hash::BuildHasher;

    fn hash_of(builder: &DefaultHashBuilder, s: Scalar) -> u64 {
        let mut hasher = builder.build_hasher();
        s.hash_normalized(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_tag() {
        let bump = Bump::new();
        let tags = TagManager::new(&bump);
        assert!(core::ptr::eq(Scalar::I32(1).tag(tags), tags.i32()));
        assert!(core::ptr::eq(Scalar::Char('x').tag(tags), tags.char()));
    }

    #[test]
    fn test_arithmetic_same_variant() {
        assert_eq!(Scalar::I32(2).plus(Scalar::I32(3)), Some(Scalar::I32(5)));
        assert_eq!(Scalar::F64(1.5).times(Scalar::F64(2.0)), Some(Scalar::F64(3.0)));
        assert_eq!(Scalar::U8(250).plus(Scalar::U8(10)), Some(Scalar::U8(4)));
        assert_eq!(Scalar::I64(7).quotient(Scalar::I64(2)), Some(Scalar::I64(3)));
        assert_eq!(Scalar::I64(7).remainder(Scalar::I64(2)), Some(Scalar::I64(1)));
        assert_eq!(Scalar::I8(i8::MIN).negate(), Some(Scalar::I8(i8::MIN)));
    }

    #[test]
    fn test_arithmetic_variant_mismatch() {
        assert_eq!(Scalar::I32(2).plus(Scalar::I64(3)), None);
        assert_eq!(Scalar::F32(1.0).quotient(Scalar::F32(2.0)), None);
        assert_eq!(Scalar::Bool(true).negate(), None);
    }

    #[test]
    fn test_cast() {
        assert_eq!(Scalar::I32(300).cast(&Tag::I64), Some(Scalar::I64(300)));
        assert_eq!(Scalar::I32(300).cast(&Tag::U8), Some(Scalar::U8(44)));
        assert_eq!(Scalar::U16(7).cast(&Tag::F32), Some(Scalar::F32(7.0)));
        assert_eq!(Scalar::Bool(true).cast(&Tag::Bool), Some(Scalar::Bool(true)));
        assert_eq!(Scalar::Bool(true).cast(&Tag::I32), None);
        assert_eq!(Scalar::I32(1).cast(&Tag::Str), None);
    }

    #[test]
    fn test_identities() {
        assert_eq!(Scalar::zero(&Tag::U16), Some(Scalar::U16(0)));
        assert_eq!(Scalar::one(&Tag::F32), Some(Scalar::F32(1.0)));
        assert_eq!(Scalar::zero(&Tag::Char), None);
    }

    #[test]
    fn test_hash_is_width_independent() {
        let builder = DefaultHashBuilder::default();
        assert_eq!(
            hash_of(&builder, Scalar::I8(5)),
            hash_of(&builder, Scalar::I64(5))
        );
        assert_eq!(
            hash_of(&builder, Scalar::U32(5)),
            hash_of(&builder, Scalar::I16(5))
        );
        assert_eq!(
            hash_of(&builder, Scalar::F32(0.5)),
            hash_of(&builder, Scalar::F64(0.5))
        );
        assert_eq!(
            hash_of(&builder, Scalar::F64(-0.0)),
            hash_of(&builder, Scalar::F64(0.0))
        );
        assert_eq!(
            hash_of(&builder, Scalar::F64(4.0)),
            hash_of(&builder, Scalar::U8(4))
        );
        assert_ne!(
            hash_of(&builder, Scalar::F64(4.5)),
            hash_of(&builder, Scalar::I64(4))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(crate::format!("{}", Scalar::F64(2.0)), "2.");
        assert_eq!(crate::format!("{}", Scalar::F32(0.5)), "0.5");
        assert_eq!(crate::format!("{}", Scalar::Char('a')), "'a'");
        assert_eq!(crate::format!("{}", Scalar::U8(9)), "9");
    }
}
