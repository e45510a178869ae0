use core::fmt::Display;

/// Type-identity marker used as the dispatch key.
///
/// Tags describe the *shape* of a value, not its contents: every tuple has the
/// `Tuple` tag regardless of its elements. The only parameterized tag is
/// `Constant`, which wraps the tag of the value it holds, so that unification
/// can recurse into the wrapped tags.
///
/// Tags are interned by [`TagManager`](super::TagManager); two tags built by
/// the same manager are equal iff they are the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag<'a> {
    // Scalars.
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,

    // Callables.
    Function,

    // Containers.
    Pair,
    Tuple,
    Optional,
    Map,
    Set,

    // Constant-like wrapper around a value of the inner tag.
    Constant(&'a Tag<'a>),

    // User-defined tag, identified by name.
    Custom(&'a str),
}

/// Numeric family of an arithmetic tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Signed,
    Unsigned,
    Float,
}

impl<'a> Tag<'a> {
    /// Numeric family and bit width, or `None` for non-arithmetic tags.
    pub fn numeric(&self) -> Option<(NumericKind, u32)> {
        use NumericKind::*;
        match self {
            Tag::I8 => Some((Signed, 8)),
            Tag::I16 => Some((Signed, 16)),
            Tag::I32 => Some((Signed, 32)),
            Tag::I64 => Some((Signed, 64)),
            Tag::U8 => Some((Unsigned, 8)),
            Tag::U16 => Some((Unsigned, 16)),
            Tag::U32 => Some((Unsigned, 32)),
            Tag::U64 => Some((Unsigned, 64)),
            Tag::F32 => Some((Float, 32)),
            Tag::F64 => Some((Float, 64)),
            _ => None,
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        self.numeric().is_some()
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self.numeric(),
            Some((NumericKind::Signed | NumericKind::Unsigned, _))
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self.numeric(), Some((NumericKind::Float, _)))
    }

    /// Scalars are the tags whose values are stored inline as a `Scalar`.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Tag::Bool | Tag::Char) || self.is_arithmetic()
    }

    /// The wrapped tag of a constant-like wrapper.
    pub fn value_type(&self) -> Option<&'a Tag<'a>> {
        match self {
            Tag::Constant(inner) => Some(*inner),
            _ => None,
        }
    }
}

impl Display for Tag<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Tag::Bool => write!(f, "Bool"),
            Tag::Char => write!(f, "Char"),
            Tag::I8 => write!(f, "I8"),
            Tag::I16 => write!(f, "I16"),
            Tag::I32 => write!(f, "I32"),
            Tag::I64 => write!(f, "I64"),
            Tag::U8 => write!(f, "U8"),
            Tag::U16 => write!(f, "U16"),
            Tag::U32 => write!(f, "U32"),
            Tag::U64 => write!(f, "U64"),
            Tag::F32 => write!(f, "F32"),
            Tag::F64 => write!(f, "F64"),
            Tag::Str => write!(f, "Str"),
            Tag::Function => write!(f, "Function"),
            Tag::Pair => write!(f, "Pair"),
            Tag::Tuple => write!(f, "Tuple"),
            Tag::Optional => write!(f, "Optional"),
            Tag::Map => write!(f, "Map"),
            Tag::Set => write!(f, "Set"),
            Tag::Constant(inner) => write!(f, "Constant[{}]", inner),
            Tag::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Render a list of tags as `A, B` for error messages.
pub(crate) fn display_tags(tags: &[&Tag<'_>]) -> crate::String {
    let parts: crate::Vec<crate::String> = tags.iter().map(|t| crate::format!("{}", t)).collect();
    parts.join(", ")
}
