use crate::{
    errors::Error,
    tags::{Tag, TagManager},
    values::{Function, Map, Optional, Scalar, Set, Tuple},
};
use alloc::rc::Rc;
use core::fmt;
use ecow::EcoString;

/// A tagged, immutable value.
///
/// The tag is fixed at construction and always agrees with the payload.
/// Containers share their storage through reference counting, so cloning a
/// value is cheap and never copies elements.
#[derive(Clone)]
pub struct Value<'a> {
    pub tag: &'a Tag<'a>,
    repr: Repr<'a>,
}

#[derive(Clone, PartialEq)]
enum Repr<'a> {
    Scalar(Scalar),
    Str(EcoString),
    Function(Function<'a>),
    Pair(Rc<(Value<'a>, Value<'a>)>),
    Tuple(Tuple<'a>),
    Optional(Optional<'a>),
    Map(Map<'a>),
    Set(Set<'a>),
    Constant(Rc<Value<'a>>),
    Custom(Tuple<'a>),
}

/// Structural equality: same tag and same payload. Maps and sets compare
/// their backing sequences in order; the order-insensitive comparison is the
/// `equal` operation.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.repr == other.repr
    }
}

macro_rules! scalar_constructors {
    ($lt:lifetime; $($name:ident: $ty:ty => $variant:ident),* $(,)?) => {
        $(
            pub fn $name(tags: &$lt TagManager<$lt>, value: $ty) -> Self {
                Self::scalar(tags, Scalar::$variant(value))
            }
        )*
    };
}

impl<'a> Value<'a> {
    // ============================================================================
    // Construction
    // ============================================================================

    pub fn scalar(tags: &'a TagManager<'a>, value: Scalar) -> Self {
        Self {
            tag: value.tag(tags),
            repr: Repr::Scalar(value),
        }
    }

    scalar_constructors! {
        'a;
        bool: bool => Bool,
        char: char => Char,
        i8: i8 => I8,
        i16: i16 => I16,
        i32: i32 => I32,
        i64: i64 => I64,
        u8: u8 => U8,
        u16: u16 => U16,
        u32: u32 => U32,
        u64: u64 => U64,
        f32: f32 => F32,
        f64: f64 => F64,
    }

    pub fn str(tags: &'a TagManager<'a>, value: &str) -> Self {
        Self {
            tag: tags.str(),
            repr: Repr::Str(EcoString::from(value)),
        }
    }

    pub fn function(
        tags: &'a TagManager<'a>,
        func: impl Fn(&crate::Dispatcher<'a>, &[Value<'a>]) -> Result<Value<'a>, Error> + 'a,
    ) -> Self {
        Self::from_function(tags, Function::new(func))
    }

    pub fn from_function(tags: &'a TagManager<'a>, func: Function<'a>) -> Self {
        Self {
            tag: tags.function(),
            repr: Repr::Function(func),
        }
    }

    pub fn pair(tags: &'a TagManager<'a>, first: Value<'a>, second: Value<'a>) -> Self {
        Self {
            tag: tags.pair(),
            repr: Repr::Pair(Rc::new((first, second))),
        }
    }

    pub fn tuple(tags: &'a TagManager<'a>, elements: impl IntoIterator<Item = Value<'a>>) -> Self {
        Self::from_tuple(tags, Tuple::new(elements))
    }

    pub fn from_tuple(tags: &'a TagManager<'a>, tuple: Tuple<'a>) -> Self {
        Self {
            tag: tags.tuple(),
            repr: Repr::Tuple(tuple),
        }
    }

    pub fn just(tags: &'a TagManager<'a>, value: Value<'a>) -> Self {
        Self::from_optional(tags, Optional::just(value))
    }

    pub fn nothing(tags: &'a TagManager<'a>) -> Self {
        Self::from_optional(tags, Optional::nothing())
    }

    pub fn from_optional(tags: &'a TagManager<'a>, optional: Optional<'a>) -> Self {
        Self {
            tag: tags.optional(),
            repr: Repr::Optional(optional),
        }
    }

    pub fn from_map(tags: &'a TagManager<'a>, map: Map<'a>) -> Self {
        Self {
            tag: tags.map(),
            repr: Repr::Map(map),
        }
    }

    pub fn from_set(tags: &'a TagManager<'a>, set: Set<'a>) -> Self {
        Self {
            tag: tags.set(),
            repr: Repr::Set(set),
        }
    }

    /// Wrap a value in a constant-like wrapper tagged `Constant[inner]`.
    pub fn constant(tags: &'a TagManager<'a>, value: Value<'a>) -> Self {
        Self {
            tag: tags.constant(value.tag),
            repr: Repr::Constant(Rc::new(value)),
        }
    }

    /// A value of a user-defined tag, carrying its fields as a tuple.
    pub fn custom(
        tags: &'a TagManager<'a>,
        name: &str,
        fields: impl IntoIterator<Item = Value<'a>>,
    ) -> Self {
        Self {
            tag: tags.custom(name),
            repr: Repr::Custom(Tuple::new(fields)),
        }
    }

    // ============================================================================
    // Extraction
    // ============================================================================

    pub fn as_scalar(&self) -> Result<Scalar, Error> {
        match &self.repr {
            Repr::Scalar(s) => Ok(*s),
            _ => Err(Error::mismatch("a scalar", self.tag)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        match &self.repr {
            Repr::Scalar(Scalar::Bool(b)) => Ok(*b),
            _ => Err(Error::mismatch("Bool", self.tag)),
        }
    }

    /// Any integral scalar, widened.
    pub fn as_integer(&self) -> Result<i128, Error> {
        match &self.repr {
            Repr::Scalar(s) => s
                .as_i128()
                .ok_or_else(|| Error::mismatch("an integer", self.tag)),
            _ => Err(Error::mismatch("an integer", self.tag)),
        }
    }

    /// Any numeric scalar, widened to `f64`.
    pub fn as_f64(&self) -> Result<f64, Error> {
        match &self.repr {
            Repr::Scalar(s) => s
                .as_f64()
                .ok_or_else(|| Error::mismatch("a number", self.tag)),
            _ => Err(Error::mismatch("a number", self.tag)),
        }
    }

    /// A non-negative integer usable as a position.
    pub fn as_index(&self) -> Result<usize, Error> {
        let n = self.as_integer()?;
        usize::try_from(n).map_err(|_| Error::mismatch("a non-negative index", self))
    }

    pub fn as_str(&self) -> Result<&str, Error> {
        match &self.repr {
            Repr::Str(s) => Ok(s.as_str()),
            _ => Err(Error::mismatch("Str", self.tag)),
        }
    }

    pub fn as_function(&self) -> Result<&Function<'a>, Error> {
        match &self.repr {
            Repr::Function(func) => Ok(func),
            _ => Err(Error::mismatch("Function", self.tag)),
        }
    }

    pub fn as_pair(&self) -> Result<(&Value<'a>, &Value<'a>), Error> {
        match &self.repr {
            Repr::Pair(pair) => Ok((&pair.0, &pair.1)),
            _ => Err(Error::mismatch("Pair", self.tag)),
        }
    }

    pub fn as_tuple(&self) -> Result<&Tuple<'a>, Error> {
        match &self.repr {
            Repr::Tuple(tuple) => Ok(tuple),
            _ => Err(Error::mismatch("Tuple", self.tag)),
        }
    }

    pub fn as_optional(&self) -> Result<&Optional<'a>, Error> {
        match &self.repr {
            Repr::Optional(optional) => Ok(optional),
            _ => Err(Error::mismatch("Optional", self.tag)),
        }
    }

    pub fn as_map(&self) -> Result<&Map<'a>, Error> {
        match &self.repr {
            Repr::Map(map) => Ok(map),
            _ => Err(Error::mismatch("Map", self.tag)),
        }
    }

    pub fn as_set(&self) -> Result<&Set<'a>, Error> {
        match &self.repr {
            Repr::Set(set) => Ok(set),
            _ => Err(Error::mismatch("Set", self.tag)),
        }
    }

    /// The wrapped value of a constant.
    pub fn as_constant(&self) -> Result<&Value<'a>, Error> {
        match &self.repr {
            Repr::Constant(inner) => Ok(inner),
            _ => Err(Error::mismatch("a constant", self.tag)),
        }
    }

    /// The fields of a custom-tagged value.
    pub fn as_custom(&self) -> Result<&Tuple<'a>, Error> {
        match &self.repr {
            Repr::Custom(fields) => Ok(fields),
            _ => Err(Error::mismatch("a custom value", self.tag)),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self, self.tag)
    }
}

fn write_list<'v, 'a: 'v>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'v Value<'a>>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Scalar(s) => write!(f, "{}", s),
            Repr::Str(s) => write!(f, "\"{}\"", s.escape_debug()),
            Repr::Function(_) => write!(f, "<function>"),
            Repr::Pair(pair) => write!(f, "pair({}, {})", pair.0, pair.1),
            Repr::Tuple(tuple) => {
                write!(f, "(")?;
                write_list(f, tuple.iter())?;
                write!(f, ")")
            }
            Repr::Optional(optional) => match optional.value() {
                Some(v) => write!(f, "just({})", v),
                None => write!(f, "nothing"),
            },
            Repr::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Repr::Set(set) => {
                write!(f, "set{{")?;
                write_list(f, set.elements().iter())?;
                write!(f, "}}")
            }
            Repr::Constant(inner) => write!(f, "constant({})", inner),
            Repr::Custom(fields) => {
                write!(f, "{}(", self.tag)?;
                write_list(f, fields.iter())?;
                write!(f, ")")
            }
        }
    }
}
