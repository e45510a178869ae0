use crate::{
    errors::Error,
    format,
    tags::{Tag, TagManager},
    unification::{Conversion, Conversions, promotion},
    values::Value,
};
use hashbrown::HashMap;

/// The result of unifying two tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Common<'a> {
    pub tag: &'a Tag<'a>,
    /// Whether the left tag converts into `tag` without loss.
    pub left_embeds: bool,
    /// Whether the right tag converts into `tag` without loss.
    pub right_embeds: bool,
}

impl Common<'_> {
    /// Both sides embed, so comparing through the common tag is exact.
    pub fn is_embedding(&self) -> bool {
        self.left_embeds && self.right_embeds
    }
}

/// Finds common tags and converts values into them.
///
/// Unification tries, in order:
/// 1. identical tags;
/// 2. the arithmetic promotion table;
/// 3. for two constant wrappers, the common tag of the wrapped tags, re-wrapped;
/// 4. the table of common types registered by the user.
///
/// The result is symmetric: `unify(a, b)` and `unify(b, a)` name the same tag.
///
/// # Example
///
/// ```ignore
/// let bump = Bump::new();
/// let tags = TagManager::new(&bump);
/// let unifier = Unifier::new(tags);
///
/// let common = unifier.unify(tags.i32(), tags.i64())?;
/// assert_eq!(common.tag, tags.i64());
/// assert!(common.is_embedding());
/// ```
#[derive(Clone)]
pub struct Unifier<'a> {
    tags: &'a TagManager<'a>,
    common_types: HashMap<(&'a Tag<'a>, &'a Tag<'a>), &'a Tag<'a>>,
    conversions: Conversions<'a>,
}

impl<'a> Unifier<'a> {
    pub fn new(tags: &'a TagManager<'a>) -> Self {
        Self {
            tags,
            common_types: HashMap::new(),
            conversions: Conversions::default(),
        }
    }

    pub fn tags(&self) -> &'a TagManager<'a> {
        self.tags
    }

    /// Declares `common` as the common tag of `a` and `b`, in both orders.
    pub fn register_common_type(&mut self, a: &'a Tag<'a>, b: &'a Tag<'a>, common: &'a Tag<'a>) {
        self.common_types.insert((a, b), common);
        self.common_types.insert((b, a), common);
    }

    pub fn register_conversion(
        &mut self,
        from: &'a Tag<'a>,
        to: &'a Tag<'a>,
        conversion: Conversion<'a>,
    ) {
        self.conversions.insert(from, to, conversion);
    }

    /// The common tag of `a` and `b`, if any.
    pub fn common_tag(&self, a: &'a Tag<'a>, b: &'a Tag<'a>) -> Option<&'a Tag<'a>> {
        if a == b {
            return Some(a);
        }
        if let Some(promoted) = promotion::promote(self.tags, a, b) {
            return Some(promoted);
        }
        if let (Tag::Constant(x), Tag::Constant(y)) = (a, b) {
            if let Some(inner) = self.common_tag(x, y) {
                return Some(self.tags.constant(inner));
            }
        }
        self.common_types.get(&(a, b)).copied()
    }

    pub fn unify(&self, a: &'a Tag<'a>, b: &'a Tag<'a>) -> Result<Common<'a>, Error> {
        match self.common_tag(a, b) {
            Some(tag) => Ok(Common {
                tag,
                left_embeds: self.embeds(a, tag),
                right_embeds: self.embeds(b, tag),
            }),
            None => {
                tracing::debug!(left = %a, right = %b, "no common type");
                Err(Error::NoCommonType {
                    left: format!("{}", a),
                    right: format!("{}", b),
                })
            }
        }
    }

    /// True when every value of `from` converts to `to` without loss.
    pub fn embeds(&self, from: &'a Tag<'a>, to: &'a Tag<'a>) -> bool {
        if from == to || promotion::widens(from, to) {
            return true;
        }
        if let (Tag::Constant(x), Tag::Constant(y)) = (from, to) {
            return self.embeds(x, y);
        }
        self.conversions
            .get(from, to)
            .is_some_and(|conversion| conversion.embedding)
    }

    /// True when [`convert`](Self::convert) has a route from `from` to `to`,
    /// lossy or not.
    pub fn converts(&self, from: &'a Tag<'a>, to: &'a Tag<'a>) -> bool {
        if from == to || (from.is_arithmetic() && to.is_arithmetic()) {
            return true;
        }
        if let (Tag::Constant(x), Tag::Constant(y)) = (from, to) {
            return self.converts(x, y);
        }
        self.conversions.get(from, to).is_some()
    }

    /// Converts `value` to a value tagged `to`.
    ///
    /// Numeric conversions use `as` semantics, so they truncate when the
    /// direction is not an embedding. Constant wrappers convert their wrapped
    /// value and re-wrap it.
    pub fn convert(&self, value: &Value<'a>, to: &'a Tag<'a>) -> Result<Value<'a>, Error> {
        let from = value.tag;
        if from == to {
            return Ok(value.clone());
        }
        if from.is_arithmetic() && to.is_arithmetic() {
            if let Some(scalar) = value.as_scalar()?.cast(to) {
                return Ok(Value::scalar(self.tags, scalar));
            }
        }
        if let (Tag::Constant(_), Tag::Constant(inner)) = (from, to) {
            let converted = self.convert(value.as_constant()?, inner)?;
            return Ok(Value::constant(self.tags, converted));
        }
        match self.conversions.get(from, to) {
            Some(conversion) => {
                let converted = conversion.apply(self.tags, value)?;
                if converted.tag != to {
                    return Err(Error::mismatch(format!("{}", to), converted.tag));
                }
                Ok(converted)
            }
            None => Err(Error::NoConversion {
                from: format!("{}", from),
                to: format!("{}", to),
            }),
        }
    }
}
