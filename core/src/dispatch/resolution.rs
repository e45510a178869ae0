//! What an operation resolves to for a given tuple of tags.

use crate::{
    String,
    dispatch::{Dispatcher, Operation},
    errors::Error,
    format,
    tags::{Tag, display_tags},
    unification::Common,
    values::Value,
};
use alloc::rc::Rc;
use core::fmt;

/// Signature of a tag-specific implementation.
///
/// The tag argument is the tag the implementation was selected for: the
/// first argument's tag, or the explicit tag of `zero`, `one` and `lift`.
pub type OpFn<'a> =
    dyn Fn(&Dispatcher<'a>, &'a Tag<'a>, &[Value<'a>]) -> Result<Value<'a>, Error> + 'a;

/// Signature of a default rule's body.
pub type RuleFn =
    for<'a> fn(&Dispatcher<'a>, &'a Tag<'a>, &[Value<'a>]) -> Result<Value<'a>, Error>;

/// Decides whether a default rule applies to the dispatch tags. Guards only
/// resolve; they never invoke operations.
pub type Guard = for<'a> fn(&Dispatcher<'a>, &[&'a Tag<'a>]) -> bool;

/// A user- or builtin-supplied implementation for an exact tuple of tags.
#[derive(Clone)]
pub struct Implementation<'a> {
    func: Rc<OpFn<'a>>,
}

impl<'a> Implementation<'a> {
    pub fn new(
        func: impl Fn(&Dispatcher<'a>, &'a Tag<'a>, &[Value<'a>]) -> Result<Value<'a>, Error> + 'a,
    ) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    pub fn call(
        &self,
        d: &Dispatcher<'a>,
        tag: &'a Tag<'a>,
        args: &[Value<'a>],
    ) -> Result<Value<'a>, Error> {
        (self.func)(d, tag, args)
    }
}

impl fmt::Debug for Implementation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Implementation@{:p}", Rc::as_ptr(&self.func) as *const ())
    }
}

/// A generic implementation of an operation in terms of other operations,
/// applicable whenever its guard holds.
pub struct DefaultRule {
    pub op: Operation,
    pub name: &'static str,
    pub guard: Guard,
    pub imp: RuleFn,
}

impl fmt::Debug for DefaultRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultRule")
            .field("op", &self.op)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Why an operation is unsupported for a tuple of tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal<'a> {
    /// No override, no applicable default, and no usable common type.
    NoImplementation,
    /// The argument tags differ and do not unify.
    NoCommonType,
    /// A comparison would convert lossily into this common tag.
    NotEmbedded(&'a Tag<'a>),
}

impl<'a> Refusal<'a> {
    pub fn into_error(self, op: Operation, tags: &[&'a Tag<'a>]) -> Error {
        let render = |i: usize| -> String {
            tags.get(i).map(|t| format!("{}", t)).unwrap_or_default()
        };
        match self {
            Refusal::NoImplementation => Error::Unsupported {
                op,
                tags: display_tags(tags),
            },
            Refusal::NoCommonType => Error::NoCommonType {
                left: render(0),
                right: render(1),
            },
            Refusal::NotEmbedded(common) => Error::NotEmbedded {
                op,
                left: render(0),
                right: render(1),
                common: format!("{}", common),
            },
        }
    }
}

/// The outcome of resolving an operation for a tuple of tags.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// An implementation registered for exactly these tags.
    Override(Implementation<'a>),
    /// The first default rule whose guard holds.
    Default(&'static DefaultRule),
    /// Convert both arguments to the common tag and dispatch again there.
    ViaCommon(Common<'a>),
    Unsupported(Refusal<'a>),
}

impl Resolution<'_> {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Resolution::Unsupported(_))
    }

    /// Short name of the route taken, for logging.
    pub fn route(&self) -> &'static str {
        match self {
            Resolution::Override(_) => "override",
            Resolution::Default(rule) => rule.name,
            Resolution::ViaCommon(_) => "via_common",
            Resolution::Unsupported(_) => "unsupported",
        }
    }
}
