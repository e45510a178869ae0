//! Zero-or-one container.

use crate::errors::Error;
use crate::values::Value;
use alloc::rc::Rc;

/// Either `Empty` (nothing) or `Holding(x)` (just x).
#[derive(Clone, PartialEq)]
pub struct Optional<'a> {
    value: Option<Rc<Value<'a>>>,
}

impl<'a> Optional<'a> {
    pub fn just(value: Value<'a>) -> Self {
        Self {
            value: Some(Rc::new(value)),
        }
    }

    pub fn nothing() -> Self {
        Self { value: None }
    }

    pub fn is_just(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_nothing(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&Value<'a>> {
        self.value.as_deref()
    }

    pub fn value_or(&self, default: Value<'a>) -> Value<'a> {
        match self.value() {
            Some(v) => v.clone(),
            None => default,
        }
    }

    /// Collapses one level of nesting.
    ///
    /// `Holding(Holding(x))` becomes `Holding(x)`; `Holding(Empty)` and
    /// `Empty` become `Empty`. A holding value that is not itself an
    /// optional is a type mismatch.
    pub fn flatten(&self) -> Result<Self, Error> {
        match self.value() {
            None => Ok(Self::nothing()),
            Some(inner) => Ok(inner.as_optional()?.clone()),
        }
    }

    /// Monadic bind: `Empty` stays `Empty`, `Holding(x)` becomes `f(x)`,
    /// which must itself be an optional.
    pub fn chain(
        &self,
        f: impl FnOnce(&Value<'a>) -> Result<Value<'a>, Error>,
    ) -> Result<Self, Error> {
        match self.value() {
            None => Ok(Self::nothing()),
            Some(x) => {
                let result = f(x)?;
                Ok(result.as_optional()?.clone())
            }
        }
    }

    pub fn transform(
        &self,
        f: impl FnOnce(&Value<'a>) -> Result<Value<'a>, Error>,
    ) -> Result<Self, Error> {
        match self.value() {
            None => Ok(Self::nothing()),
            Some(x) => Ok(Self::just(f(x)?)),
        }
    }
}

impl<'a> From<Option<Value<'a>>> for Optional<'a> {
    fn from(value: Option<Value<'a>>) -> Self {
        match value {
            Some(v) => Optional::just(v),
            None => Optional::nothing(),
        }
    }
}

impl core::fmt::Debug for Optional<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.value() {
            Some(v) => write!(f, "just({:?})", v),
            None => write!(f, "nothing"),
        }
    }
}
