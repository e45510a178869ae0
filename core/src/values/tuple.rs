//! Fixed heterogeneous tuple.
//!
//! The length is fixed at construction and elements may carry any tag. Every
//! "modifying" method returns a new tuple; the storage of the original is
//! shared, never mutated.

use crate::Vec;
use crate::errors::Error;
use crate::values::Value;
use alloc::rc::Rc;

#[derive(Clone, PartialEq)]
pub struct Tuple<'a> {
    elements: Rc<[Value<'a>]>,
}

impl<'a> Tuple<'a> {
    pub fn new(elements: impl IntoIterator<Item = Value<'a>>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(core::iter::empty())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Use [`Tuple::get`] when the index has
    /// not been validated.
    pub fn at(&self, index: usize) -> &Value<'a> {
        match self.elements.get(index) {
            Some(value) => value,
            None => panic!(
                "tuple index {} out of bounds (length: {})",
                index,
                self.elements.len()
            ),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value<'a>> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value<'a>> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Value<'a>] {
        &self.elements
    }

    /// Applies `f` left to right: `f(f(f(init, x0), x1), x2)`.
    pub fn fold_left<T>(
        &self,
        init: T,
        mut f: impl FnMut(T, &Value<'a>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.elements.iter().try_fold(init, |acc, x| f(acc, x))
    }

    /// Applies `f` right to left: `f(x0, f(x1, f(x2, init)))`.
    pub fn fold_right<T>(
        &self,
        init: T,
        mut f: impl FnMut(&Value<'a>, T) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.elements.iter().rev().try_fold(init, |acc, x| f(x, acc))
    }

    /// Element-wise map, preserving length and order.
    pub fn transform(
        &self,
        mut f: impl FnMut(&Value<'a>) -> Result<Value<'a>, Error>,
    ) -> Result<Self, Error> {
        let elements = self
            .elements
            .iter()
            .map(|x| f(x))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(elements))
    }

    pub fn append(&self, value: Value<'a>) -> Self {
        Self::new(self.elements.iter().cloned().chain(core::iter::once(value)))
    }

    pub fn concat(&self, other: &Tuple<'a>) -> Self {
        Self::new(self.elements.iter().chain(other.elements.iter()).cloned())
    }
}

impl<'a> FromIterator<Value<'a>> for Tuple<'a> {
    fn from_iter<I: IntoIterator<Item = Value<'a>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'t, 'a> IntoIterator for &'t Tuple<'a> {
    type Item = &'t Value<'a>;
    type IntoIter = core::slice::Iter<'t, Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl core::fmt::Debug for Tuple<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}
