//! Registry of user-supplied conversions between tags.

use crate::errors::Error;
use crate::tags::{Tag, TagManager};
use crate::values::Value;
use alloc::rc::Rc;
use hashbrown::HashMap;

/// Signature of a registered conversion.
pub type ConvertFn<'a> = dyn Fn(&'a TagManager<'a>, &Value<'a>) -> Result<Value<'a>, Error> + 'a;

/// A conversion from one tag to another.
///
/// `embedding` marks the conversion as lossless, which is what allows
/// cross-tag comparisons to run through it.
#[derive(Clone)]
pub struct Conversion<'a> {
    func: Rc<ConvertFn<'a>>,
    pub embedding: bool,
}

impl<'a> Conversion<'a> {
    pub fn new(
        embedding: bool,
        func: impl Fn(&'a TagManager<'a>, &Value<'a>) -> Result<Value<'a>, Error> + 'a,
    ) -> Self {
        Self {
            func: Rc::new(func),
            embedding,
        }
    }

    pub fn apply(&self, tags: &'a TagManager<'a>, value: &Value<'a>) -> Result<Value<'a>, Error> {
        (self.func)(tags, value)
    }
}

impl core::fmt::Debug for Conversion<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Conversion")
            .field("embedding", &self.embedding)
            .finish_non_exhaustive()
    }
}

#[derive(Default, Clone)]
pub struct Conversions<'a> {
    table: HashMap<(&'a Tag<'a>, &'a Tag<'a>), Conversion<'a>>,
}

impl<'a> Conversions<'a> {
    pub fn insert(&mut self, from: &'a Tag<'a>, to: &'a Tag<'a>, conversion: Conversion<'a>) {
        self.table.insert((from, to), conversion);
    }

    pub fn get(&self, from: &'a Tag<'a>, to: &'a Tag<'a>) -> Option<&Conversion<'a>> {
        self.table.get(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
