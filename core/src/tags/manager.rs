use crate::tags::{NumericKind, Tag};
use bumpalo::Bump;
use core::cell::RefCell;
use hashbrown::{DefaultHashBuilder, HashMap};

/// Interns tags in an arena so that every tag has a single, pointer-stable
/// representative for the lifetime of the arena.
pub struct TagManager<'a> {
    // Arena holding all tags from this TagManager.
    arena: &'a Bump,
    interned_strs: RefCell<HashMap<&'a str, &'a str, DefaultHashBuilder, &'a Bump>>,
    interned: RefCell<HashMap<Tag<'a>, &'a Tag<'a>, DefaultHashBuilder, &'a Bump>>,
}

impl<'a> TagManager<'a> {
    pub fn new(arena: &'a Bump) -> &'a Self {
        arena.alloc(Self {
            arena,
            interned_strs: RefCell::new(HashMap::new_in(arena)),
            interned: RefCell::new(HashMap::new_in(arena)),
        })
    }

    fn intern_str(&self, s: &str) -> &'a str {
        if let Some(&interned_str) = self.interned_strs.borrow().get(s) {
            return interned_str;
        }
        let arena_str = self.arena.alloc_str(s);
        self.interned_strs.borrow_mut().insert(arena_str, arena_str);
        arena_str
    }

    fn intern(&self, tag: Tag<'a>) -> &'a Tag<'a> {
        if let Some(&interned_tag) = self.interned.borrow().get(&tag) {
            return interned_tag;
        }
        let arena_tag = self.arena.alloc(tag.clone());
        self.interned.borrow_mut().insert(tag, arena_tag);
        arena_tag
    }

    // Factory methods for tags.
    pub fn bool(&self) -> &'a Tag<'a> {
        self.intern(Tag::Bool)
    }
    pub fn char(&self) -> &'a Tag<'a> {
        self.intern(Tag::Char)
    }
    pub fn i8(&self) -> &'a Tag<'a> {
        self.intern(Tag::I8)
    }
    pub fn i16(&self) -> &'a Tag<'a> {
        self.intern(Tag::I16)
    }
    pub fn i32(&self) -> &'a Tag<'a> {
        self.intern(Tag::I32)
    }
    pub fn i64(&self) -> &'a Tag<'a> {
        self.intern(Tag::I64)
    }
    pub fn u8(&self) -> &'a Tag<'a> {
        self.intern(Tag::U8)
    }
    pub fn u16(&self) -> &'a Tag<'a> {
        self.intern(Tag::U16)
    }
    pub fn u32(&self) -> &'a Tag<'a> {
        self.intern(Tag::U32)
    }
    pub fn u64(&self) -> &'a Tag<'a> {
        self.intern(Tag::U64)
    }
    pub fn f32(&self) -> &'a Tag<'a> {
        self.intern(Tag::F32)
    }
    pub fn f64(&self) -> &'a Tag<'a> {
        self.intern(Tag::F64)
    }
    pub fn str(&self) -> &'a Tag<'a> {
        self.intern(Tag::Str)
    }
    pub fn function(&self) -> &'a Tag<'a> {
        self.intern(Tag::Function)
    }
    pub fn pair(&self) -> &'a Tag<'a> {
        self.intern(Tag::Pair)
    }
    pub fn tuple(&self) -> &'a Tag<'a> {
        self.intern(Tag::Tuple)
    }
    pub fn optional(&self) -> &'a Tag<'a> {
        self.intern(Tag::Optional)
    }
    pub fn map(&self) -> &'a Tag<'a> {
        self.intern(Tag::Map)
    }
    pub fn set(&self) -> &'a Tag<'a> {
        self.intern(Tag::Set)
    }

    /// The arithmetic tag with the given family and bit width, if one exists.
    pub fn numeric(&self, kind: NumericKind, bits: u32) -> Option<&'a Tag<'a>> {
        let tag = match (kind, bits) {
            (NumericKind::Signed, 8) => Tag::I8,
            (NumericKind::Signed, 16) => Tag::I16,
            (NumericKind::Signed, 32) => Tag::I32,
            (NumericKind::Signed, 64) => Tag::I64,
            (NumericKind::Unsigned, 8) => Tag::U8,
            (NumericKind::Unsigned, 16) => Tag::U16,
            (NumericKind::Unsigned, 32) => Tag::U32,
            (NumericKind::Unsigned, 64) => Tag::U64,
            (NumericKind::Float, 32) => Tag::F32,
            (NumericKind::Float, 64) => Tag::F64,
            _ => return None,
        };
        Some(self.intern(tag))
    }

    pub fn constant(&self, inner: &'a Tag<'a>) -> &'a Tag<'a> {
        self.intern(Tag::Constant(inner))
    }

    pub fn custom(&self, name: &str) -> &'a Tag<'a> {
        let name = self.intern_str(name);
        self.intern(Tag::Custom(name))
    }
}
