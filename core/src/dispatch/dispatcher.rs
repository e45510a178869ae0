use crate::{
    Vec,
    dispatch::{
        ComparisonPolicy, Concept, DefaultRule, DispatchOptions, DispatcherBuilder,
        Implementation, Operation, Refusal, Resolution, builder::TagKey,
    },
    errors::Error,
    tags::{Tag, TagManager, display_tags},
    unification::{Common, Unifier},
    values::{Scalar, Value},
};
use bumpalo::Bump;
use core::cell::{Cell, RefCell};
use core::hash::{BuildHasher, Hasher};
use hashbrown::{DefaultHashBuilder, HashMap};

/// Resolves operations to implementations and runs them.
///
/// A dispatcher is frozen once built. Its overrides, default rules, common
/// types and conversions never change, so `models` answers are cached.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use concord_core::{Concept, DispatchOptions, Dispatcher, Value};
///
/// let arena = Bump::new();
/// let d = Dispatcher::new(&arena, DispatchOptions::default(), |_tags, _builder| {});
/// let tags = d.tags();
///
/// let x = Value::i32(tags, 1);
/// let y = Value::i64(tags, 1);
/// assert!(d.equal(&x, &y).unwrap());
/// assert!(d.models(tags.tuple(), Concept::Sequence));
/// ```
pub struct Dispatcher<'a> {
    tags: &'a TagManager<'a>,
    options: DispatchOptions,
    overrides: HashMap<(Operation, TagKey<'a>), Implementation<'a>>,
    defaults: HashMap<Operation, Vec<&'static DefaultRule>>,
    unifier: Unifier<'a>,
    hasher: DefaultHashBuilder,
    models_cache: RefCell<HashMap<(&'a Tag<'a>, Concept), bool>>,
    depth: Cell<usize>,
    embedding_only: Cell<usize>,
}

/// Decrements a nesting counter when the scope that raised it ends.
struct DepthGuard<'d> {
    depth: &'d Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher with the builtin instances plus whatever `init`
    /// registers.
    ///
    /// The initialization closure receives:
    /// - `tags`: the tag manager, allocated in `arena`
    /// - `builder`: the builder for registering overrides, common types and
    ///   conversions
    pub fn new(
        arena: &'a Bump,
        options: DispatchOptions,
        init: impl FnOnce(&'a TagManager<'a>, &mut DispatcherBuilder<'a>),
    ) -> Self {
        let tags = TagManager::new(arena);
        let mut builder = DispatcherBuilder::new(tags, options);
        init(tags, &mut builder);
        builder.build()
    }

    pub(crate) fn from_parts(
        tags: &'a TagManager<'a>,
        options: DispatchOptions,
        overrides: HashMap<(Operation, TagKey<'a>), Implementation<'a>>,
        defaults: HashMap<Operation, Vec<&'static DefaultRule>>,
        unifier: Unifier<'a>,
    ) -> Self {
        Self {
            tags,
            options,
            overrides,
            defaults,
            unifier,
            hasher: DefaultHashBuilder::default(),
            models_cache: RefCell::new(HashMap::new()),
            depth: Cell::new(0),
            embedding_only: Cell::new(0),
        }
    }

    pub fn tags(&self) -> &'a TagManager<'a> {
        self.tags
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    pub fn unifier(&self) -> &Unifier<'a> {
        &self.unifier
    }

    /// The hasher shared by every `hash` implementation of this dispatcher.
    pub fn hasher(&self) -> &DefaultHashBuilder {
        &self.hasher
    }

    /// Hashes whatever `feed` writes with this dispatcher's hasher.
    pub fn hash_with(
        &self,
        feed: impl FnOnce(&mut <DefaultHashBuilder as BuildHasher>::Hasher),
    ) -> u64 {
        let mut state = self.hasher.build_hasher();
        feed(&mut state);
        state.finish()
    }

    /// True if an implementation was registered for exactly `tags`.
    pub fn has_override(&self, op: Operation, tags: &[&'a Tag<'a>]) -> bool {
        self.overrides
            .contains_key(&(op, tags.iter().copied().collect::<TagKey<'a>>()))
    }

    // ============================================================================
    // Resolution
    // ============================================================================

    /// Resolves `op` for the dispatch tags without running anything.
    ///
    /// Lookup order: exact override, then the first default rule whose guard
    /// holds, then (for cross-tag operations on differing tags) the common
    /// type, and finally `Unsupported`.
    pub fn resolve(&self, op: Operation, tags: &[&'a Tag<'a>]) -> Resolution<'a> {
        let resolution = self.resolve_route(op, tags);
        match &resolution {
            Resolution::Unsupported(refusal) => {
                tracing::debug!(op = %op, tags = %display_tags(tags), ?refusal, "unsupported");
            }
            _ => {
                tracing::trace!(op = %op, tags = %display_tags(tags), route = resolution.route(), "resolved");
            }
        }
        resolution
    }

    fn resolve_route(&self, op: Operation, tags: &[&'a Tag<'a>]) -> Resolution<'a> {
        let key: TagKey<'a> = tags.iter().copied().collect();
        if let Some(imp) = self.overrides.get(&(op, key)) {
            return Resolution::Override(imp.clone());
        }

        if let Some(rules) = self.defaults.get(&op) {
            if let Some(rule) = rules.iter().copied().find(|rule| (rule.guard)(self, tags)) {
                return Resolution::Default(rule);
            }
        }

        if let &[left, right] = tags {
            if op.is_cross_tag() && left != right {
                return self.resolve_via_common(op, left, right);
            }
        }

        Resolution::Unsupported(Refusal::NoImplementation)
    }

    fn resolve_via_common(
        &self,
        op: Operation,
        left: &'a Tag<'a>,
        right: &'a Tag<'a>,
    ) -> Resolution<'a> {
        let common = match self.unifier.unify(left, right) {
            Ok(common) => common,
            Err(_) => return Resolution::Unsupported(Refusal::NoCommonType),
        };
        if !self.unifier.converts(left, common.tag) || !self.unifier.converts(right, common.tag) {
            return Resolution::Unsupported(Refusal::NoImplementation);
        }
        if op.is_comparison() && self.requires_embedding() && !common.is_embedding() {
            return Resolution::Unsupported(Refusal::NotEmbedded(common.tag));
        }
        if !self.resolve(op, &[common.tag, common.tag]).is_supported() {
            return Resolution::Unsupported(Refusal::NoImplementation);
        }
        Resolution::ViaCommon(common)
    }

    fn requires_embedding(&self) -> bool {
        self.options.comparison == ComparisonPolicy::RequireEmbedding
            || self.embedding_only.get() > 0
    }

    /// Runs `f` with cross-tag comparisons restricted to embeddings, whatever
    /// the configured policy. Hashing is only consistent with equality under
    /// embeddings, so hashed lookups and map/set equality run in this mode.
    pub fn with_embedding_only<T>(&self, f: impl FnOnce() -> T) -> T {
        self.embedding_only.set(self.embedding_only.get() + 1);
        let _guard = DepthGuard {
            depth: &self.embedding_only,
        };
        f()
    }

    /// Whether `tag` models `concept`. Answers are cached.
    pub fn models(&self, tag: &'a Tag<'a>, concept: Concept) -> bool {
        if let Some(&cached) = self.models_cache.borrow().get(&(tag, concept)) {
            return cached;
        }
        let modeled = concept.refines().iter().all(|&c| self.models(tag, c))
            && concept.signature().iter().any(|&op| {
                let key: TagKey<'a> = core::iter::repeat_n(tag, op.dispatch_arity()).collect();
                self.resolve(op, &key).is_supported()
            });
        self.models_cache
            .borrow_mut()
            .insert((tag, concept), modeled);
        modeled
    }

    // ============================================================================
    // Invocation
    // ============================================================================

    /// Runs `op` on `args`, dispatching on the tags of the leading arguments.
    ///
    /// `zero`, `one` and `lift` need an explicit tag; use
    /// [`call_with_tag`](Self::call_with_tag) for those.
    pub fn call(&self, op: Operation, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
        if op.takes_tag() || args.len() < op.arity() {
            return Err(Error::Arity {
                op,
                expected: op.arity() + usize::from(op.takes_tag()),
                found: args.len(),
            });
        }
        let tags: TagKey<'a> = args[..op.dispatch_arity()].iter().map(|v| v.tag).collect();
        self.invoke(op, &tags, args)
    }

    /// Runs an operation that dispatches on an explicitly supplied tag.
    pub fn call_with_tag(
        &self,
        op: Operation,
        tag: &'a Tag<'a>,
        args: &[Value<'a>],
    ) -> Result<Value<'a>, Error> {
        if args.len() < op.arity() {
            return Err(Error::Arity {
                op,
                expected: op.arity(),
                found: args.len(),
            });
        }
        self.invoke(op, &[tag], args)
    }

    fn invoke(
        &self,
        op: Operation,
        tags: &[&'a Tag<'a>],
        args: &[Value<'a>],
    ) -> Result<Value<'a>, Error> {
        let _guard = self.enter()?;
        match self.resolve(op, tags) {
            Resolution::Override(imp) => imp.call(self, tags[0], args),
            Resolution::Default(rule) => (rule.imp)(self, tags[0], args),
            Resolution::ViaCommon(Common { tag, .. }) => {
                let mut converted = Vec::with_capacity(args.len());
                converted.push(self.convert(&args[0], tag)?);
                converted.push(self.convert(&args[1], tag)?);
                converted.extend(args[2..].iter().cloned());
                self.invoke(op, &[tag, tag], &converted)
            }
            Resolution::Unsupported(refusal) => Err(refusal.into_error(op, tags)),
        }
    }

    fn enter(&self) -> Result<DepthGuard<'_>, Error> {
        let depth = self.depth.get() + 1;
        if depth > self.options.max_depth {
            return Err(Error::DepthExceeded {
                depth,
                max_depth: self.options.max_depth,
            });
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }

    /// Calls a function value with `args`.
    pub fn apply(&self, f: &Value<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
        let _guard = self.enter()?;
        f.as_function()?.call(self, args)
    }

    // ============================================================================
    // Unification
    // ============================================================================

    pub fn unify(&self, a: &'a Tag<'a>, b: &'a Tag<'a>) -> Result<Common<'a>, Error> {
        self.unifier.unify(a, b)
    }

    pub fn embeds(&self, from: &'a Tag<'a>, to: &'a Tag<'a>) -> bool {
        self.unifier.embeds(from, to)
    }

    pub fn convert(&self, value: &Value<'a>, to: &'a Tag<'a>) -> Result<Value<'a>, Error> {
        self.unifier.convert(value, to)
    }

    // ============================================================================
    // Operations
    // ============================================================================

    fn call_bool(&self, op: Operation, args: &[Value<'a>]) -> Result<bool, Error> {
        self.call(op, args)?.as_bool()
    }

    pub fn equal(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::Equal, &[x.clone(), y.clone()])
    }

    /// `equal` restricted to embeddings: a cross-tag pair that would compare
    /// through a lossy conversion, at any depth, is unequal instead.
    pub fn equal_embedded(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.with_embedding_only(|| match self.equal(x, y) {
            Err(Error::NotEmbedded { .. }) => Ok(false),
            result => result,
        })
    }

    pub fn not_equal(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::NotEqual, &[x.clone(), y.clone()])
    }

    pub fn less(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::Less, &[x.clone(), y.clone()])
    }

    pub fn less_equal(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::LessEqual, &[x.clone(), y.clone()])
    }

    pub fn greater(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::Greater, &[x.clone(), y.clone()])
    }

    pub fn greater_equal(&self, x: &Value<'a>, y: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::GreaterEqual, &[x.clone(), y.clone()])
    }

    /// Hash of `x`, consistent with `equal` across tags that unify losslessly.
    pub fn hash(&self, x: &Value<'a>) -> Result<u64, Error> {
        let h = self.call(Operation::Hash, core::slice::from_ref(x))?;
        match h.as_scalar()? {
            Scalar::U64(v) => Ok(v),
            _ => Err(Error::mismatch("U64", h.tag)),
        }
    }

    pub fn zero(&self, tag: &'a Tag<'a>) -> Result<Value<'a>, Error> {
        self.call_with_tag(Operation::Zero, tag, &[])
    }

    pub fn one(&self, tag: &'a Tag<'a>) -> Result<Value<'a>, Error> {
        self.call_with_tag(Operation::One, tag, &[])
    }

    pub fn plus(&self, x: &Value<'a>, y: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Plus, &[x.clone(), y.clone()])
    }

    pub fn minus(&self, x: &Value<'a>, y: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Minus, &[x.clone(), y.clone()])
    }

    pub fn negate(&self, x: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Negate, core::slice::from_ref(x))
    }

    pub fn times(&self, x: &Value<'a>, y: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Times, &[x.clone(), y.clone()])
    }

    pub fn quotient(&self, x: &Value<'a>, y: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Quotient, &[x.clone(), y.clone()])
    }

    pub fn remainder(&self, x: &Value<'a>, y: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Remainder, &[x.clone(), y.clone()])
    }

    /// The value wrapped by a constant.
    pub fn value(&self, x: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Value, core::slice::from_ref(x))
    }

    pub fn first(&self, x: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::First, core::slice::from_ref(x))
    }

    pub fn second(&self, x: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Second, core::slice::from_ref(x))
    }

    pub fn length(&self, xs: &Value<'a>) -> Result<usize, Error> {
        self.call(Operation::Length, core::slice::from_ref(xs))?
            .as_index()
    }

    pub fn at(&self, xs: &Value<'a>, index: usize) -> Result<Value<'a>, Error> {
        let index = Value::u64(self.tags, index as u64);
        self.call(Operation::At, &[xs.clone(), index])
    }

    /// `f(f(f(init, x0), x1), x2)`.
    pub fn fold_left(
        &self,
        xs: &Value<'a>,
        init: &Value<'a>,
        f: &Value<'a>,
    ) -> Result<Value<'a>, Error> {
        self.call(Operation::FoldLeft, &[xs.clone(), init.clone(), f.clone()])
    }

    /// `f(x0, f(x1, f(x2, init)))`.
    pub fn fold_right(
        &self,
        xs: &Value<'a>,
        init: &Value<'a>,
        f: &Value<'a>,
    ) -> Result<Value<'a>, Error> {
        self.call(Operation::FoldRight, &[xs.clone(), init.clone(), f.clone()])
    }

    pub fn transform(&self, xs: &Value<'a>, f: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Transform, &[xs.clone(), f.clone()])
    }

    /// The first element satisfying `pred`, as an optional.
    pub fn find_if(&self, xs: &Value<'a>, pred: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::FindIf, &[xs.clone(), pred.clone()])
    }

    pub fn any_of(&self, xs: &Value<'a>, pred: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::AnyOf, &[xs.clone(), pred.clone()])
    }

    /// The element (or, for maps, the value) found under `key`, as an
    /// optional.
    pub fn find(&self, xs: &Value<'a>, key: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Find, &[xs.clone(), key.clone()])
    }

    pub fn contains(&self, xs: &Value<'a>, key: &Value<'a>) -> Result<bool, Error> {
        self.call_bool(Operation::Contains, &[xs.clone(), key.clone()])
    }

    /// Wraps `x` in the minimal container tagged `tag`.
    pub fn lift(&self, tag: &'a Tag<'a>, x: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call_with_tag(Operation::Lift, tag, core::slice::from_ref(x))
    }

    pub fn flatten(&self, xs: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Flatten, core::slice::from_ref(xs))
    }

    pub fn chain(&self, xs: &Value<'a>, f: &Value<'a>) -> Result<Value<'a>, Error> {
        self.call(Operation::Chain, &[xs.clone(), f.clone()])
    }
}
