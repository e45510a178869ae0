//! Builder for registering implementations before the dispatcher is frozen.

use crate::{
    Vec, builtins,
    dispatch::{DefaultRule, DispatchOptions, Dispatcher, Implementation, Operation},
    errors::Error,
    tags::{Tag, TagManager, display_tags},
    unification::{Conversion, Unifier},
    values::Value,
};
use hashbrown::HashMap;
use smallvec::SmallVec;

pub(crate) type TagKey<'a> = SmallVec<[&'a Tag<'a>; 2]>;

/// Collects overrides, default rules, common types and conversions.
///
/// Builders start with the builtin instances already registered. Later
/// registrations for the same operation and tags replace earlier ones, so
/// user code can override any builtin.
///
/// # Example
///
/// ```ignore
/// let mut builder = DispatcherBuilder::new(tags, DispatchOptions::default());
/// let money = tags.custom("Money");
/// builder.implement(Operation::Equal, &[money, money], |d, _, args| {
///     let (a, b) = (args[0].as_custom()?, args[1].as_custom()?);
///     Ok(Value::bool(d.tags(), d.equal(a.at(0), b.at(0))?))
/// });
/// let dispatcher = builder.build();
/// ```
pub struct DispatcherBuilder<'a> {
    tags: &'a TagManager<'a>,
    options: DispatchOptions,
    overrides: HashMap<(Operation, TagKey<'a>), Implementation<'a>>,
    defaults: HashMap<Operation, Vec<&'static DefaultRule>>,
    unifier: Unifier<'a>,
}

impl<'a> DispatcherBuilder<'a> {
    /// A builder preloaded with the builtin instances and default rules.
    pub fn new(tags: &'a TagManager<'a>, options: DispatchOptions) -> Self {
        let mut builder = Self::bare(tags, options);
        builtins::register(&mut builder);
        builder
    }

    /// A builder with nothing registered.
    pub fn bare(tags: &'a TagManager<'a>, options: DispatchOptions) -> Self {
        Self {
            tags,
            options,
            overrides: HashMap::new(),
            defaults: HashMap::new(),
            unifier: Unifier::new(tags),
        }
    }

    pub fn tags(&self) -> &'a TagManager<'a> {
        self.tags
    }

    /// Registers `func` as the implementation of `op` for exactly `tags`.
    ///
    /// # Panics
    ///
    /// Panics if `tags.len()` differs from `op.dispatch_arity()`.
    pub fn implement(
        &mut self,
        op: Operation,
        tags: &[&'a Tag<'a>],
        func: impl Fn(&Dispatcher<'a>, &'a Tag<'a>, &[Value<'a>]) -> Result<Value<'a>, Error> + 'a,
    ) -> &mut Self {
        assert_eq!(
            tags.len(),
            op.dispatch_arity(),
            "`{}` dispatches on {} tag(s)",
            op,
            op.dispatch_arity()
        );
        tracing::debug!(op = %op, tags = %display_tags(tags), "registering override");
        self.overrides
            .insert((op, tags.iter().copied().collect()), Implementation::new(func));
        self
    }

    /// Registers `func` for `op` on each tag in `each`. Binary operations are
    /// registered with both arguments carrying the same tag.
    pub fn implement_all(
        &mut self,
        op: Operation,
        each: &[&'a Tag<'a>],
        func: impl Fn(&Dispatcher<'a>, &'a Tag<'a>, &[Value<'a>]) -> Result<Value<'a>, Error>
        + Clone
        + 'a,
    ) -> &mut Self {
        for &tag in each {
            let key: TagKey<'a> = core::iter::repeat_n(tag, op.dispatch_arity()).collect();
            self.implement(op, &key, func.clone());
        }
        self
    }

    /// Appends a default rule. Rules for the same operation are tried in
    /// registration order.
    pub fn default_rule(&mut self, rule: &'static DefaultRule) -> &mut Self {
        tracing::debug!(op = %rule.op, rule = rule.name, "registering default rule");
        self.defaults.entry(rule.op).or_default().push(rule);
        self
    }

    /// Declares `common` as the common tag of `a` and `b`.
    pub fn common_type(
        &mut self,
        a: &'a Tag<'a>,
        b: &'a Tag<'a>,
        common: &'a Tag<'a>,
    ) -> &mut Self {
        tracing::debug!(left = %a, right = %b, common = %common, "registering common type");
        self.unifier.register_common_type(a, b, common);
        self
    }

    /// Registers a conversion from `from` to `to`. An `embedding` conversion
    /// is lossless and allows cross-tag comparisons through it.
    pub fn conversion(
        &mut self,
        from: &'a Tag<'a>,
        to: &'a Tag<'a>,
        embedding: bool,
        func: impl Fn(&'a TagManager<'a>, &Value<'a>) -> Result<Value<'a>, Error> + 'a,
    ) -> &mut Self {
        tracing::debug!(from = %from, to = %to, embedding, "registering conversion");
        self.unifier
            .register_conversion(from, to, Conversion::new(embedding, func));
        self
    }

    /// Freezes the registrations into a dispatcher.
    pub fn build(self) -> Dispatcher<'a> {
        Dispatcher::from_parts(
            self.tags,
            self.options,
            self.overrides,
            self.defaults,
            self.unifier,
        )
    }
}
