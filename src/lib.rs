//! Concord - concept-based generic dispatch over tagged values
//!
//! # Overview
//!
//! Concord lets host code write algorithms once against *concepts*
//! (Comparable, Monoid, Foldable, Searchable, ...) and run them over values
//! of any tag that models those concepts. Every operation is resolved at
//! call time from the tags of its arguments:
//!
//! - an implementation registered for exactly those tags, or
//! - a default rule deriving the operation from others (`not_equal` from
//!   `equal`, `length` from `fold_left`, ...), or
//! - for mixed-tag comparisons and arithmetic, the common type of the two
//!   tags.
//!
//! The crate ships instances for scalars, strings, pairs, tuples,
//! optionals, constants and hash-bucketed maps and sets.
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use concord::prelude::*;
//!
//! let arena = Bump::new();
//! let d = Dispatcher::new(&arena, DispatchOptions::default(), |_tags, _builder| {});
//! let tags = d.tags();
//!
//! // Mixed widths unify through a lossless promotion.
//! assert!(d.equal(&Value::i8(tags, 3), &Value::i64(tags, 3)).unwrap());
//!
//! // Keys of a map are found through their hash bucket.
//! let map = Map::make(&d, [(Value::i32(tags, 1), Value::str(tags, "one"))]).unwrap();
//! assert!(map.contains(&d, &Value::u8(tags, 1)).unwrap());
//!
//! assert!(d.models(tags.tuple(), Concept::Sequence));
//! ```
//!
//! # Registering instances
//!
//! User tags are declared with `TagManager::custom` and given operations in
//! the initialization closure:
//!
//! ```
//! use bumpalo::Bump;
//! use concord::prelude::*;
//!
//! let arena = Bump::new();
//! let d = Dispatcher::new(&arena, DispatchOptions::default(), |tags, b| {
//!     let meters = tags.custom("Meters");
//!     b.implement(Operation::Equal, &[meters, meters], |d, _, args| {
//!         let (x, y) = (args[0].as_custom()?.at(0), args[1].as_custom()?.at(0));
//!         Ok(Value::bool(d.tags(), d.equal(x, y)?))
//!     });
//! });
//!
//! let tags = d.tags();
//! let a = Value::custom(tags, "Meters", [Value::f64(tags, 1.0)]);
//! assert!(d.equal(&a, &a).unwrap());
//! assert!(d.models(tags.custom("Meters"), Concept::Comparable));
//! ```

pub use concord_core::{
    builtins, dispatch, errors, tags, unification, values,
    ComparisonPolicy, Common, Concept, DispatchOptions, Dispatcher, DispatcherBuilder, Error,
    Function, Map, Operation, Optional, Resolution, Scalar, Set, Tag, TagManager, Tuple, Unifier,
    Value,
};

/// The types needed by most users of the dispatcher.
pub mod prelude {
    pub use concord_core::{
        Concept, DispatchOptions, Dispatcher, DispatcherBuilder, Error, Map, Operation, Optional,
        Set, Tag, TagManager, Tuple, Value,
    };
}
