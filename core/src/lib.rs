#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod builtins;
pub mod dispatch;
pub mod errors;
pub mod tags;
pub mod unification;
pub mod values;

pub use dispatch::{
    ComparisonPolicy, Concept, DispatchOptions, Dispatcher, DispatcherBuilder, Operation,
    Resolution,
};
pub use errors::Error;
pub use tags::{Tag, TagManager};
pub use unification::{Common, Unifier};
pub use values::{Function, Map, Optional, Scalar, Set, Tuple, Value};
