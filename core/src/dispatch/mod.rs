//! Capability dispatch: resolving operations to implementations per tag.

mod builder;
mod concept;
mod dispatcher;
mod operation;
mod options;
mod resolution;

#[cfg(test)]
mod dispatcher_test;

pub use builder::DispatcherBuilder;
pub use concept::Concept;
pub use dispatcher::Dispatcher;
pub use operation::Operation;
pub use options::{ComparisonPolicy, DispatchOptions};
pub use resolution::{DefaultRule, Guard, Implementation, OpFn, Refusal, Resolution, RuleFn};
