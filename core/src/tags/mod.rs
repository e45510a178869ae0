//! Tag registry: the type-identity markers every value carries.

pub mod manager;
mod tag;

#[cfg(test)]
mod manager_test;

pub use manager::TagManager;
pub(crate) use tag::display_tags;
pub use tag::{NumericKind, Tag};
