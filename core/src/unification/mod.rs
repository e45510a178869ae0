//! Common-type unification: reconciling two tags before a cross-tag call.

pub mod conversion;
pub mod promotion;
mod unifier;

#[cfg(test)]
mod unifier_test;

pub use conversion::{Conversion, ConvertFn, Conversions};
pub use unifier::{Common, Unifier};
