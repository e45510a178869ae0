use crate::dispatch::Operation;
use core::fmt;

/// A named predicate over tags.
///
/// A tag models a concept when every concept it refines is modeled and at
/// least one of the concept's signature operations resolves for the tag.
/// Membership is computed from resolution alone; no operation is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Concept {
    Comparable,
    Orderable,
    Hashable,
    Monoid,
    Group,
    Ring,
    EuclideanRing,
    Constant,
    Product,
    Foldable,
    Iterable,
    Functor,
    Searchable,
    Applicative,
    Monad,
    Sequence,
}

impl Concept {
    pub const ALL: &'static [Concept] = &[
        Concept::Comparable,
        Concept::Orderable,
        Concept::Hashable,
        Concept::Monoid,
        Concept::Group,
        Concept::Ring,
        Concept::EuclideanRing,
        Concept::Constant,
        Concept::Product,
        Concept::Foldable,
        Concept::Iterable,
        Concept::Functor,
        Concept::Searchable,
        Concept::Applicative,
        Concept::Monad,
        Concept::Sequence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Concept::Comparable => "Comparable",
            Concept::Orderable => "Orderable",
            Concept::Hashable => "Hashable",
            Concept::Monoid => "Monoid",
            Concept::Group => "Group",
            Concept::Ring => "Ring",
            Concept::EuclideanRing => "EuclideanRing",
            Concept::Constant => "Constant",
            Concept::Product => "Product",
            Concept::Foldable => "Foldable",
            Concept::Iterable => "Iterable",
            Concept::Functor => "Functor",
            Concept::Searchable => "Searchable",
            Concept::Applicative => "Applicative",
            Concept::Monad => "Monad",
            Concept::Sequence => "Sequence",
        }
    }

    /// A short description of what the concept provides.
    pub fn description(self) -> &'static str {
        match self {
            Concept::Comparable => "equality comparison (==, !=)",
            Concept::Orderable => "total ordering (<, <=, >, >=)",
            Concept::Hashable => "a hash consistent with equality",
            Concept::Monoid => "an identity (zero) and an associative plus",
            Concept::Group => "additive inverses (negate, minus)",
            Concept::Ring => "a multiplicative identity (one) and times",
            Concept::EuclideanRing => "integer division (quotient, remainder)",
            Concept::Constant => "a wrapped value retrievable with value",
            Concept::Product => "a pair of components (first, second)",
            Concept::Foldable => "left and right folds over the elements",
            Concept::Iterable => "positional access to the elements",
            Concept::Functor => "element-wise transform",
            Concept::Searchable => "search for elements by predicate or key",
            Concept::Applicative => "lifting a value into the container",
            Concept::Monad => "flatten and chain",
            Concept::Sequence => "a finite ordered sequence of elements",
        }
    }

    /// Operations whose resolution witnesses the concept.
    pub fn signature(self) -> &'static [Operation] {
        use Operation::*;
        match self {
            Concept::Comparable => &[Equal, NotEqual],
            Concept::Orderable => &[Less, LessEqual, Greater, GreaterEqual],
            Concept::Hashable => &[Hash],
            Concept::Monoid => &[Zero, Plus],
            Concept::Group => &[Negate, Minus],
            Concept::Ring => &[One, Times],
            Concept::EuclideanRing => &[Quotient, Remainder],
            Concept::Constant => &[Value],
            Concept::Product => &[First, Second],
            Concept::Foldable => &[FoldLeft, FoldRight],
            Concept::Iterable => &[At],
            Concept::Functor => &[Transform],
            Concept::Searchable => &[FindIf, AnyOf, Find, Contains],
            Concept::Applicative => &[Lift],
            Concept::Monad => &[Flatten, Chain],
            Concept::Sequence => &[At, Length],
        }
    }

    /// Concepts that must also be modeled.
    pub fn refines(self) -> &'static [Concept] {
        match self {
            Concept::Group => &[Concept::Monoid],
            Concept::Ring => &[Concept::Monoid],
            Concept::EuclideanRing => &[Concept::Ring],
            Concept::Applicative => &[Concept::Functor],
            Concept::Monad => &[Concept::Functor, Concept::Applicative],
            Concept::Sequence => &[
                Concept::Iterable,
                Concept::Foldable,
                Concept::Functor,
                Concept::Searchable,
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
