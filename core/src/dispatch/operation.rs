use core::fmt;

/// A named family of implementations, selected per call by argument tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    // Comparable / Orderable / Hashable.
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Hash,

    // Monoid / Group / Ring / EuclideanRing.
    Zero,
    Plus,
    Negate,
    Minus,
    One,
    Times,
    Quotient,
    Remainder,

    // Constant.
    Value,

    // Product.
    First,
    Second,

    // Foldable / Iterable / Functor / Searchable.
    Length,
    At,
    FoldLeft,
    FoldRight,
    Transform,
    FindIf,
    AnyOf,
    Find,
    Contains,

    // Applicative / Monad.
    Lift,
    Flatten,
    Chain,
}

impl Operation {
    pub const ALL: &'static [Operation] = &[
        Operation::Equal,
        Operation::NotEqual,
        Operation::Less,
        Operation::LessEqual,
        Operation::Greater,
        Operation::GreaterEqual,
        Operation::Hash,
        Operation::Zero,
        Operation::Plus,
        Operation::Negate,
        Operation::Minus,
        Operation::One,
        Operation::Times,
        Operation::Quotient,
        Operation::Remainder,
        Operation::Value,
        Operation::First,
        Operation::Second,
        Operation::Length,
        Operation::At,
        Operation::FoldLeft,
        Operation::FoldRight,
        Operation::Transform,
        Operation::FindIf,
        Operation::AnyOf,
        Operation::Find,
        Operation::Contains,
        Operation::Lift,
        Operation::Flatten,
        Operation::Chain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Equal => "equal",
            Operation::NotEqual => "not_equal",
            Operation::Less => "less",
            Operation::LessEqual => "less_equal",
            Operation::Greater => "greater",
            Operation::GreaterEqual => "greater_equal",
            Operation::Hash => "hash",
            Operation::Zero => "zero",
            Operation::Plus => "plus",
            Operation::Negate => "negate",
            Operation::Minus => "minus",
            Operation::One => "one",
            Operation::Times => "times",
            Operation::Quotient => "quotient",
            Operation::Remainder => "remainder",
            Operation::Value => "value",
            Operation::First => "first",
            Operation::Second => "second",
            Operation::Length => "length",
            Operation::At => "at",
            Operation::FoldLeft => "fold_left",
            Operation::FoldRight => "fold_right",
            Operation::Transform => "transform",
            Operation::FindIf => "find_if",
            Operation::AnyOf => "any_of",
            Operation::Find => "find",
            Operation::Contains => "contains",
            Operation::Lift => "lift",
            Operation::Flatten => "flatten",
            Operation::Chain => "chain",
        }
    }

    /// Number of value arguments the operation takes.
    ///
    /// `zero`, `one` and `lift` additionally take the tag they produce a
    /// value for; it is not counted here.
    pub fn arity(self) -> usize {
        use Operation::*;
        match self {
            Zero | One => 0,
            Hash | Negate | Value | First | Second | Length | Flatten | Lift => 1,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 2,
            Plus | Minus | Times | Quotient | Remainder => 2,
            At | Transform | FindIf | AnyOf | Find | Contains | Chain => 2,
            FoldLeft | FoldRight => 3,
        }
    }

    /// Operations that select their implementation from an explicitly
    /// supplied tag rather than from their arguments.
    pub fn takes_tag(self) -> bool {
        matches!(self, Operation::Zero | Operation::One | Operation::Lift)
    }

    /// Number of tags that key the implementation lookup.
    pub fn dispatch_arity(self) -> usize {
        if self.is_cross_tag() { 2 } else { 1 }
    }

    /// Binary operations whose two arguments may carry different tags, to be
    /// reconciled by unification.
    pub fn is_cross_tag(self) -> bool {
        self.is_comparison()
            || matches!(
                self,
                Operation::Plus
                    | Operation::Minus
                    | Operation::Times
                    | Operation::Quotient
                    | Operation::Remainder
            )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operation::Equal
                | Operation::NotEqual
                | Operation::Less
                | Operation::LessEqual
                | Operation::Greater
                | Operation::GreaterEqual
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
