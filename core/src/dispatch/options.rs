//! Configuration options for the dispatcher.

/// How cross-tag comparisons treat lossy conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonPolicy {
    /// Refuse a comparison unless both arguments embed into the common tag.
    #[default]
    RequireEmbedding,

    /// Compare through any common tag, even when a side loses precision.
    ///
    /// Lossy equality does not agree with `hash`, so map and set lookups and
    /// map/set equality keep requiring embeddings under this policy.
    AllowLossy,
}

/// Configuration options for a [`Dispatcher`](crate::Dispatcher).
///
/// # Example
///
/// ```
/// use concord_core::{ComparisonPolicy, DispatchOptions};
///
/// let options = DispatchOptions {
///     max_depth: 64,
///     comparison: ComparisonPolicy::AllowLossy,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Maximum nesting of dispatched calls (for recursion protection).
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Policy for cross-tag comparisons.
    ///
    /// Default: `ComparisonPolicy::RequireEmbedding`
    pub comparison: ComparisonPolicy,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            comparison: ComparisonPolicy::default(),
        }
    }
}
