pub mod buckets;
pub mod function;
pub mod map;
pub mod optional;
pub mod scalar;
pub mod set;
pub mod tuple;
mod value;

pub use buckets::BucketTable;
pub use function::{Function, NativeFn};
pub use map::Map;
pub use optional::Optional;
pub use scalar::Scalar;
pub use set::Set;
pub use tuple::Tuple;
pub use value::Value;
