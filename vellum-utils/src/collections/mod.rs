//! Collection types with extra invariants.

mod non_empty_vec;
pub use non_empty_vec::{EmptyVecError, NonEmptyVec};

#[doc(hidden)]
pub mod __macro_support {
    pub use std::vec;
}

#[doc(inline)]
pub use crate::__non_empty_vec as non_empty_vec;
