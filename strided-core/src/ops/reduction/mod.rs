//! Reductions along one axis or over the whole tensor.

pub mod all;
pub mod sum;
mod utils;

pub use all::all_op;
pub use sum::{sum, sum_op};

/// Axis argument meaning "reduce every element".
pub const REDUCE_ALL: Option<usize> = None;
