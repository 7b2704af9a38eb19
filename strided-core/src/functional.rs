//! Flat entry points for every tensor operation.
//!
//! Functions taking a `&mut GraphContext` record their output when an input
//! requires gradients. The `_op` variants and the comparisons never record.

pub use crate::ops::arithmetic::{add, add_op, div_op, divide, mul_op, multiply, neg_op, negate, sub_op, subtract};
pub use crate::ops::comparison::{equal_op, ne_op};
pub use crate::ops::concat::{concat, concat_op};
pub use crate::ops::linalg::{matmul, matmul_op};
pub use crate::ops::math_elem::{exp, exp_op, ln_op, log};
pub use crate::ops::reduction::{all_op, sum, sum_op, REDUCE_ALL};
pub use crate::ops::view::{broadcast_to, broadcast_to_op, reshape, reshape_op, transpose, transpose_op};
