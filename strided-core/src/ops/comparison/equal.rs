use crate::error::StridedError;
use crate::ops::elementwise::{evaluate_binary, BinaryOp};
use crate::tensor::Tensor;

/// Element-wise `a == b` with broadcasting, compared in the promoted dtype.
///
/// Returns a `bool` tensor of the broadcast shape.
pub fn equal_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_binary(BinaryOp::Equal, a, b)
}

#[cfg(test)]
#[path = "equal_test.rs"]
mod tests;
