use crate::error::StridedError;
use crate::ops::elementwise::{evaluate_binary, BinaryOp};
use crate::tensor::Tensor;

/// Element-wise `a != b` with broadcasting. Returns a `bool` tensor.
pub fn ne_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_binary(BinaryOp::NotEqual, a, b)
}

#[cfg(test)]
#[path = "ne_test.rs"]
mod tests;
