use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::arithmetic::{mul_op, neg_op};
use crate::ops::elementwise::{evaluate_binary, BinaryOp};
use crate::tensor::Tensor;

/// Backward step of `a / b`: `dA = g / b`, `dB = -g * a / b^2`.
#[derive(Debug)]
struct DivBackward;

impl BackwardFn for DivBackward {
    fn name(&self) -> &'static str {
        "divide"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        let b = ctx.saved(1)?;
        let grad_a = div_op(grad_output, b)?.reduce_to_shape(&a.shape())?;
        let b_squared = mul_op(b, b)?;
        let numerator = neg_op(&mul_op(grad_output, a)?)?;
        let grad_b = div_op(&numerator, &b_squared)?.reduce_to_shape(&b.shape())?;
        Ok(vec![grad_a, grad_b])
    }
}

/// Element-wise `a / b` with broadcasting. Nothing is recorded.
///
/// Floating-point division follows IEEE rules.
///
/// # Errors
/// `DivisionByZero` for an integer division by zero.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_binary(BinaryOp::Divide, a, b)
}

/// Element-wise `a / b`, recorded in `graph` when an input requires grad.
pub fn divide(graph: &mut GraphContext, a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a, b], DivBackward, || div_op(a, b))
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
