use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::elementwise::{evaluate_binary, BinaryOp};
use crate::tensor::Tensor;

/// Backward step of `a * b`: `dA = g * b`, `dB = g * a`, each reduced to its
/// input's shape.
#[derive(Debug)]
struct MulBackward;

impl BackwardFn for MulBackward {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        let b = ctx.saved(1)?;
        let grad_a = mul_op(grad_output, b)?.reduce_to_shape(&a.shape())?;
        let grad_b = mul_op(grad_output, a)?.reduce_to_shape(&b.shape())?;
        Ok(vec![grad_a, grad_b])
    }
}

/// Element-wise `a * b` with broadcasting. Nothing is recorded.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_binary(BinaryOp::Multiply, a, b)
}

/// Element-wise `a * b`, recorded in `graph` when an input requires grad.
pub fn multiply(graph: &mut GraphContext, a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a, b], MulBackward, || mul_op(a, b))
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
