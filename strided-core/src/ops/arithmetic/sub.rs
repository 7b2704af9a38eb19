use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::arithmetic::neg_op;
use crate::ops::elementwise::{evaluate_binary, BinaryOp};
use crate::tensor::Tensor;

#[derive(Debug)]
struct SubBackward;

impl BackwardFn for SubBackward {
    fn name(&self) -> &'static str {
        "subtract"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        let b = ctx.saved(1)?;
        let grad_a = grad_output.reduce_to_shape(&a.shape())?;
        let grad_b = neg_op(grad_output)?.reduce_to_shape(&b.shape())?;
        Ok(vec![grad_a, grad_b])
    }
}

/// Element-wise `a - b` with broadcasting. Nothing is recorded.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_binary(BinaryOp::Subtract, a, b)
}

/// Element-wise `a - b`, recorded in `graph` when an input requires grad.
pub fn subtract(graph: &mut GraphContext, a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a, b], SubBackward, || sub_op(a, b))
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
