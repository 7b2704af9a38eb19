use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::elementwise::{evaluate_binary, BinaryOp};
use crate::tensor::Tensor;

/// Backward step of `a + b`: the output gradient flows unchanged to both
/// inputs, summed over the dims each one was broadcast along.
#[derive(Debug)]
struct AddBackward;

impl BackwardFn for AddBackward {
    fn name(&self) -> &'static str {
        "add"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        let b = ctx.saved(1)?;
        Ok(vec![
            grad_output.reduce_to_shape(&a.shape())?,
            grad_output.reduce_to_shape(&b.shape())?,
        ])
    }
}

/// Element-wise `a + b` with broadcasting. Nothing is recorded.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_binary(BinaryOp::Add, a, b)
}

/// Element-wise `a + b`, recorded in `graph` when an input requires grad.
///
/// # Errors
/// `BroadcastError` if the shapes are not compatible.
pub fn add(graph: &mut GraphContext, a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a, b], AddBackward, || add_op(a, b))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
