use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct ReshapeBackward;

impl BackwardFn for ReshapeBackward {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let input_shape = ctx.saved(0)?.shape();
        Ok(vec![grad_output.reshape(input_shape)?])
    }
}

/// Contiguous copy of `a` under `shape`.
pub fn reshape_op(a: &Tensor, shape: Vec<usize>) -> Result<Tensor, StridedError> {
    a.reshape(shape)?.copy()
}

/// Reshape recorded in `graph`; the gradient is reshaped back.
///
/// # Errors
/// `ReshapeSizeMismatch` if the element counts differ.
pub fn reshape(graph: &mut GraphContext, a: &Tensor, shape: Vec<usize>) -> Result<Tensor, StridedError> {
    apply(graph, &[a], ReshapeBackward, || reshape_op(a, shape))
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
