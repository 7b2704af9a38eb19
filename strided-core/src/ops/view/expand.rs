use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::tensor::Tensor;

/// Backward step of a broadcast: the gradient is summed over every dim that
/// was added or stretched.
#[derive(Debug)]
struct ExpandBackward;

impl BackwardFn for ExpandBackward {
    fn name(&self) -> &'static str {
        "broadcast_to"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let input_shape = ctx.saved(0)?.shape();
        Ok(vec![grad_output.reduce_to_shape(&input_shape)?])
    }
}

/// Contiguous copy of `a` broadcast to `shape`.
pub fn broadcast_to_op(a: &Tensor, shape: &[usize]) -> Result<Tensor, StridedError> {
    a.broadcast_to(shape)?.copy()
}

/// Broadcast recorded in `graph`.
///
/// # Errors
/// `BroadcastError` if `a` cannot be stretched to `shape`.
pub fn broadcast_to(graph: &mut GraphContext, a: &Tensor, shape: &[usize]) -> Result<Tensor, StridedError> {
    apply(graph, &[a], ExpandBackward, || broadcast_to_op(a, shape))
}

#[cfg(test)]
#[path = "expand_test.rs"]
mod tests;
