use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct TransposeBackward;

impl BackwardFn for TransposeBackward {
    fn name(&self) -> &'static str {
        "transpose"
    }

    fn backward(&self, _ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        Ok(vec![grad_output.transpose()])
    }
}

/// Contiguous copy of `a` with all axes reversed.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, StridedError> {
    a.transpose().copy()
}

/// Full transpose recorded in `graph`; the gradient is transposed back.
pub fn transpose(graph: &mut GraphContext, a: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a], TransposeBackward, || transpose_op(a))
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
