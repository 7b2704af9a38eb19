use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::elementwise::{evaluate_unary, UnaryOp};
use crate::tensor::Tensor;

#[derive(Debug)]
struct NegBackward;

impl BackwardFn for NegBackward {
    fn name(&self) -> &'static str {
        "negate"
    }

    fn backward(&self, _ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        Ok(vec![neg_op(grad_output)?])
    }
}

/// Element-wise `-a`. Unsigned and boolean inputs wrap modulo 256.
pub fn neg_op(a: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_unary(UnaryOp::Negate, a)
}

/// Element-wise `-a`, recorded in `graph` when `a` requires grad.
pub fn negate(graph: &mut GraphContext, a: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a], NegBackward, || neg_op(a))
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
