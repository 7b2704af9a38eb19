use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::arithmetic::div_op;
use crate::ops::elementwise::{evaluate_unary, UnaryOp};
use crate::tensor::Tensor;

/// Backward step of `ln(a)`: `dA = g / a`.
#[derive(Debug)]
struct LnBackward;

impl BackwardFn for LnBackward {
    fn name(&self) -> &'static str {
        "log"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        Ok(vec![div_op(grad_output, a)?])
    }
}

/// Element-wise natural logarithm. `ln(0)` is `-inf`, negative inputs give
/// NaN. Nothing is recorded.
pub fn ln_op(a: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_unary(UnaryOp::Log, a)
}

/// Element-wise natural logarithm, recorded in `graph` when `a` requires grad.
pub fn log(graph: &mut GraphContext, a: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a], LnBackward, || ln_op(a))
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
