use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::buffer::{read_buffer, try_alloc, Buffer};
use crate::dispatch::{dispatch_unary, UnaryVisitor};
use crate::element::{Element, Numeric};
use crate::error::StridedError;
use crate::kernels::reduction;
use crate::ops::reduction::utils::{plan_reduction, ReductionPlan};
use crate::tensor::Tensor;
use crate::types::DType;

/// Backward step of a sum: the output gradient is spread back over the
/// reduced axis (or over every element for a full reduction).
#[derive(Debug)]
struct SumBackward {
    axis: Option<usize>,
}

impl BackwardFn for SumBackward {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let input_shape = ctx.saved(0)?.shape();
        let kept = match self.axis {
            Some(axis) => {
                let mut kept = input_shape.clone();
                kept[axis] = 1;
                kept
            }
            None => vec![1; input_shape.len()],
        };
        let grad = grad_output.reshape(kept)?.broadcast_to(&input_shape)?.copy()?;
        Ok(vec![grad])
    }
}

struct SumEvaluator<'a> {
    plan: &'a ReductionPlan,
}

impl UnaryVisitor for SumEvaluator<'_> {
    type Output = Result<Buffer, StridedError>;

    fn visit<T: Element>(&mut self, data: &[T]) -> Self::Output {
        let plan = self.plan;
        let mut out = try_alloc(plan.bases.len(), <T::Arith as Numeric>::zero())?;
        for (slot, &base) in out.iter_mut().zip(&plan.bases) {
            reduction::sum(&data[base..], plan.stride, plan.len, slot);
        }
        Ok(Buffer::from_vec(out))
    }
}

/// Sum along `axis`, or over every element with [`REDUCE_ALL`](super::REDUCE_ALL).
///
/// An axis sum drops that axis; a full sum returns shape `[1]`. Booleans are
/// summed as `int32`. Nothing is recorded.
///
/// # Errors
/// `InvalidAxis` if `axis` is not below the rank.
pub fn sum_op(a: &Tensor, axis: Option<usize>) -> Result<Tensor, StridedError> {
    let mut source = a.clone();
    if axis.is_none() && !source.is_contiguous() {
        source = source.copy()?;
    }
    if source.dtype() == DType::Bool {
        source = source.to_dtype(DType::I32)?;
    }
    let (dtype, desc, buffer) = source.parts();
    let plan = plan_reduction(&desc, axis)?;
    let out = dispatch_unary(&read_buffer(&buffer), &mut SumEvaluator { plan: &plan })?;
    log::trace!("sum: {} {:?} axis {:?} -> {:?}", dtype, desc.shape, axis, plan.out_shape);
    Tensor::from_buffer(out, plan.out_shape)
}

/// Sum along `axis` (or everything), recorded in `graph` when `a` requires grad.
pub fn sum(graph: &mut GraphContext, a: &Tensor, axis: Option<usize>) -> Result<Tensor, StridedError> {
    apply(graph, &[a], SumBackward { axis }, || sum_op(a, axis))
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
