use crate::buffer::{read_buffer, try_alloc, Buffer};
use crate::dispatch::{dispatch_unary, UnaryVisitor};
use crate::element::Element;
use crate::error::StridedError;
use crate::kernels::reduction;
use crate::ops::reduction::utils::{plan_reduction, ReductionPlan};
use crate::tensor::Tensor;

struct AllEvaluator<'a> {
    plan: &'a ReductionPlan,
}

impl UnaryVisitor for AllEvaluator<'_> {
    type Output = Result<Buffer, StridedError>;

    fn visit<T: Element>(&mut self, data: &[T]) -> Self::Output {
        let plan = self.plan;
        let mut out = try_alloc(plan.bases.len(), true)?;
        for (slot, &base) in out.iter_mut().zip(&plan.bases) {
            reduction::all(&data[base..], plan.stride, plan.len, slot);
        }
        Ok(Buffer::from_vec(out))
    }
}

/// Whether every element along `axis` (or in the whole tensor) is non-zero.
///
/// Returns a `bool` tensor shaped like [`sum_op`](super::sum_op)'s result.
/// An empty run is `true`. Never recorded.
pub fn all_op(a: &Tensor, axis: Option<usize>) -> Result<Tensor, StridedError> {
    let source = if axis.is_none() && !a.is_contiguous() {
        a.copy()?
    } else {
        a.clone()
    };
    let (_, desc, buffer) = source.parts();
    let plan = plan_reduction(&desc, axis)?;
    let out = dispatch_unary(&read_buffer(&buffer), &mut AllEvaluator { plan: &plan })?;
    Tensor::from_buffer(out, plan.out_shape)
}

#[cfg(test)]
#[path = "all_test.rs"]
mod tests;
