use crate::autograd::GraphContext;
use crate::error::StridedError;
use crate::nn::module::Module;
use crate::ops::arithmetic::divide;
use crate::ops::math_elem::{exp, log};
use crate::ops::reduction::sum;
use crate::ops::view::reshape;
use crate::tensor::Tensor;

/// `log(exp(x) / sum(exp(x), axis))`.
///
/// Composed from recorded operations, so gradients flow through it without a
/// dedicated backward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSoftmax {
    axis: usize,
}

impl LogSoftmax {
    pub fn new(axis: usize) -> Self {
        LogSoftmax { axis }
    }

    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl Module for LogSoftmax {
    /// # Errors
    /// `InvalidAxis` if the axis is not below the input's rank.
    fn forward(&self, graph: &mut GraphContext, input: &Tensor) -> Result<Tensor, StridedError> {
        let exps = exp(graph, input)?;
        let totals = sum(graph, &exps, Some(self.axis))?;
        let mut kept = input.shape();
        kept[self.axis] = 1;
        let totals = reshape(graph, &totals, kept)?;
        let probs = divide(graph, &exps, &totals)?;
        log(graph, &probs)
    }
}
