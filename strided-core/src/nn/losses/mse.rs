use crate::autograd::GraphContext;
use crate::error::StridedError;
use crate::nn::losses::Reduction;
use crate::ops::arithmetic::{divide, multiply, subtract};
use crate::ops::reduction::{sum, REDUCE_ALL};
use crate::tensor::{scalar, Tensor};

/// Mean squared error between `input` and `target`, recorded in the graph.
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    /// Returns a `[1]`-shaped loss.
    ///
    /// # Errors
    /// `BroadcastError` if the shapes are not compatible.
    pub fn calculate(
        &self,
        graph: &mut GraphContext,
        input: &Tensor,
        target: &Tensor,
    ) -> Result<Tensor, StridedError> {
        let diff = subtract(graph, input, target)?;
        let squared = multiply(graph, &diff, &diff)?;
        let numel = squared.numel();
        let total = sum(graph, &squared, REDUCE_ALL)?;
        match self.reduction {
            Reduction::Sum => Ok(total),
            Reduction::Mean => divide(graph, &total, &scalar(numel as f64)?),
        }
    }
}
