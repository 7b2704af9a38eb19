use crate::error::StridedError;
use crate::ops::arithmetic::{div_op, neg_op};
use crate::ops::reduction::{sum_op, REDUCE_ALL};
use crate::nn::losses::Reduction;
use crate::tensor::{scalar, zeros, Tensor};
use crate::types::DType;

/// Negative log-likelihood loss over a batch of class ids.
///
/// For each batch item `i` the loss slot `i` is filled from `-input[target[i]]`
/// with ordinary assignment semantics: the selected slice is read into the
/// one-element slot, which keeps its first element. The slots are then
/// summed, or averaged over the batch.
///
/// This loss is computed outside the graph.
#[derive(Debug, Clone, Default)]
pub struct NLLLoss {
    reduction: Reduction,
}

impl NLLLoss {
    pub fn new(reduction: Reduction) -> Self {
        NLLLoss { reduction }
    }

    /// # Errors
    /// - `RankMismatch` if `target` is not 1-D or `input` is rank 0.
    /// - `ShapeMismatch` if the leading dims of `input` and `target` differ.
    /// - `UnsupportedDType` if `target` does not hold integral class ids.
    /// - `IndexOutOfBounds` for a negative class id (reported at its position
    ///   in `target`) or one outside `input`.
    pub fn calculate(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, StridedError> {
        if target.rank() != 1 {
            return Err(StridedError::RankMismatch {
                expected: 1,
                actual: target.rank(),
            });
        }
        if input.rank() == 0 {
            return Err(StridedError::RankMismatch {
                expected: 2,
                actual: 0,
            });
        }
        let batch_size = target.shape()[0];
        if input.shape()[0] != batch_size {
            return Err(StridedError::ShapeMismatch {
                expected: vec![batch_size],
                actual: input.shape(),
                operation: "nll_loss".to_string(),
            });
        }
        let target_dtype = target.dtype();
        if matches!(target_dtype, DType::F64 | DType::C128 | DType::None) {
            return Err(StridedError::UnsupportedDType {
                dtype: target_dtype,
                operation: "nll_loss target".to_string(),
            });
        }

        let losses = zeros(&[batch_size], input.dtype().common(DType::F64))?;
        losses.set_editable(true);
        for i in 0..batch_size {
            let id = target.get(&[i])?.to_f64();
            if id < 0.0 {
                return Err(StridedError::IndexOutOfBounds {
                    index: vec![i],
                    shape: target.shape(),
                });
            }
            let class = id as usize;
            losses.index(i)?.assign(&neg_op(&input.index(class)?)?)?;
        }
        let total = sum_op(&losses, REDUCE_ALL)?;
        match self.reduction {
            Reduction::Sum => Ok(total),
            Reduction::Mean => div_op(&total, &scalar(batch_size as f64)?),
        }
    }
}
