use std::sync::Arc;

use crate::autograd::{BackwardFn, GraphContext};
use crate::error::StridedError;
use crate::ops::arithmetic::add_op;
use crate::tensor::create::zeros;
use crate::tensor::Tensor;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().flags.requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    ///
    /// Switching it on for a leaf allocates a zero-filled `grad` of the same
    /// shape and dtype, once. On a produced tensor the flag changes its graph
    /// identity but no accumulator is allocated.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), StridedError> {
        let (is_leaf, has_grad) = {
            let mut guard = self.write_data();
            guard.flags.requires_grad = requires_grad;
            (guard.flags.is_leaf, guard.grad.is_some())
        };
        if !requires_grad {
            return Ok(());
        }
        if !is_leaf {
            log::warn!(
                "requires_grad set on a non-leaf tensor of shape {:?}; gradients will not accumulate here",
                self.shape()
            );
            return Ok(());
        }
        if !has_grad {
            let grad = zeros(&self.shape(), self.dtype())?;
            self.write_data().grad = Some(grad);
        }
        Ok(())
    }

    /// The accumulated gradient.
    ///
    /// # Errors
    /// `NoGradient` if gradients were never enabled on this tensor.
    pub fn grad(&self) -> Result<Tensor, StridedError> {
        self.read_data().grad.clone().ok_or(StridedError::NoGradient)
    }

    /// The backward step of the operation that produced this tensor.
    ///
    /// # Errors
    /// `MissingBackwardFn` for leaves and for outputs of unrecorded operations.
    pub fn grad_fn(&self) -> Result<Arc<dyn BackwardFn>, StridedError> {
        self.read_data()
            .grad_fn
            .clone()
            .ok_or(StridedError::MissingBackwardFn)
    }

    /// Resets the accumulated gradient to zero, keeping the allocation.
    pub fn zero_grad(&self) -> Result<(), StridedError> {
        let grad = self.grad()?;
        let zero = zeros(&[], grad.dtype())?;
        grad.assign_unchecked(&zero)
    }

    /// `grad += incoming`, in place, in this tensor's dtype.
    ///
    /// The accumulator is allocated on first use if it does not exist yet.
    pub fn accumulate_grad(&self, incoming: &Tensor) -> Result<(), StridedError> {
        let expected = self.shape();
        let actual = incoming.shape();
        if expected != actual {
            return Err(StridedError::GradientShapeMismatch { expected, actual });
        }
        let existing = self.read_data().grad.clone();
        let grad = match existing {
            Some(grad) => grad,
            None => {
                let grad = zeros(&expected, self.dtype())?;
                self.write_data().grad = Some(grad.clone());
                grad
            }
        };
        let sum = add_op(&grad, incoming)?;
        grad.assign_unchecked(&sum)?;
        log::debug!("accumulated gradient into leaf of shape {:?}", expected);
        Ok(())
    }

    /// Runs a backward pass from this tensor through `graph`.
    ///
    /// See [`GraphContext::backward`].
    pub fn backward(&self, graph: &mut GraphContext, grad: &Tensor) -> Result<(), StridedError> {
        graph.backward(self, grad)
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
