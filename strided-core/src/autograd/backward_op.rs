use std::fmt::Debug;

use crate::error::StridedError;
use crate::tensor::Tensor;

/// Inputs saved by the forward step of one differentiable operation.
///
/// The order of the saved tensors is the order in which `backward` must return
/// gradients and the order in which the traversal visits the inputs.
#[derive(Debug, Clone, Default)]
pub struct Context {
    saved: Vec<Tensor>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Appends a handle to `tensor`. The handle shares the tensor's data, it
    /// is not a copy.
    pub fn save_for_backward(&mut self, tensor: &Tensor) {
        self.saved.push(tensor.clone());
    }

    pub fn saved_tensors(&self) -> &[Tensor] {
        &self.saved
    }

    /// The `i`-th saved input.
    pub fn saved(&self, i: usize) -> Result<&Tensor, StridedError> {
        self.saved.get(i).ok_or_else(|| {
            StridedError::InternalError(format!(
                "context holds {} saved tensors, requested index {}",
                self.saved.len(),
                i
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

/// Backward step of a differentiable tensor operation.
///
/// An implementation is stored in the `grad_fn` of every tensor produced by a
/// recorded operation. Given the operation's [`Context`] and the gradient
/// flowing into its output, it computes one gradient per saved input, in the
/// order the inputs were saved.
///
/// Operation parameters that are not tensors (an axis, a target shape) live in
/// the implementing struct itself.
pub trait BackwardFn: Debug + Send + Sync {
    /// Operation name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Computes `dL/dInput_i` for every saved input from `dL/dOutput`.
    ///
    /// Each returned gradient must have the shape of the corresponding input.
    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError>;
}
