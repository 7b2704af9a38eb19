use crate::autograd::GraphContext;
use crate::error::StridedError;
use crate::tensor::Tensor;

/// A network component whose forward pass records into a [`GraphContext`].
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Runs the forward pass, recording every differentiable step in `graph`.
    fn forward(&self, graph: &mut GraphContext, input: &Tensor) -> Result<Tensor, StridedError>;

    /// Handles on the learnable tensors of this module.
    ///
    /// The handles share storage with the module, so updating them in place
    /// updates the module.
    fn parameters(&self) -> Vec<Tensor> {
        Vec::new()
    }

    /// Parameters with their names, in the order of [`Module::parameters`].
    fn named_parameters(&self) -> Vec<(String, Tensor)> {
        Vec::new()
    }
}
