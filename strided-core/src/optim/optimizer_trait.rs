use crate::error::StridedError;

/// Common interface of all optimizers.
pub trait Optimizer {
    /// Applies one update to every managed parameter that has a gradient.
    fn step(&mut self) -> Result<(), StridedError>;

    /// Resets the gradients of all managed parameters to zero.
    ///
    /// Typically called before each backward pass so gradients from earlier
    /// passes do not accumulate.
    fn zero_grad(&mut self) -> Result<(), StridedError>;
}
