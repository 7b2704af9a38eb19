//! Optimizers that update parameters from their accumulated gradients.
//!
//! Updates are written in place into each parameter's storage and are not
//! recorded in any graph.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::SGD;
