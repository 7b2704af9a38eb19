//! Differentiable counterparts of the shape-changing views.
//!
//! [`Tensor::reshape`], [`Tensor::transpose`] and [`Tensor::broadcast_to`]
//! share their input's buffer and never record anything. The functions here
//! copy the view into a fresh buffer so the result can be recorded as a node
//! of its own.

pub mod expand;
pub mod reshape;
pub mod transpose;

pub use expand::{broadcast_to, broadcast_to_op};
pub use reshape::{reshape, reshape_op};
pub use transpose::{transpose, transpose_op};
