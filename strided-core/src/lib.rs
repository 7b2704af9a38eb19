//! A type-erased, strided n-dimensional tensor engine with reverse-mode
//! automatic differentiation.
//!
//! Tensors are handles over shared, reference-counted buffers described by an
//! offset, a shape and per-dimension strides. Element types are resolved at
//! runtime from a closed set (`bool`, `uint8`, `int32`, `float64`,
//! `complex128`) and dispatched to generic kernels.

pub mod autograd;
pub mod buffer;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod functional;
pub mod kernels;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

pub use autograd::GraphContext;
pub use buffer::Buffer;
pub use error::StridedError;
pub use tensor::{
    arange, empty, from_vec, full, full_like, ones, ones_like, randn, randn_seeded, scalar, zeros,
    zeros_like, Tensor,
};
pub use types::{DType, Scalar};

// Element types appear in public signatures.
pub use num_complex;
pub use num_traits;
