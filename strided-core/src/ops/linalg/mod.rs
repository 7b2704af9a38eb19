//! Linear algebra.

pub mod matmul;

pub use matmul::{matmul, matmul_op};
