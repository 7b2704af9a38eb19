//! # Tensor operations (`ops`)
//!
//! Operations are grouped by family. Each family module follows the same
//! layout:
//!
//! - an `xxx_op` function that only evaluates: it never touches a graph and
//!   is what other operations and backward steps call internally;
//! - an `XxxBackward` struct implementing
//!   [`BackwardFn`](crate::autograd::BackwardFn), holding whatever non-tensor
//!   parameters the gradient needs (an axis, a shape);
//! - a recording function taking `&mut GraphContext` that wraps `xxx_op`
//!   through [`autograd::apply`](crate::autograd).
//!
//! Binary evaluators broadcast operands through per-element offset arrays
//! (see [`elementwise`]). Every recording operation returns a fresh buffer so
//! that its output has a graph identity of its own.

pub mod arithmetic;
pub mod comparison;
pub mod concat;
pub mod elementwise;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;
