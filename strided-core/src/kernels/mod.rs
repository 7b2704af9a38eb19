//! Numeric kernels.
//!
//! Pure functions over typed slices with no shared state. Evaluators in
//! `ops` compute shapes, offsets and output types, then call into these:
//!
//! * elementwise: `op(a, idx_a, b, idx_b, out)` where `idx_*` holds one
//!   buffer offset per output element, so broadcast operands are read in place.
//! * unary: `op(a, idx, out)`.
//! * reduction: `op(a, stride, n, out)`, accumulating into `out`.
//! * matmul: `matmul(a, b, rows, inner, cols, c)` over one dense row-major block.

pub mod elementwise;
pub mod matmul;
pub mod reduction;
pub mod unary;
