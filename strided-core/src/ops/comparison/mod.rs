//! Element-wise comparisons. Results are boolean tensors and are never
//! recorded in a graph.

pub mod equal;
pub mod ne;

pub use equal::equal_op;
pub use ne::ne_op;
