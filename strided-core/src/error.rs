use crate::types::DType;
use thiserror::Error;

/// Error type shared by every fallible operation of the engine.
///
/// Variants are grouped by the class of failure: shape errors, bounds errors,
/// allocation failures, type errors and autograd graph-state errors.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum StridedError {
    // --- Shape errors ---
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Cannot reshape tensor of shape {from:?} ({from_numel} elements) into {to:?} ({to_numel} elements)")]
    ReshapeSizeMismatch {
        from: Vec<usize>,
        to: Vec<usize>,
        from_numel: usize,
        to_numel: usize,
    },

    #[error("Concat dimension mismatch along axis {axis}: {shape1:?} and {shape2:?}")]
    ConcatShapeMismatch {
        axis: usize,
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Matmul inner dimension mismatch: {shape1:?} @ {shape2:?}")]
    MatmulInnerMismatch {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Invalid axis {axis} for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Rank mismatch: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    // --- Bounds errors ---
    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Buffer index {index} out of range for buffer of length {len}")]
    BufferIndexOutOfBounds { index: usize, len: usize },

    #[error("Linear index {index} does not fit shape {shape:?}")]
    UnravelIndexOutOfDomain { index: usize, shape: Vec<usize> },

    // --- Allocation ---
    #[error("Failed to allocate a buffer of {requested} elements")]
    AllocationFailure { requested: usize },

    // --- Type errors ---
    #[error("Scalar conversion requires a single-element tensor, got {numel} elements")]
    ScalarConversion { numel: usize },

    #[error("Unsupported dtype {dtype} for operation {operation}")]
    UnsupportedDType { dtype: DType, operation: String },

    #[error("DType mismatch: expected {expected}, got {actual}")]
    DTypeMismatch { expected: DType, actual: DType },

    // --- Graph-state errors ---
    #[error("Tensor has no gradient (requires_grad was never enabled)")]
    NoGradient,

    #[error("Tensor has no backward function")]
    MissingBackwardFn,

    #[error("Shape mismatch during gradient propagation: expected {expected:?}, got {actual:?}")]
    GradientShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Backward function {name} returned {actual} gradients for {expected} saved inputs")]
    GradientCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    // --- Policy / misc ---
    #[error("Tensor is not editable; assignment through this handle is not allowed")]
    NotEditable,

    #[error("Cannot concatenate an empty list of tensors")]
    EmptyTensorList,

    #[error("Invalid range: start {start}, stop {stop}, step {step}")]
    InvalidRange { start: f64, stop: f64, step: f64 },

    #[error("Division by zero error")]
    DivisionByZero,

    #[error("Internal error: {0}")]
    InternalError(String),
}
