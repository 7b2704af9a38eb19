use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::buffer::{try_alloc, Buffer};
use crate::dispatch::{dispatch_binary, BinaryVisitor};
use crate::element::{Element, Numeric, Promote};
use crate::error::StridedError;
use crate::kernels::matmul as kernel;
use crate::tensor::utils::{broadcast_shapes, shape_to_size};
use crate::tensor::Tensor;

/// Operand and output shapes of a (batched) matrix product.
///
/// A rank-1 left operand is treated as a single row and a rank-1 right
/// operand as a single column. Leading (batch) dims broadcast.
#[derive(Debug, Clone, PartialEq)]
struct MatmulShapes {
    /// Left operand after rank promotion, before batch broadcasting.
    left: Vec<usize>,
    /// Right operand after rank promotion, before batch broadcasting.
    right: Vec<usize>,
    batch: Vec<usize>,
    rows: usize,
    inner: usize,
    cols: usize,
}

impl MatmulShapes {
    fn new(a: &[usize], b: &[usize]) -> Result<Self, StridedError> {
        if a.is_empty() || b.is_empty() {
            return Err(StridedError::RankMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let mut left = a.to_vec();
        if left.len() == 1 {
            left.insert(0, 1);
        }
        let mut right = b.to_vec();
        if right.len() == 1 {
            right.push(1);
        }
        let (l, r) = (left.len(), right.len());
        let (rows, inner) = (left[l - 2], left[l - 1]);
        let (inner_b, cols) = (right[r - 2], right[r - 1]);
        if inner != inner_b {
            return Err(StridedError::MatmulInnerMismatch {
                shape1: a.to_vec(),
                shape2: b.to_vec(),
            });
        }
        let batch = broadcast_shapes(&left[..l - 2], &right[..r - 2]).map_err(|_| {
            StridedError::BroadcastError {
                shape1: a.to_vec(),
                shape2: b.to_vec(),
            }
        })?;
        Ok(MatmulShapes {
            left,
            right,
            batch,
            rows,
            inner,
            cols,
        })
    }

    fn with_batch(&self, tail: [usize; 2]) -> Vec<usize> {
        let mut shape = self.batch.clone();
        shape.extend_from_slice(&tail);
        shape
    }

    fn output(&self) -> Vec<usize> {
        self.with_batch([self.rows, self.cols])
    }
}

struct MatmulEvaluator {
    batches: usize,
    rows: usize,
    inner: usize,
    cols: usize,
}

impl BinaryVisitor for MatmulEvaluator {
    type Output = Result<Buffer, StridedError>;

    fn visit<T1, T2>(&mut self, a: &[T1], b: &[T2]) -> Self::Output
    where
        T1: Promote<T2>,
        T2: Element,
    {
        let (rows, inner, cols) = (self.rows, self.inner, self.cols);
        let (a_block, b_block, c_block) = (rows * inner, inner * cols, rows * cols);
        let mut out = try_alloc(
            self.batches * c_block,
            <<T1 as Promote<T2>>::Output as Numeric>::zero(),
        )?;
        for i in 0..self.batches {
            kernel::matmul(
                &a[i * a_block..(i + 1) * a_block],
                &b[i * b_block..(i + 1) * b_block],
                rows,
                inner,
                cols,
                &mut out[i * c_block..(i + 1) * c_block],
            );
        }
        Ok(Buffer::from_vec(out))
    }
}

/// Backward step of `a @ b`: `dA = g @ b^T`, `dB = a^T @ g`, each summed over
/// broadcast batch dims and reshaped back to the input's shape.
#[derive(Debug)]
struct MatmulBackward;

impl BackwardFn for MatmulBackward {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        let b = ctx.saved(1)?;
        let shapes = MatmulShapes::new(&a.shape(), &b.shape())?;
        let left = a.reshape(shapes.left.clone())?;
        let right = b.reshape(shapes.right.clone())?;

        let grad_a = matmul_op(grad_output, &right.t())?
            .reduce_to_shape(&shapes.left)?
            .reshape(a.shape())?;
        let grad_b = matmul_op(&left.t(), grad_output)?
            .reduce_to_shape(&shapes.right)?
            .reshape(b.shape())?;
        Ok(vec![grad_a, grad_b])
    }
}

/// Matrix product following NumPy `matmul` broadcasting.
///
/// The last two dims of each operand are the matrix; all leading dims are
/// batch dims and broadcast against each other. The result always ends in
/// `(rows, cols)`: a rank-1 operand keeps its promoted size-1 dim, so two
/// vectors multiply to shape `[1, 1]`. Nothing is recorded.
///
/// # Errors
/// - `RankMismatch` for a rank-0 operand.
/// - `MatmulInnerMismatch` if the contracted dims differ.
/// - `BroadcastError` if the batch dims do not broadcast.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    let shapes = MatmulShapes::new(&a.shape(), &b.shape())?;
    let a_full = a
        .reshape(shapes.left.clone())?
        .broadcast_to(&shapes.with_batch([shapes.rows, shapes.inner]))?
        .materialize(a.dtype())?;
    let b_full = b
        .reshape(shapes.right.clone())?
        .broadcast_to(&shapes.with_batch([shapes.inner, shapes.cols]))?
        .materialize(b.dtype())?;
    let mut evaluator = MatmulEvaluator {
        batches: shape_to_size(&shapes.batch),
        rows: shapes.rows,
        inner: shapes.inner,
        cols: shapes.cols,
    };
    let out = dispatch_binary(&a_full, &b_full, &mut evaluator)?;
    log::trace!(
        "matmul: {:?} @ {:?} -> {:?}",
        a.shape(),
        b.shape(),
        shapes.output()
    );
    Tensor::from_buffer(out, shapes.output())
}

/// Matrix product, recorded in `graph` when an input requires grad.
pub fn matmul(graph: &mut GraphContext, a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a, b], MatmulBackward, || matmul_op(a, b))
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
