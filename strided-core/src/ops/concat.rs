//! Concatenation along an existing axis.
//!
//! With `gap = product(out_shape[axis..])`, operand `k` occupies a block of
//! `product(shape_k[axis..])` elements in every run of `gap` output elements,
//! starting at the sum of the preceding operands' blocks. The copy writes each
//! operand through a descriptor over the output buffer that uses the output's
//! strides, so consecutive blocks of one operand land `gap` elements apart.

use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::buffer::{read_buffer, Buffer};
use crate::error::StridedError;
use crate::tensor::broadcast_utils::strided_copy;
use crate::tensor::utils::{calculate_strides, check_axis};
use crate::tensor::Tensor;
use crate::tensor_data::ArrayDesc;

/// Backward step of a concatenation: the output gradient is split back into
/// one slice per input along the concatenation axis.
#[derive(Debug)]
struct ConcatBackward {
    axis: usize,
}

impl BackwardFn for ConcatBackward {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let mut start = 0;
        let mut grads = Vec::with_capacity(ctx.len());
        for input in ctx.saved_tensors() {
            let end = start + input.shape()[self.axis];
            grads.push(grad_output.slice(self.axis, start, end)?);
            start = end;
        }
        Ok(grads)
    }
}

/// Joins `tensors` along `axis`.
///
/// All operands must have the same rank and agree on every dim except
/// `axis`. The result has the common dtype of the operands. Nothing is
/// recorded.
///
/// # Errors
/// - `EmptyTensorList` for no operands.
/// - `InvalidAxis` if `axis` is not below the rank.
/// - `ConcatShapeMismatch` if two operands disagree off the axis.
pub fn concat_op(tensors: &[&Tensor], axis: usize) -> Result<Tensor, StridedError> {
    let first = tensors.first().ok_or(StridedError::EmptyTensorList)?;
    let first_shape = first.shape();
    check_axis(axis, first_shape.len())?;

    let mut out_shape = first_shape.clone();
    out_shape[axis] = 0;
    let mut dtype = first.dtype();
    for t in tensors {
        let shape = t.shape();
        let compatible = shape.len() == first_shape.len()
            && shape
                .iter()
                .zip(&first_shape)
                .enumerate()
                .all(|(d, (x, y))| d == axis || x == y);
        if !compatible {
            return Err(StridedError::ConcatShapeMismatch {
                axis,
                shape1: first_shape,
                shape2: shape,
            });
        }
        out_shape[axis] += shape[axis];
        dtype = dtype.common(t.dtype());
    }

    let out_strides = calculate_strides(&out_shape);
    let mut out = Buffer::allocate(dtype, out_shape.iter().product())?;
    let mut position = 0;
    for t in tensors {
        let (_, src_desc, src_buffer) = t.parts();
        let dst_desc = ArrayDesc {
            offset: position * out_strides[axis],
            shape: src_desc.shape.clone(),
            strides: out_strides.clone(),
        };
        strided_copy(&read_buffer(&src_buffer), &src_desc, &mut out, &dst_desc)?;
        position += src_desc.shape[axis];
    }
    log::trace!("concat: {} operands along axis {} -> {:?}", tensors.len(), axis, out_shape);
    Tensor::from_buffer(out, out_shape)
}

/// Concatenation recorded in `graph` when any operand requires grad.
pub fn concat(graph: &mut GraphContext, tensors: &[&Tensor], axis: usize) -> Result<Tensor, StridedError> {
    apply(graph, tensors, ConcatBackward { axis }, || concat_op(tensors, axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{full, ones};
    use crate::types::DType;
    use crate::utils::testing::{check_tensor_near, create_test_tensor_with_grad};

    #[test]
    fn test_concat_both_axes() -> Result<(), StridedError> {
        let a = full(&[3, 2], 11, DType::I32)?;
        let b = full(&[3, 2], 2, DType::I32)?;

        let rows = concat_op(&[&a, &b], 0)?;
        assert_eq!(rows.shape(), vec![6, 2]);
        assert_eq!(rows.to_vec::<i32>()?, vec![11, 11, 11, 11, 11, 11, 2, 2, 2, 2, 2, 2]);

        let cols = concat_op(&[&a, &b], 1)?;
        assert_eq!(cols.shape(), vec![3, 4]);
        assert_eq!(cols.to_vec::<i32>()?, vec![11, 11, 2, 2, 11, 11, 2, 2, 11, 11, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_concat_uneven_and_views() -> Result<(), StridedError> {
        let a = Tensor::new(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2])?;
        let b = Tensor::new(vec![5i32, 6], vec![2, 1])?;
        let c = concat_op(&[&a.transpose(), &b, &b], 1)?;
        assert_eq!(c.dtype(), DType::F64);
        check_tensor_near(&c, &[2, 4], &[1.0, 3.0, 5.0, 5.0, 2.0, 4.0, 6.0, 6.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_concat_errors() {
        assert_eq!(concat_op(&[], 0), Err(StridedError::EmptyTensorList));
        let a = ones(&[2, 2], DType::F64).unwrap();
        let b = ones(&[3, 3], DType::F64).unwrap();
        assert!(matches!(
            concat_op(&[&a, &b], 0),
            Err(StridedError::ConcatShapeMismatch { axis: 0, .. })
        ));
        assert_eq!(
            concat_op(&[&a, &a], 2),
            Err(StridedError::InvalidAxis { axis: 2, rank: 2 })
        );
    }

    #[test]
    fn test_concat_backward_splits() -> Result<(), StridedError> {
        let mut graph = GraphContext::new();
        let a = create_test_tensor_with_grad(vec![0.0; 2], vec![1, 2]);
        let b = create_test_tensor_with_grad(vec![0.0; 4], vec![2, 2]);
        let c = concat(&mut graph, &[&a, &b], 0)?;
        let seed = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?;
        c.backward(&mut graph, &seed)?;
        check_tensor_near(&a.grad()?, &[1, 2], &[1.0, 2.0], 0.0);
        check_tensor_near(&b.grad()?, &[2, 2], &[3.0, 4.0, 5.0, 6.0], 0.0);
        Ok(())
    }
}
