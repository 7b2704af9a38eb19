use std::sync::Arc;

use num_complex::Complex64;

use crate::buffer::{read_buffer, write_buffer};
use crate::element::Element;
use crate::error::StridedError;
use crate::tensor::broadcast_utils::{materialize, strided_copy};
use crate::tensor::utils::{calculate_strides, check_axis, shape_to_size};
use crate::tensor::Tensor;
use crate::tensor_data::{ArrayDesc, TensorData};
use crate::types::{DType, Scalar};

/// Views, copies and element access.
///
/// View methods share the buffer and return a handle flagged `is_view`. They
/// never record anything in a graph; the differentiable counterparts live in
/// `ops::view`.
impl Tensor {
    fn view_with(&self, desc: ArrayDesc, is_editable: bool) -> Tensor {
        let guard = self.read_data();
        Tensor::from_data(TensorData::new_view(
            Arc::clone(&guard.buffer),
            guard.dtype,
            desc,
            is_editable,
        ))
    }

    /// Same elements under a new shape.
    ///
    /// Contiguous tensors are reshaped as a view. Anything else is first
    /// materialized into a fresh contiguous buffer.
    ///
    /// # Errors
    /// `ReshapeSizeMismatch` if the element counts differ.
    pub fn reshape(&self, shape: Vec<usize>) -> Result<Tensor, StridedError> {
        let (dtype, desc, buffer) = self.parts();
        let from_numel = desc.numel();
        let to_numel = shape_to_size(&shape);
        if from_numel != to_numel {
            return Err(StridedError::ReshapeSizeMismatch {
                from: desc.shape,
                to: shape,
                from_numel,
                to_numel,
            });
        }
        if desc.is_contiguous() {
            let view = ArrayDesc {
                offset: desc.offset,
                strides: calculate_strides(&shape),
                shape,
            };
            return Ok(self.view_with(view, self.is_editable()));
        }
        let data = materialize(&read_buffer(&buffer), &desc, dtype)?;
        Tensor::from_buffer(data, shape)
    }

    /// Reverses the order of all axes.
    pub fn transpose(&self) -> Tensor {
        let mut desc = self.desc();
        desc.shape.reverse();
        desc.strides.reverse();
        self.view_with(desc, self.is_editable())
    }

    /// Swaps the last two axes. Tensors of rank below 2 come back as a plain view.
    pub fn t(&self) -> Tensor {
        let rank = self.rank();
        if rank < 2 {
            return self.view_with(self.desc(), self.is_editable());
        }
        let mut desc = self.desc();
        desc.shape.swap(rank - 2, rank - 1);
        desc.strides.swap(rank - 2, rank - 1);
        self.view_with(desc, self.is_editable())
    }

    pub fn swap_axes(&self, dim0: usize, dim1: usize) -> Result<Tensor, StridedError> {
        let rank = self.rank();
        check_axis(dim0, rank)?;
        check_axis(dim1, rank)?;
        let mut desc = self.desc();
        desc.shape.swap(dim0, dim1);
        desc.strides.swap(dim0, dim1);
        Ok(self.view_with(desc, self.is_editable()))
    }

    /// Read-only view repeating size-1 and missing leading dims up to `shape`.
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Tensor, StridedError> {
        let desc = self.desc().broadcast_to(shape)?;
        Ok(self.view_with(desc, false))
    }

    /// Selects `i` along axis 0 and drops that axis. A 1-D tensor yields a `{1}` view.
    pub fn index(&self, i: usize) -> Result<Tensor, StridedError> {
        let desc = self.desc();
        if desc.rank() == 0 {
            return Err(StridedError::RankMismatch {
                expected: 1,
                actual: 0,
            });
        }
        if i >= desc.shape[0] {
            return Err(StridedError::IndexOutOfBounds {
                index: vec![i],
                shape: desc.shape,
            });
        }
        let offset = desc.offset + i * desc.strides[0];
        let view = if desc.rank() == 1 {
            ArrayDesc {
                offset,
                shape: vec![1],
                strides: vec![1],
            }
        } else {
            ArrayDesc {
                offset,
                shape: desc.shape[1..].to_vec(),
                strides: desc.strides[1..].to_vec(),
            }
        };
        Ok(self.view_with(view, self.is_editable()))
    }

    /// View of `start..end` along `axis`.
    pub fn slice(&self, axis: usize, start: usize, end: usize) -> Result<Tensor, StridedError> {
        let mut desc = self.desc();
        check_axis(axis, desc.rank())?;
        if start > end || end > desc.shape[axis] {
            return Err(StridedError::IndexOutOfBounds {
                index: vec![start, end],
                shape: desc.shape,
            });
        }
        desc.offset += start * desc.strides[axis];
        desc.shape[axis] = end - start;
        Ok(self.view_with(desc, self.is_editable()))
    }

    /// This handle if it is already contiguous, otherwise a contiguous copy.
    pub fn contiguous(&self) -> Result<Tensor, StridedError> {
        if self.is_contiguous() {
            return Ok(self.clone());
        }
        self.copy()
    }

    /// Deep, contiguous, owning copy with the same dtype.
    pub fn copy(&self) -> Result<Tensor, StridedError> {
        self.to_dtype(self.dtype())
    }

    /// New handle on the same buffer and descriptor with fresh flags and no grad.
    pub fn shallow_copy(&self) -> Tensor {
        self.view_with(self.desc(), false)
    }

    /// Deep copy with every element converted to `dtype`.
    pub fn to_dtype(&self, dtype: DType) -> Result<Tensor, StridedError> {
        let shape = self.shape();
        Tensor::from_buffer(self.materialize(dtype)?, shape)
    }

    /// Writes `src` element-wise into this tensor's region of its buffer.
    ///
    /// `src` must broadcast onto this tensor's shape. Values are converted to
    /// this tensor's dtype.
    ///
    /// # Errors
    /// `NotEditable` if writes through this handle are not allowed, or a
    /// shape error if `src` does not line up.
    pub fn assign(&self, src: &Tensor) -> Result<(), StridedError> {
        if !self.is_editable() {
            return Err(StridedError::NotEditable);
        }
        self.assign_unchecked(src)
    }

    pub(crate) fn assign_unchecked(&self, src: &Tensor) -> Result<(), StridedError> {
        let (_, dst_desc, dst_buffer) = self.parts();
        let (src_dtype, src_desc, src_buffer) = src.parts();
        if Arc::ptr_eq(&dst_buffer, &src_buffer) {
            // Stage the source so reads never see partially written output.
            let staged = materialize(&read_buffer(&src_buffer), &src_desc, src_dtype)?;
            let staged_desc = ArrayDesc::contiguous(src_desc.shape);
            let mut dst = write_buffer(&dst_buffer);
            return strided_copy(&staged, &staged_desc, &mut dst, &dst_desc);
        }
        let src_guard = read_buffer(&src_buffer);
        let mut dst = write_buffer(&dst_buffer);
        strided_copy(&src_guard, &src_desc, &mut dst, &dst_desc)
    }

    /// Element at `coords`.
    pub fn get(&self, coords: &[usize]) -> Result<Scalar, StridedError> {
        let (_, desc, buffer) = self.parts();
        let offset = desc.offset_of(coords)?;
        let value = read_buffer(&buffer).get(offset)?;
        Ok(value)
    }

    /// Overwrites the element at `coords`, converting `value` to this tensor's dtype.
    pub fn set(&self, coords: &[usize], value: impl Into<Scalar>) -> Result<(), StridedError> {
        if !self.is_editable() {
            return Err(StridedError::NotEditable);
        }
        let (_, desc, buffer) = self.parts();
        let offset = desc.offset_of(coords)?;
        write_buffer(&buffer).set(offset, value.into())?;
        Ok(())
    }

    /// The single element of a one-element tensor, converted to `T`.
    pub fn item<T: Element>(&self) -> Result<T, StridedError> {
        let (_, desc, buffer) = self.parts();
        let numel = desc.numel();
        if numel != 1 {
            return Err(StridedError::ScalarConversion { numel });
        }
        let value = read_buffer(&buffer).get(desc.offset)?;
        Ok(T::from_scalar(value))
    }

    /// All elements in row-major order, converted to `T`.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, StridedError> {
        Ok(self.materialize(self.dtype())?.to_vec::<T>())
    }

    /// Same shape and every pair of elements within `tol` of each other.
    pub fn allclose(&self, other: &Tensor, tol: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        match (self.to_vec::<Complex64>(), other.to_vec::<Complex64>()) {
            (Ok(a), Ok(b)) => a.iter().zip(&b).all(|(x, y)| (x - y).norm() <= tol),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "view_methods_test.rs"]
mod tests;
