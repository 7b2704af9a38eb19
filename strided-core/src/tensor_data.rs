// src/tensor_data.rs
use std::sync::Arc;

use crate::autograd::BackwardFn;
use crate::buffer::{Buffer, SharedBuffer};
use crate::error::StridedError;
use crate::tensor::utils::{calculate_strides, shape_to_size};
use crate::tensor::Tensor;
use crate::types::DType;

/// Shape descriptor: a logical view (offset, shape, strides) over a flat buffer.
///
/// Invariant: `shape.len() == strides.len()`. A descriptor is contiguous iff
/// its strides equal the row-major strides of its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDesc {
    pub offset: usize,
    pub shape: Vec<usize>,
    pub strides: Vec<usize>,
}

impl ArrayDesc {
    /// Row-major descriptor starting at offset 0.
    pub fn contiguous(shape: Vec<usize>) -> Self {
        let strides = calculate_strides(&shape);
        ArrayDesc {
            offset: 0,
            shape,
            strides,
        }
    }

    pub fn numel(&self) -> usize {
        shape_to_size(&self.shape)
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn is_contiguous(&self) -> bool {
        self.strides == calculate_strides(&self.shape)
    }

    /// Buffer offset of the element at `coords`.
    pub fn offset_of(&self, coords: &[usize]) -> Result<usize, StridedError> {
        if coords.len() != self.rank() || coords.iter().zip(&self.shape).any(|(c, d)| c >= d) {
            return Err(StridedError::IndexOutOfBounds {
                index: coords.to_vec(),
                shape: self.shape.clone(),
            });
        }
        Ok(self.offset
            + coords
                .iter()
                .zip(&self.strides)
                .map(|(c, s)| c * s)
                .sum::<usize>())
    }

    /// Buffer offset of every element, in row-major order of this descriptor.
    pub fn offsets(&self) -> Vec<usize> {
        let n = self.numel();
        let mut out = Vec::with_capacity(n);
        if n == 0 {
            return out;
        }
        let rank = self.rank();
        let mut coords = vec![0usize; rank];
        let mut offset = self.offset;
        for _ in 0..n {
            out.push(offset);
            for d in (0..rank).rev() {
                coords[d] += 1;
                offset += self.strides[d];
                if coords[d] < self.shape[d] {
                    break;
                }
                offset -= self.strides[d] * self.shape[d];
                coords[d] = 0;
            }
        }
        out
    }

    /// Descriptor that reads this one as if broadcast to `target`.
    ///
    /// Missing leading dims and stretched size-1 dims get stride 0.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<ArrayDesc, StridedError> {
        let err = || StridedError::BroadcastError {
            shape1: self.shape.clone(),
            shape2: target.to_vec(),
        };
        if self.rank() > target.len() {
            return Err(err());
        }
        let pad = target.len() - self.rank();
        let mut strides = vec![0; target.len()];
        for (i, (&dim, &stride)) in self.shape.iter().zip(&self.strides).enumerate() {
            let t = target[pad + i];
            if dim == t {
                strides[pad + i] = stride;
            } else if dim != 1 {
                return Err(err());
            }
        }
        Ok(ArrayDesc {
            offset: self.offset,
            shape: target.to_vec(),
            strides,
        })
    }

    /// Source descriptor aligned to a destination shape for a strided copy.
    ///
    /// Trailing dims line up. A size-1 source dim reads with stride 0; extra
    /// leading source dims are pinned at coordinate 0. Aligned dims must be
    /// equal, or one of them must be 1.
    pub(crate) fn align_to(&self, dst_shape: &[usize]) -> Result<ArrayDesc, StridedError> {
        let err = || StridedError::BroadcastError {
            shape1: self.shape.clone(),
            shape2: dst_shape.to_vec(),
        };
        let rank = dst_shape.len();
        let src_rank = self.rank();
        let mut strides = vec![0; rank];
        for (j, (&dim, &stride)) in self.shape.iter().zip(&self.strides).enumerate() {
            if j + rank < src_rank {
                if dim == 0 {
                    return Err(err());
                }
                continue;
            }
            let d = j + rank - src_rank;
            let dst_dim = dst_shape[d];
            if dim != dst_dim && (dim == 0 || (dim != 1 && dst_dim != 1)) {
                return Err(err());
            }
            if dim != 1 {
                strides[d] = stride;
            }
        }
        Ok(ArrayDesc {
            offset: self.offset,
            shape: dst_shape.to_vec(),
            strides,
        })
    }
}

/// Independent state bits of a tensor handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TensorFlags {
    pub is_contiguous: bool,
    pub owns_data: bool,
    pub is_view: bool,
    pub is_editable: bool,
    pub requires_grad: bool,
    pub is_leaf: bool,
}

impl TensorFlags {
    /// Flags of a freshly allocated, user-visible tensor.
    pub fn owned() -> Self {
        TensorFlags {
            is_contiguous: true,
            owns_data: true,
            is_leaf: true,
            ..Default::default()
        }
    }

    /// Flags of a view over someone else's buffer.
    pub fn view(is_contiguous: bool, is_editable: bool) -> Self {
        TensorFlags {
            is_contiguous,
            is_view: true,
            is_editable,
            is_leaf: true,
            ..Default::default()
        }
    }
}

/// Internal storage and metadata for a Tensor.
///
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct to allow
/// shared ownership of the handle and interior mutability of its flags and grad.
#[derive(Debug)]
pub struct TensorData {
    /// Scalar type of the elements. Always equals `buffer.dtype()`.
    pub(crate) dtype: DType,
    pub(crate) desc: ArrayDesc,
    /// Shared buffer. Views and shallow copies hold another `Arc` to it.
    pub(crate) buffer: SharedBuffer,
    pub(crate) flags: TensorFlags,
    /// Accumulated gradient, same shape and dtype as this tensor.
    pub(crate) grad: Option<Tensor>,
    /// Backward closure of the operation that produced this tensor.
    pub(crate) grad_fn: Option<Arc<dyn BackwardFn>>,
}

impl TensorData {
    /// Creates an owning, contiguous `TensorData` over `buffer`.
    ///
    /// # Errors
    /// Returns `StridedError::TensorCreationError` if the buffer length does not
    /// match the number of elements in `shape`.
    pub fn new(buffer: Buffer, shape: Vec<usize>) -> Result<Self, StridedError> {
        let data_len = buffer.len();
        if data_len != shape_to_size(&shape) {
            return Err(StridedError::TensorCreationError { data_len, shape });
        }
        Ok(TensorData {
            dtype: buffer.dtype(),
            desc: ArrayDesc::contiguous(shape),
            buffer: buffer.into_shared(),
            flags: TensorFlags::owned(),
            grad: None,
            grad_fn: None,
        })
    }

    /// Creates a view sharing `buffer` under a new descriptor.
    ///
    /// Views never require gradients and have no `grad_fn`.
    pub(crate) fn new_view(buffer: SharedBuffer, dtype: DType, desc: ArrayDesc, is_editable: bool) -> Self {
        let flags = TensorFlags::view(desc.is_contiguous(), is_editable);
        TensorData {
            dtype,
            desc,
            buffer,
            flags,
            grad: None,
            grad_fn: None,
        }
    }

    pub fn numel(&self) -> usize {
        self.desc.numel()
    }

    pub fn is_contiguous(&self) -> bool {
        self.desc.is_contiguous()
    }
}
