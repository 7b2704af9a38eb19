// src/tensor/mod.rs

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::autograd::NodeKey;
use crate::buffer::{Buffer, SharedBuffer};
use crate::element::Element;
use crate::error::StridedError;
use crate::tensor_data::{ArrayDesc, TensorData, TensorFlags};
use crate::types::DType;

mod autograd_methods;
mod traits;
mod view_methods;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{
    arange, empty, from_vec, full, full_like, ones, ones_like, randn, randn_seeded, scalar, zeros,
    zeros_like,
};

/// Type-erased, strided, n-dimensional tensor handle.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** cloning a `Tensor` clones the handle, not the
///     elements. Both clones are the same graph node.
/// 2.  **Interior Mutability:** flags and the accumulated `grad` can change
///     through a shared reference.
///
/// The element type is a runtime [`DType`] tag. The elements themselves live
/// in a [`Buffer`] that views and shallow copies share.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a contiguous tensor that owns `data`.
    ///
    /// # Errors
    /// `TensorCreationError` if `data.len()` is not the product of `shape`.
    pub fn new<T: Element>(data: Vec<T>, shape: Vec<usize>) -> Result<Self, StridedError> {
        Tensor::from_buffer(Buffer::from_vec(data), shape)
    }

    pub(crate) fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, StridedError> {
        Ok(Tensor::from_data(TensorData::new(buffer, shape)?))
    }

    pub(crate) fn from_data(data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Acquires a read lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read_data().desc.shape.clone()
    }

    pub fn strides(&self) -> Vec<usize> {
        self.read_data().desc.strides.clone()
    }

    /// Position of the first element inside the shared buffer.
    pub fn offset(&self) -> usize {
        self.read_data().desc.offset
    }

    pub fn desc(&self) -> ArrayDesc {
        self.read_data().desc.clone()
    }

    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    pub fn rank(&self) -> usize {
        self.read_data().desc.rank()
    }

    pub fn flags(&self) -> TensorFlags {
        self.read_data().flags
    }

    pub fn is_contiguous(&self) -> bool {
        self.read_data().flags.is_contiguous
    }

    pub fn owns_data(&self) -> bool {
        self.read_data().flags.owns_data
    }

    pub fn is_view(&self) -> bool {
        self.read_data().flags.is_view
    }

    pub fn is_editable(&self) -> bool {
        self.read_data().flags.is_editable
    }

    pub fn is_leaf(&self) -> bool {
        self.read_data().flags.is_leaf
    }

    /// Allows or forbids writes through this handle (`assign`, `set`).
    pub fn set_editable(&self, editable: bool) {
        self.write_data().flags.is_editable = editable;
    }

    /// True if both handles point at the same `TensorData`.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// True if both handles read from the same buffer.
    pub fn shares_buffer(&self, other: &Tensor) -> bool {
        let (_, _, mine) = self.parts();
        let (_, _, theirs) = other.parts();
        Arc::ptr_eq(&mine, &theirs)
    }

    /// Snapshot of dtype, descriptor and buffer handle, taken under one read lock.
    pub(crate) fn parts(&self) -> (DType, ArrayDesc, SharedBuffer) {
        let guard = self.read_data();
        (guard.dtype, guard.desc.clone(), Arc::clone(&guard.buffer))
    }

    /// Identity of this handle in a `GraphContext`.
    pub fn node_key(&self) -> NodeKey {
        let guard = self.read_data();
        NodeKey::new(&guard.buffer, guard.flags.requires_grad)
    }
}
