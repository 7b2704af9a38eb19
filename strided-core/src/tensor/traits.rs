// src/tensor/traits.rs

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::buffer::read_buffer;
use crate::tensor::Tensor;

/// Number of leading elements shown by `Debug`.
const PREVIEW_LEN: usize = 8;

impl Clone for Tensor {
    /// Shallow clone of the handle: both clones are the same tensor and the
    /// same graph node.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dtype, desc, buffer) = self.parts();
        let flags = self.flags();
        write!(
            f,
            "Tensor(dtype={}, shape={:?}, strides={:?}, offset={}, requires_grad={}, data=[",
            dtype, desc.shape, desc.strides, desc.offset, flags.requires_grad
        )?;
        let offsets = desc.offsets();
        let guard = read_buffer(&buffer);
        for (i, &offset) in offsets.iter().take(PREVIEW_LEN).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match guard.get(offset) {
                Ok(value) => write!(f, "{}", value)?,
                Err(_) => write!(f, "?")?,
            }
        }
        if offsets.len() > PREVIEW_LEN {
            write!(f, ", ... {} elements", offsets.len())?;
        }
        write!(f, "])")
    }
}

impl PartialEq for Tensor {
    /// Same shape, same dtype and equal elements. Strides and flags are ignored.
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.shape() != other.shape() || self.dtype() != other.dtype() {
            return false;
        }
        match (self.materialize(self.dtype()), other.materialize(other.dtype())) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::Tensor;

    #[test]
    fn test_equality_ignores_layout() {
        let a = Tensor::new(vec![1i32, 2, 3, 4], vec![2, 2]).unwrap();
        let b = Tensor::new(vec![1i32, 3, 2, 4], vec![2, 2]).unwrap().transpose();
        assert_eq!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a, Tensor::new(vec![1i32, 2, 3, 4], vec![4]).unwrap());
        assert_ne!(a, Tensor::new(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2]).unwrap());
    }

    #[test]
    fn test_debug_preview() {
        let t = Tensor::new((0..10).collect::<Vec<i32>>(), vec![10]).unwrap();
        let text = format!("{:?}", t);
        assert!(text.starts_with("Tensor(dtype=int32, shape=[10]"));
        assert!(text.contains("0, 1, 2"));
        assert!(text.contains("... 10 elements"));
    }
}
