use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use num_complex::Complex64;

use crate::element::Element;
use crate::error::StridedError;
use crate::types::{DType, Scalar};

/// Shared, lockable handle to a buffer. Views and shallow copies clone the `Arc`.
pub type SharedBuffer = Arc<RwLock<Buffer>>;

/// Flat, homogeneously-typed element store. It has no shape.
///
/// `Clone` is a deep copy. [`Buffer::take`] is the move: it transfers the
/// elements out and leaves the source empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    Bool(Vec<bool>),
    U8(Vec<u8>),
    I32(Vec<i32>),
    F64(Vec<f64>),
    C128(Vec<Complex64>),
}

/// Allocates `n` copies of `value`, surfacing allocation failure as an error.
pub(crate) fn try_alloc<T: Clone>(n: usize, value: T) -> Result<Vec<T>, StridedError> {
    let mut data = Vec::new();
    data.try_reserve_exact(n)
        .map_err(|_| StridedError::AllocationFailure { requested: n })?;
    data.resize(n, value);
    Ok(data)
}

impl Buffer {
    /// Allocates a zero-filled buffer of `n` elements.
    pub fn allocate(dtype: DType, n: usize) -> Result<Self, StridedError> {
        Buffer::filled(dtype, n, Scalar::Bool(false))
    }

    /// Allocates `n` elements set to `value`, converted to `dtype`.
    pub fn filled(dtype: DType, n: usize, value: Scalar) -> Result<Self, StridedError> {
        fn make<T: Element>(n: usize, value: Scalar) -> Result<Buffer, StridedError> {
            Ok(T::wrap(try_alloc(n, T::from_scalar(value))?))
        }
        match dtype {
            DType::Bool => make::<bool>(n, value),
            DType::U8 => make::<u8>(n, value),
            DType::I32 => make::<i32>(n, value),
            DType::F64 => make::<f64>(n, value),
            DType::C128 => make::<Complex64>(n, value),
            DType::None => Err(StridedError::UnsupportedDType {
                dtype,
                operation: "allocate".to_string(),
            }),
        }
    }

    /// Wraps an existing vector without copying.
    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        T::wrap(data)
    }

    /// Builds `start, start + step, ...` up to (excluding) `stop`, converted to `dtype`.
    ///
    /// The length is `ceil((stop - start) / step)`. A non-positive step or an
    /// empty range is an `InvalidRange` error.
    pub fn from_range(start: f64, stop: f64, step: f64, dtype: DType) -> Result<Self, StridedError> {
        if !(step > 0.0) || !(stop > start) {
            return Err(StridedError::InvalidRange { start, stop, step });
        }
        let n = ((stop - start) / step).ceil() as usize;
        let mut values = try_alloc(n, 0.0f64)?;
        for (i, v) in values.iter_mut().enumerate() {
            *v = start + i as f64 * step;
        }
        Buffer::F64(values).convert(dtype)
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::Bool(_) => DType::Bool,
            Buffer::U8(_) => DType::U8,
            Buffer::I32(_) => DType::I32,
            Buffer::F64(_) => DType::F64,
            Buffer::C128(_) => DType::C128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::Bool(v) => v.len(),
            Buffer::U8(v) => v.len(),
            Buffer::I32(v) => v.len(),
            Buffer::F64(v) => v.len(),
            Buffer::C128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets every element back to zero.
    pub fn zero(&mut self) {
        self.fill(Scalar::Bool(false));
    }

    /// Overwrites every element with `value`, converted to this buffer's dtype.
    pub fn fill(&mut self, value: Scalar) {
        fn fill_typed<T: Element>(data: &mut [T], value: Scalar) {
            let v = T::from_scalar(value);
            data.iter_mut().for_each(|x| *x = v);
        }
        match self {
            Buffer::Bool(v) => fill_typed(v, value),
            Buffer::U8(v) => fill_typed(v, value),
            Buffer::I32(v) => fill_typed(v, value),
            Buffer::F64(v) => fill_typed(v, value),
            Buffer::C128(v) => fill_typed(v, value),
        }
    }

    /// Reads the element at a linear index.
    pub fn get(&self, index: usize) -> Result<Scalar, StridedError> {
        let len = self.len();
        let out_of_range = || StridedError::BufferIndexOutOfBounds { index, len };
        match self {
            Buffer::Bool(v) => v.get(index).map(|x| Scalar::Bool(*x)),
            Buffer::U8(v) => v.get(index).map(|x| Scalar::U8(*x)),
            Buffer::I32(v) => v.get(index).map(|x| Scalar::I32(*x)),
            Buffer::F64(v) => v.get(index).map(|x| Scalar::F64(*x)),
            Buffer::C128(v) => v.get(index).map(|x| Scalar::C128(*x)),
        }
        .ok_or_else(out_of_range)
    }

    /// Writes the element at a linear index, converting `value` to this buffer's dtype.
    pub fn set(&mut self, index: usize, value: Scalar) -> Result<(), StridedError> {
        fn set_typed<T: Element>(data: &mut [T], index: usize, value: Scalar) -> Result<(), StridedError> {
            let len = data.len();
            let slot = data
                .get_mut(index)
                .ok_or(StridedError::BufferIndexOutOfBounds { index, len })?;
            *slot = T::from_scalar(value);
            Ok(())
        }
        match self {
            Buffer::Bool(v) => set_typed(v, index, value),
            Buffer::U8(v) => set_typed(v, index, value),
            Buffer::I32(v) => set_typed(v, index, value),
            Buffer::F64(v) => set_typed(v, index, value),
            Buffer::C128(v) => set_typed(v, index, value),
        }
    }

    /// Deep copy into a buffer of another dtype with element-wise numeric conversion.
    pub fn convert(&self, dtype: DType) -> Result<Buffer, StridedError> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        crate::dispatch::dispatch_with_dtype(self, dtype, &mut DTypeConversion)?
    }

    /// Typed view of the elements, if `T` matches this buffer's dtype.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    pub fn as_mut_slice<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(self)
    }

    /// Moves the elements out, leaving an empty buffer of the same dtype behind.
    pub fn take(&mut self) -> Buffer {
        let empty = match self {
            Buffer::Bool(_) => Buffer::Bool(Vec::new()),
            Buffer::U8(_) => Buffer::U8(Vec::new()),
            Buffer::I32(_) => Buffer::I32(Vec::new()),
            Buffer::F64(_) => Buffer::F64(Vec::new()),
            Buffer::C128(_) => Buffer::C128(Vec::new()),
        };
        std::mem::replace(self, empty)
    }

    /// Converts every element to `f64` (complex values keep their real part).
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.to_vec::<f64>()
    }

    /// Copies every element out as `T`, converting where needed.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        fn collect<S: Element, T: Element>(data: &[S]) -> Vec<T> {
            data.iter().map(|x| crate::element::cast::<S, T>(*x)).collect()
        }
        match self {
            Buffer::Bool(v) => collect(v),
            Buffer::U8(v) => collect(v),
            Buffer::I32(v) => collect(v),
            Buffer::F64(v) => collect(v),
            Buffer::C128(v) => collect(v),
        }
    }

    pub(crate) fn into_shared(self) -> SharedBuffer {
        Arc::new(RwLock::new(self))
    }
}

/// Read lock on a shared buffer. Panics if the RwLock is poisoned.
pub(crate) fn read_buffer(buffer: &SharedBuffer) -> RwLockReadGuard<'_, Buffer> {
    buffer.read().expect("RwLock poisoned")
}

/// Write lock on a shared buffer. Panics if the RwLock is poisoned.
pub(crate) fn write_buffer(buffer: &SharedBuffer) -> RwLockWriteGuard<'_, Buffer> {
    buffer.write().expect("RwLock poisoned")
}

/// Runs `f` with read access to two buffers that may be the same allocation.
pub(crate) fn with_buffers<R>(a: &SharedBuffer, b: &SharedBuffer, f: impl FnOnce(&Buffer, &Buffer) -> R) -> R {
    let a_guard = read_buffer(a);
    if Arc::ptr_eq(a, b) {
        f(&a_guard, &a_guard)
    } else {
        let b_guard = read_buffer(b);
        f(&a_guard, &b_guard)
    }
}

/// Dispatch target for [`Buffer::convert`].
struct DTypeConversion;

impl crate::dispatch::ConvertVisitor for DTypeConversion {
    type Output = Result<Buffer, StridedError>;

    fn visit<S: Element, D: Element>(&mut self, src: &[S]) -> Self::Output {
        let mut out: Vec<D> = Vec::new();
        out.try_reserve_exact(src.len())
            .map_err(|_| StridedError::AllocationFailure { requested: src.len() })?;
        out.extend(src.iter().map(|x| crate::element::cast::<S, D>(*x)));
        Ok(D::wrap(out))
    }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod tests;
