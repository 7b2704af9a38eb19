//! Runtime multi-type dispatch over the closed dtype set.
//!
//! Operations are written as ordinary generic functions; call sites only hold
//! type-erased [`Buffer`]s. The functions here resolve the concrete element
//! type(s) with an exhaustive `match` and hand typed slices to a visitor:
//!
//! * [`dispatch_unary`]: one buffer.
//! * [`dispatch_binary`]: resolve operand A, then re-resolve operand B in that
//!   context (double dispatch).
//! * [`dispatch_with_dtype`]: one buffer plus a target dtype tag (used by
//!   conversions and factories).
//! * [`dispatch_dtype`]: a dtype tag alone.
//! * [`dispatch_assign`]: a mutable destination buffer and a source buffer.
//!
//! Each expanded arm names concrete types, so a pairing without a `Promote`
//! impl fails to build instead of falling back to a conversion at runtime.

use num_complex::Complex64;

use crate::buffer::Buffer;
use crate::element::{Element, Promote};
use crate::error::StridedError;
use crate::types::DType;

/// Dispatch target over a single buffer.
pub trait UnaryVisitor {
    type Output;
    fn visit<T: Element>(&mut self, data: &[T]) -> Self::Output;
}

/// Dispatch target over a pair of buffers.
pub trait BinaryVisitor {
    type Output;
    fn visit<T1, T2>(&mut self, a: &[T1], b: &[T2]) -> Self::Output
    where
        T1: Promote<T2>,
        T2: Element;
}

/// Dispatch target over a source buffer and a destination dtype tag.
pub trait ConvertVisitor {
    type Output;
    fn visit<S: Element, D: Element>(&mut self, src: &[S]) -> Self::Output;
}

/// Dispatch target over a dtype tag alone.
pub trait DTypeVisitor {
    type Output;
    fn visit<T: Element>(&mut self) -> Self::Output;
}

/// Dispatch target writing a source buffer into a destination buffer.
pub trait AssignVisitor {
    type Output;
    fn visit<D: Element, S: Element>(&mut self, dst: &mut [D], src: &[S]) -> Self::Output;
}

pub fn dispatch_unary<V: UnaryVisitor>(buffer: &Buffer, visitor: &mut V) -> V::Output {
    match buffer {
        Buffer::Bool(data) => visitor.visit(data.as_slice()),
        Buffer::U8(data) => visitor.visit(data.as_slice()),
        Buffer::I32(data) => visitor.visit(data.as_slice()),
        Buffer::F64(data) => visitor.visit(data.as_slice()),
        Buffer::C128(data) => visitor.visit(data.as_slice()),
    }
}

pub fn dispatch_binary<V: BinaryVisitor>(a: &Buffer, b: &Buffer, visitor: &mut V) -> V::Output {
    // Second resolution, run once the concrete type of `a` is known.
    macro_rules! resolve_rhs {
        ($lhs:expr) => {
            match b {
                Buffer::Bool(rhs) => visitor.visit($lhs, rhs.as_slice()),
                Buffer::U8(rhs) => visitor.visit($lhs, rhs.as_slice()),
                Buffer::I32(rhs) => visitor.visit($lhs, rhs.as_slice()),
                Buffer::F64(rhs) => visitor.visit($lhs, rhs.as_slice()),
                Buffer::C128(rhs) => visitor.visit($lhs, rhs.as_slice()),
            }
        };
    }

    match a {
        Buffer::Bool(lhs) => resolve_rhs!(lhs.as_slice()),
        Buffer::U8(lhs) => resolve_rhs!(lhs.as_slice()),
        Buffer::I32(lhs) => resolve_rhs!(lhs.as_slice()),
        Buffer::F64(lhs) => resolve_rhs!(lhs.as_slice()),
        Buffer::C128(lhs) => resolve_rhs!(lhs.as_slice()),
    }
}

pub fn dispatch_with_dtype<V: ConvertVisitor>(
    src: &Buffer,
    dtype: DType,
    visitor: &mut V,
) -> Result<V::Output, StridedError> {
    fn resolve_target<S: Element, V: ConvertVisitor>(
        src: &[S],
        dtype: DType,
        visitor: &mut V,
    ) -> Result<V::Output, StridedError> {
        match dtype {
            DType::Bool => Ok(visitor.visit::<S, bool>(src)),
            DType::U8 => Ok(visitor.visit::<S, u8>(src)),
            DType::I32 => Ok(visitor.visit::<S, i32>(src)),
            DType::F64 => Ok(visitor.visit::<S, f64>(src)),
            DType::C128 => Ok(visitor.visit::<S, Complex64>(src)),
            DType::None => Err(StridedError::UnsupportedDType {
                dtype,
                operation: "dispatch".to_string(),
            }),
        }
    }

    match src {
        Buffer::Bool(data) => resolve_target(data.as_slice(), dtype, visitor),
        Buffer::U8(data) => resolve_target(data.as_slice(), dtype, visitor),
        Buffer::I32(data) => resolve_target(data.as_slice(), dtype, visitor),
        Buffer::F64(data) => resolve_target(data.as_slice(), dtype, visitor),
        Buffer::C128(data) => resolve_target(data.as_slice(), dtype, visitor),
    }
}

pub fn dispatch_dtype<V: DTypeVisitor>(dtype: DType, visitor: &mut V) -> Result<V::Output, StridedError> {
    match dtype {
        DType::Bool => Ok(visitor.visit::<bool>()),
        DType::U8 => Ok(visitor.visit::<u8>()),
        DType::I32 => Ok(visitor.visit::<i32>()),
        DType::F64 => Ok(visitor.visit::<f64>()),
        DType::C128 => Ok(visitor.visit::<Complex64>()),
        DType::None => Err(StridedError::UnsupportedDType {
            dtype,
            operation: "dispatch".to_string(),
        }),
    }
}

pub fn dispatch_assign<V: AssignVisitor>(dst: &mut Buffer, src: &Buffer, visitor: &mut V) -> V::Output {
    macro_rules! resolve_src {
        ($dst:expr) => {
            match src {
                Buffer::Bool(s) => visitor.visit($dst, s.as_slice()),
                Buffer::U8(s) => visitor.visit($dst, s.as_slice()),
                Buffer::I32(s) => visitor.visit($dst, s.as_slice()),
                Buffer::F64(s) => visitor.visit($dst, s.as_slice()),
                Buffer::C128(s) => visitor.visit($dst, s.as_slice()),
            }
        };
    }

    match dst {
        Buffer::Bool(d) => resolve_src!(d.as_mut_slice()),
        Buffer::U8(d) => resolve_src!(d.as_mut_slice()),
        Buffer::I32(d) => resolve_src!(d.as_mut_slice()),
        Buffer::F64(d) => resolve_src!(d.as_mut_slice()),
        Buffer::C128(d) => resolve_src!(d.as_mut_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TypeNames;

    impl BinaryVisitor for TypeNames {
        type Output = (DType, DType, DType);

        fn visit<T1, T2>(&mut self, _a: &[T1], _b: &[T2]) -> Self::Output
        where
            T1: Promote<T2>,
            T2: Element,
        {
            (T1::DTYPE, T2::DTYPE, <T1 as Promote<T2>>::Output::DTYPE)
        }
    }

    struct Sizer;

    impl DTypeVisitor for Sizer {
        type Output = usize;

        fn visit<T: Element>(&mut self) -> usize {
            std::mem::size_of::<T>()
        }
    }

    #[test]
    fn test_binary_dispatch_resolves_both_operands() {
        let a = Buffer::from_vec(vec![1i32]);
        let b = Buffer::from_vec(vec![1.0f64]);
        assert_eq!(
            dispatch_binary(&a, &b, &mut TypeNames),
            (DType::I32, DType::F64, DType::F64)
        );
        let c = Buffer::from_vec(vec![true]);
        assert_eq!(
            dispatch_binary(&c, &c, &mut TypeNames),
            (DType::Bool, DType::Bool, DType::Bool)
        );
    }

    #[test]
    fn test_every_pair_agrees_with_runtime_promotion() {
        for da in DType::ALL {
            for db in DType::ALL {
                let a = Buffer::allocate(da, 1).unwrap();
                let b = Buffer::allocate(db, 1).unwrap();
                let (_, _, out) = dispatch_binary(&a, &b, &mut TypeNames);
                assert_eq!(out, da.result_type(db), "pair {} x {}", da, db);
            }
        }
    }

    #[test]
    fn test_dtype_dispatch() {
        for dtype in DType::ALL {
            assert_eq!(dispatch_dtype(dtype, &mut Sizer).unwrap(), dtype.itemsize());
        }
        assert!(matches!(
            dispatch_dtype(DType::None, &mut Sizer),
            Err(StridedError::UnsupportedDType { .. })
        ));
    }
}
