//! Broadcasting evaluators for element-wise operations.
//!
//! Operands are never materialized at the output shape. Each operand gets one
//! offset per output element (stride 0 on broadcast dims) and the kernel reads
//! the shared buffers in place through those offsets.

use crate::buffer::{read_buffer, try_alloc, with_buffers, Buffer};
use crate::dispatch::{dispatch_binary, dispatch_unary, BinaryVisitor, UnaryVisitor};
use crate::element::{Element, Numeric, Promote};
use crate::error::StridedError;
use crate::kernels::{elementwise, unary};
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use crate::tensor_data::ArrayDesc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
}

impl BinaryOp {
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "divide",
            BinaryOp::Equal => "equal",
            BinaryOp::NotEqual => "not_equal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Exp,
    Log,
    Negate,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Exp => "exp",
            UnaryOp::Log => "log",
            UnaryOp::Negate => "negate",
        }
    }
}

/// Output shape of a broadcast binary operation plus the per-element offsets
/// into each operand's buffer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BroadcastPlan {
    pub shape: Vec<usize>,
    pub offsets_a: Vec<usize>,
    pub offsets_b: Vec<usize>,
}

pub(crate) fn plan_broadcast(a: &ArrayDesc, b: &ArrayDesc) -> Result<BroadcastPlan, StridedError> {
    let shape = broadcast_shapes(&a.shape, &b.shape)?;
    let offsets_a = a.broadcast_to(&shape)?.offsets();
    let offsets_b = b.broadcast_to(&shape)?.offsets();
    Ok(BroadcastPlan {
        shape,
        offsets_a,
        offsets_b,
    })
}

struct BinaryEvaluator<'a> {
    op: BinaryOp,
    offsets_a: &'a [usize],
    offsets_b: &'a [usize],
}

impl BinaryVisitor for BinaryEvaluator<'_> {
    type Output = Result<Buffer, StridedError>;

    fn visit<T1, T2>(&mut self, a: &[T1], b: &[T2]) -> Self::Output
    where
        T1: Promote<T2>,
        T2: Element,
    {
        let (ia, ib) = (self.offsets_a, self.offsets_b);
        let n = ia.len();
        if matches!(self.op, BinaryOp::Equal | BinaryOp::NotEqual) {
            let mut out = try_alloc(n, false)?;
            if self.op == BinaryOp::Equal {
                elementwise::equal::<T1, T2, <T1 as Promote<T2>>::Output>(a, ia, b, ib, &mut out);
            } else {
                elementwise::not_equal::<T1, T2, <T1 as Promote<T2>>::Output>(a, ia, b, ib, &mut out);
            }
            return Ok(Buffer::from_vec(out));
        }
        let mut out = try_alloc(n, <<T1 as Promote<T2>>::Output as Numeric>::zero())?;
        match self.op {
            BinaryOp::Add => elementwise::add(a, ia, b, ib, &mut out),
            BinaryOp::Subtract => elementwise::subtract(a, ia, b, ib, &mut out),
            BinaryOp::Multiply => elementwise::multiply(a, ia, b, ib, &mut out),
            BinaryOp::Divide => elementwise::divide(a, ia, b, ib, &mut out)?,
            BinaryOp::Equal | BinaryOp::NotEqual => {}
        }
        Ok(Buffer::from_vec(out))
    }
}

/// Evaluates `op(a, b)` into a fresh contiguous tensor of the broadcast shape.
///
/// # Errors
/// `BroadcastError` when the shapes are not broadcast-compatible, before any
/// allocation.
pub fn evaluate_binary(op: BinaryOp, a: &Tensor, b: &Tensor) -> Result<Tensor, StridedError> {
    let (a_dtype, a_desc, a_buffer) = a.parts();
    let (b_dtype, b_desc, b_buffer) = b.parts();
    let plan = plan_broadcast(&a_desc, &b_desc)?;
    let mut evaluator = BinaryEvaluator {
        op,
        offsets_a: &plan.offsets_a,
        offsets_b: &plan.offsets_b,
    };
    let buffer = with_buffers(&a_buffer, &b_buffer, |x, y| dispatch_binary(x, y, &mut evaluator))?;
    log::trace!(
        "{}: {} x {} -> {} {:?}",
        op.name(),
        a_dtype,
        b_dtype,
        buffer.dtype(),
        plan.shape
    );
    Tensor::from_buffer(buffer, plan.shape)
}

struct UnaryEvaluator<'a> {
    op: UnaryOp,
    offsets: &'a [usize],
}

impl UnaryVisitor for UnaryEvaluator<'_> {
    type Output = Result<Buffer, StridedError>;

    fn visit<T: Element>(&mut self, data: &[T]) -> Self::Output {
        let n = self.offsets.len();
        match self.op {
            UnaryOp::Exp | UnaryOp::Log => {
                let mut out = try_alloc(n, <T::Float as Numeric>::zero())?;
                if self.op == UnaryOp::Exp {
                    unary::exp(data, self.offsets, &mut out);
                } else {
                    unary::log(data, self.offsets, &mut out);
                }
                Ok(Buffer::from_vec(out))
            }
            UnaryOp::Negate => {
                let mut out = try_alloc(n, <T::Arith as Numeric>::zero())?;
                unary::negate(data, self.offsets, &mut out);
                Ok(Buffer::from_vec(out))
            }
        }
    }
}

/// Evaluates `op(a)` into a fresh contiguous tensor of the same shape.
///
/// `exp`/`log` produce `f64` (complex stays complex); `negate` produces the
/// arithmetic type of the input (booleans negate as `u8`).
pub fn evaluate_unary(op: UnaryOp, a: &Tensor) -> Result<Tensor, StridedError> {
    let (dtype, desc, buffer) = a.parts();
    let offsets = desc.offsets();
    let mut evaluator = UnaryEvaluator {
        op,
        offsets: &offsets,
    };
    let out = dispatch_unary(&read_buffer(&buffer), &mut evaluator)?;
    log::trace!("{}: {} -> {} {:?}", op.name(), dtype, out.dtype(), desc.shape);
    Tensor::from_buffer(out, desc.shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DType;

    #[test]
    fn test_plan_broadcast_offsets() {
        let a = ArrayDesc::contiguous(vec![2, 1]);
        let b = ArrayDesc::contiguous(vec![3]);
        let plan = plan_broadcast(&a, &b).unwrap();
        assert_eq!(plan.shape, vec![2, 3]);
        assert_eq!(plan.offsets_a, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(plan.offsets_b, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_plan_rejects_incompatible_shapes() {
        let a = ArrayDesc::contiguous(vec![2, 3]);
        let b = ArrayDesc::contiguous(vec![2]);
        assert!(matches!(
            plan_broadcast(&a, &b),
            Err(StridedError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_evaluate_binary_mixed_dtypes() {
        let a = Tensor::new(vec![1i32, 2, 3], vec![3]).unwrap();
        let b = Tensor::new(vec![0.5f64], vec![1]).unwrap();
        let c = evaluate_binary(BinaryOp::Multiply, &a, &b).unwrap();
        assert_eq!(c.dtype(), DType::F64);
        assert_eq!(c.to_vec::<f64>().unwrap(), vec![0.5, 1.0, 1.5]);

        let eq = evaluate_binary(BinaryOp::Equal, &a, &Tensor::new(vec![2.0f64], vec![]).unwrap()).unwrap();
        assert_eq!(eq.dtype(), DType::Bool);
        assert_eq!(eq.to_vec::<bool>().unwrap(), vec![false, true, false]);
    }

    #[test]
    fn test_evaluate_binary_same_buffer() {
        let a = Tensor::new(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        let c = evaluate_binary(BinaryOp::Add, &a, &a.transpose()).unwrap();
        assert_eq!(c.to_vec::<f64>().unwrap(), vec![2.0, 5.0, 5.0, 8.0]);
    }

    #[test]
    fn test_evaluate_unary_output_dtypes() {
        let b = Tensor::new(vec![true, false], vec![2]).unwrap();
        let neg = evaluate_unary(UnaryOp::Negate, &b).unwrap();
        assert_eq!(neg.dtype(), DType::U8);
        assert_eq!(neg.to_vec::<u8>().unwrap(), vec![255, 0]);

        let e = evaluate_unary(UnaryOp::Exp, &Tensor::new(vec![0i32], vec![1]).unwrap()).unwrap();
        assert_eq!(e.dtype(), DType::F64);
        assert_eq!(e.item::<f64>().unwrap(), 1.0);
    }
}
