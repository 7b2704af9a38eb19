use crate::autograd::{apply, BackwardFn, Context, GraphContext};
use crate::error::StridedError;
use crate::ops::arithmetic::mul_op;
use crate::ops::elementwise::{evaluate_unary, UnaryOp};
use crate::tensor::Tensor;

/// Backward step of `exp(a)`: `dA = g * exp(a)`.
#[derive(Debug)]
struct ExpBackward;

impl BackwardFn for ExpBackward {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn backward(&self, ctx: &Context, grad_output: &Tensor) -> Result<Vec<Tensor>, StridedError> {
        let a = ctx.saved(0)?;
        Ok(vec![mul_op(grad_output, &exp_op(a)?)?])
    }
}

/// Element-wise `e^a`. Nothing is recorded.
pub fn exp_op(a: &Tensor) -> Result<Tensor, StridedError> {
    evaluate_unary(UnaryOp::Exp, a)
}

/// Element-wise `e^a`, recorded in `graph` when `a` requires grad.
pub fn exp(graph: &mut GraphContext, a: &Tensor) -> Result<Tensor, StridedError> {
    apply(graph, &[a], ExpBackward, || exp_op(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ones;
    use crate::types::DType;
    use crate::utils::testing::{check_tensor_near, create_test_tensor_with_grad};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_exp_values() {
        let t = Tensor::new(vec![0u8, 1, 2], vec![3]).unwrap();
        let result = exp_op(&t).unwrap();
        assert_eq!(result.dtype(), DType::F64);
        let values = result.to_vec::<f64>().unwrap();
        assert_relative_eq!(values[0], 1.0);
        assert_relative_eq!(values[1], std::f64::consts::E, epsilon = 1e-12);
        assert_relative_eq!(values[2], std::f64::consts::E.powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_exp_complex() {
        let t = Tensor::new(vec![Complex64::new(0.0, std::f64::consts::PI)], vec![1]).unwrap();
        let z = exp_op(&t).unwrap().item::<Complex64>().unwrap();
        assert_relative_eq!(z.re, -1.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_backward() -> Result<(), StridedError> {
        let mut graph = GraphContext::new();
        let a = create_test_tensor_with_grad(vec![0.0, 1.0], vec![2]);
        let b = exp(&mut graph, &a)?;
        b.backward(&mut graph, &ones(&[2], DType::F64)?)?;
        check_tensor_near(&a.grad()?, &[2], &[1.0, std::f64::consts::E], 1e-12);
        Ok(())
    }
}
