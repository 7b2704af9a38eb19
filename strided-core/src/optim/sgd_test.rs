use super::*;
use crate::tensor::{full, Tensor};
use crate::types::DType;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_sgd_step_moves_against_gradient() -> Result<(), StridedError> {
    let p = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    p.accumulate_grad(&create_test_tensor(vec![0.5, -1.0], vec![2]))?;
    let mut optimizer = SGD::new(vec![p.clone()], 0.1);
    optimizer.step()?;
    check_tensor_near(&p, &[2], &[0.95, 2.1], 1e-12);
    // The gradient is left for the caller to clear.
    check_tensor_near(&p.grad()?, &[2], &[0.5, -1.0], 0.0);
    Ok(())
}

#[test]
fn test_sgd_zero_grad() -> Result<(), StridedError> {
    let p = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    p.accumulate_grad(&full(&[3], 4.0, DType::F64)?)?;
    let frozen = create_test_tensor(vec![1.0], vec![1]);
    let mut optimizer = SGD::new(vec![p.clone(), frozen], 0.5);
    optimizer.zero_grad()?;
    check_tensor_near(&p.grad()?, &[3], &[0.0; 3], 0.0);
    optimizer.step()?;
    check_tensor_near(&p, &[3], &[1.0, 2.0, 3.0], 0.0);
    Ok(())
}

#[test]
fn test_sgd_skips_parameters_without_gradients() -> Result<(), StridedError> {
    let frozen = create_test_tensor(vec![1.0, 1.0], vec![2]);
    let mut optimizer = SGD::new(vec![frozen.clone()], 1.0);
    optimizer.step()?;
    check_tensor_near(&frozen, &[2], &[1.0, 1.0], 0.0);
    assert_eq!(optimizer.params().len(), 1);
    Ok(())
}

#[test]
fn test_sgd_keeps_parameter_dtype() -> Result<(), StridedError> {
    let p = Tensor::new(vec![10i32, 20], vec![2])?;
    p.set_requires_grad(true)?;
    p.accumulate_grad(&Tensor::new(vec![3i32, -4], vec![2])?)?;
    let mut optimizer = SGD::new(vec![p.clone()], 1.0);
    optimizer.set_lr(2.0);
    assert_eq!(optimizer.lr(), 2.0);
    optimizer.step()?;
    assert_eq!(p.dtype(), DType::I32);
    assert_eq!(p.to_vec::<i32>()?, vec![4, 28]);
    Ok(())
}
