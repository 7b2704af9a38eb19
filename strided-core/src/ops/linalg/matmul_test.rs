use super::*;
use crate::tensor::{arange, full, ones};
use crate::types::DType;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_matmul_2d() {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = create_test_tensor(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]);
    let result = matmul_op(&a, &b).unwrap();
    check_tensor_near(&result, &[2, 2], &[58.0, 64.0, 139.0, 154.0], 1e-12);
}

#[test]
fn test_matmul_mixed_dtypes() {
    let a = Tensor::new(vec![1i32, 2], vec![1, 2]).unwrap();
    let b = Tensor::new(vec![0.5f64, 0.25], vec![2, 1]).unwrap();
    let result = matmul_op(&a, &b).unwrap();
    assert_eq!(result.dtype(), DType::F64);
    assert_eq!(result.item::<f64>().unwrap(), 1.0);

    let ints = Tensor::new(vec![1i32, 2, 3, 4], vec![2, 2]).unwrap();
    let square = matmul_op(&ints, &ints).unwrap();
    assert_eq!(square.dtype(), DType::I32);
    assert_eq!(square.to_vec::<i32>().unwrap(), vec![7, 10, 15, 22]);
}

#[test]
fn test_matmul_vector_operands() {
    let m = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let v = create_test_tensor(vec![1.0, 1.0], vec![2]);
    check_tensor_near(&matmul_op(&m, &v).unwrap(), &[2, 1], &[3.0, 7.0], 1e-12);
    check_tensor_near(&matmul_op(&v, &m).unwrap(), &[1, 2], &[4.0, 6.0], 1e-12);
    check_tensor_near(&matmul_op(&v, &v).unwrap(), &[1, 1], &[2.0], 1e-12);
}

#[test]
fn test_matmul_batched_broadcast() {
    // [2, 2, 3] @ [3, 1]: the right operand is shared by both batches.
    let a = arange(0.0, 12.0, 1.0, DType::F64).unwrap().reshape(vec![2, 2, 3]).unwrap();
    let b = ones(&[3, 1], DType::F64).unwrap();
    let result = matmul_op(&a, &b).unwrap();
    check_tensor_near(&result, &[2, 2, 1], &[3.0, 12.0, 21.0, 30.0], 1e-12);

    // [2, 1, 2, 2] @ [3, 2, 2] -> [2, 3, 2, 2]
    let left = ones(&[2, 1, 2, 2], DType::I32).unwrap();
    let right = full(&[3, 2, 2], 2, DType::I32).unwrap();
    let out = matmul_op(&left, &right).unwrap();
    assert_eq!(out.shape(), vec![2, 3, 2, 2]);
    assert!(out.to_vec::<i32>().unwrap().iter().all(|&x| x == 4));
}

#[test]
fn test_matmul_transposed_operand() {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]);
    let result = matmul_op(&a.t(), &a).unwrap();
    check_tensor_near(&result, &[2, 2], &[35.0, 44.0, 44.0, 56.0], 1e-12);
}

#[test]
fn test_matmul_errors() {
    let a = create_test_tensor(vec![1.0; 6], vec![2, 3]);
    let b = create_test_tensor(vec![1.0; 4], vec![2, 2]);
    assert_eq!(
        matmul_op(&a, &b),
        Err(StridedError::MatmulInnerMismatch {
            shape1: vec![2, 3],
            shape2: vec![2, 2],
        })
    );
    let s = create_test_tensor(vec![1.0], vec![]);
    assert!(matches!(
        matmul_op(&s, &b),
        Err(StridedError::RankMismatch { .. })
    ));
    let x = create_test_tensor(vec![1.0; 16], vec![2, 2, 2, 2]);
    let y = create_test_tensor(vec![1.0; 12], vec![3, 2, 2]);
    assert!(matches!(
        matmul_op(&x, &y),
        Err(StridedError::BroadcastError { .. })
    ));
}

#[test]
fn test_matmul_backward() -> Result<(), StridedError> {
    let mut graph = GraphContext::new();
    let w = create_test_tensor_with_grad(vec![2.0; 6], vec![3, 2]);
    let x = create_test_tensor_with_grad(vec![1.0; 2], vec![2, 1]);
    let y = matmul(&mut graph, &w, &x)?;
    assert_eq!(y.shape(), vec![3, 1]);
    y.backward(&mut graph, &ones(&[3, 1], DType::F64)?)?;

    check_tensor_near(&w.grad()?, &[3, 2], &[1.0; 6], 1e-12);
    check_tensor_near(&x.grad()?, &[2, 1], &[6.0, 6.0], 1e-12);
    assert!(graph.is_empty());
    Ok(())
}

#[test]
fn test_matmul_backward_batched_and_vector() -> Result<(), StridedError> {
    let mut graph = GraphContext::new();
    let a = create_test_tensor_with_grad(vec![1.0; 12], vec![2, 2, 3]);
    let v = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let y = matmul(&mut graph, &a, &v)?;
    assert_eq!(y.shape(), vec![2, 2, 1]);
    y.backward(&mut graph, &ones(&[2, 2, 1], DType::F64)?)?;

    // Every row of every batch sees v.
    check_tensor_near(
        &a.grad()?,
        &[2, 2, 3],
        &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0],
        1e-12,
    );
    // v is shared by 4 rows of ones.
    check_tensor_near(&v.grad()?, &[3], &[4.0, 4.0, 4.0], 1e-12);
    Ok(())
}
