use super::*;
use crate::tensor::ones;
use crate::types::DType;
use crate::utils::testing::{check_tensor_near, create_test_tensor_with_grad};

#[test]
fn test_reshape_op_copies() -> Result<(), StridedError> {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    let reshaped = reshape_op(&t, vec![3, 2])?;
    assert_eq!(reshaped.shape(), vec![3, 2]);
    assert_eq!(reshaped.strides(), vec![2, 1]);
    assert!(!reshaped.shares_buffer(&t));
    assert!(reshaped.owns_data());
    Ok(())
}

#[test]
fn test_reshape_op_of_transposed() -> Result<(), StridedError> {
    let t = Tensor::new(vec![1i32, 2, 3, 4, 5, 6], vec![2, 3])?;
    let flat = reshape_op(&t.transpose(), vec![6])?;
    assert_eq!(flat.to_vec::<i32>()?, vec![1, 4, 2, 5, 3, 6]);
    Ok(())
}

#[test]
fn test_reshape_op_size_mismatch() {
    let t = Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap();
    assert!(matches!(
        reshape_op(&t, vec![4]),
        Err(StridedError::ReshapeSizeMismatch { .. })
    ));
}

#[test]
fn test_reshape_backward() -> Result<(), StridedError> {
    let mut graph = GraphContext::new();
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let r = reshape(&mut graph, &a, vec![4])?;
    assert!(graph.contains(&r));
    let seed = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![4])?;
    r.backward(&mut graph, &seed)?;
    check_tensor_near(&a.grad()?, &[2, 2], &[1.0, 2.0, 3.0, 4.0], 0.0);

    let s = reshape(&mut graph, &a, vec![1, 4, 1])?;
    s.backward(&mut graph, &ones(&[1, 4, 1], DType::F64)?)?;
    check_tensor_near(&a.grad()?, &[2, 2], &[2.0, 3.0, 4.0, 5.0], 0.0);
    Ok(())
}
