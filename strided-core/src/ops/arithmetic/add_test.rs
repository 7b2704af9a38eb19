use super::*;
use crate::tensor::{full, zeros};
use crate::types::DType;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_add_tensors_ok() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let result = add_op(&t1, &t2).unwrap();
    check_tensor_near(&result, &[2, 2], &[6.0, 8.0, 10.0, 12.0], 1e-12);
}

#[test]
fn test_add_broadcasting() {
    let row = create_test_tensor(vec![10.0, 20.0, 30.0], vec![3]);
    let col = create_test_tensor(vec![1.0, 2.0], vec![2, 1]);
    let result = add_op(&col, &row).unwrap();
    check_tensor_near(&result, &[2, 3], &[11.0, 21.0, 31.0, 12.0, 22.0, 32.0], 1e-12);
}

#[test]
fn test_add_zero_is_identity() {
    let t = create_test_tensor(vec![1.5, -2.0, 3.25], vec![3]);
    let result = add_op(&t, &zeros(&[3], DType::F64).unwrap()).unwrap();
    assert_eq!(result.to_vec::<f64>().unwrap(), t.to_vec::<f64>().unwrap());
}

#[test]
fn test_add_promotes_dtypes() {
    let i = full(&[2], 3i32, DType::I32).unwrap();
    let u = full(&[2], 4u8, DType::U8).unwrap();
    let b = full(&[2], true, DType::Bool).unwrap();
    assert_eq!(add_op(&i, &u).unwrap().dtype(), DType::I32);
    assert_eq!(add_op(&u, &b).unwrap().dtype(), DType::U8);
    let both = add_op(&b, &b).unwrap();
    assert_eq!(both.dtype(), DType::Bool);
    assert_eq!(both.to_vec::<bool>().unwrap(), vec![true, true]);
}

#[test]
fn test_add_incompatible_shapes() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let t2 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    assert!(matches!(
        add_op(&t1, &t2),
        Err(StridedError::BroadcastError { .. })
    ));
}

#[test]
fn test_add_records_only_with_grad() {
    let mut graph = GraphContext::new();
    let a = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let b = create_test_tensor(vec![3.0, 4.0], vec![2]);
    let c = add(&mut graph, &a, &b).unwrap();
    assert!(graph.is_empty());
    assert!(!c.requires_grad());
    assert!(!c.is_leaf());

    let w = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let d = add(&mut graph, &w, &b).unwrap();
    assert_eq!(graph.len(), 1);
    assert!(graph.contains(&d));
    assert!(d.requires_grad());
    assert_eq!(d.grad_fn().unwrap().name(), "add");
}

#[test]
fn test_add_backward_broadcast() -> Result<(), StridedError> {
    let mut graph = GraphContext::new();
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = create_test_tensor_with_grad(vec![10.0, 20.0, 30.0], vec![3]);
    let c = add(&mut graph, &a, &b)?;
    let seed = full(&[2, 3], 1.0, DType::F64)?;
    c.backward(&mut graph, &seed)?;

    check_tensor_near(&a.grad()?, &[2, 3], &[1.0; 6], 1e-12);
    check_tensor_near(&b.grad()?, &[3], &[2.0, 2.0, 2.0], 1e-12);
    assert!(graph.is_empty());
    Ok(())
}
