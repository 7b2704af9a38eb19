use super::*;
use crate::ops::comparison::equal_op;
use crate::ops::reduction::REDUCE_ALL;
use crate::tensor::{full, zeros};
use crate::types::DType;

#[test]
fn test_all_true_and_false() {
    let ones = full(&[2, 2], 3i32, DType::I32).unwrap();
    assert!(all_op(&ones, REDUCE_ALL).unwrap().item::<bool>().unwrap());
    let t = Tensor::new(vec![1.0f64, 0.0, 2.0], vec![3]).unwrap();
    let result = all_op(&t, REDUCE_ALL).unwrap();
    assert_eq!(result.shape(), vec![1]);
    assert!(!result.item::<bool>().unwrap());
}

#[test]
fn test_all_along_axis() {
    let t = Tensor::new(vec![true, true, false, true], vec![2, 2]).unwrap();
    let rows = all_op(&t, Some(1)).unwrap();
    assert_eq!(rows.to_vec::<bool>().unwrap(), vec![true, false]);
    let cols = all_op(&t, Some(0)).unwrap();
    assert_eq!(cols.to_vec::<bool>().unwrap(), vec![false, true]);
}

#[test]
fn test_all_of_comparison() {
    let a = zeros(&[3], DType::U8).unwrap();
    let b = zeros(&[3], DType::F64).unwrap();
    let eq = equal_op(&a, &b).unwrap();
    assert!(all_op(&eq, REDUCE_ALL).unwrap().item::<bool>().unwrap());
}

#[test]
fn test_all_empty_is_true() {
    let t = zeros(&[0], DType::I32).unwrap();
    assert!(all_op(&t, REDUCE_ALL).unwrap().item::<bool>().unwrap());
}
