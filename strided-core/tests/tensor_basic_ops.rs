use strided_core::functional::{add_op, all_op, div_op, equal_op, mul_op, ne_op, sub_op, REDUCE_ALL};
use strided_core::num_complex::Complex64;
use strided_core::{full, ones, zeros, DType, StridedError, Tensor};

mod common;
use common::{create_test_tensor, sample_values};

#[test]
fn test_additive_and_multiplicative_identity() -> Result<(), StridedError> {
    for seed in 0..4 {
        let x = create_test_tensor(sample_values(12, seed), vec![3, 4]);
        let plus_zero = add_op(&x, &zeros(&[3, 4], DType::F64)?)?;
        let times_one = mul_op(&x, &ones(&[4], DType::F64)?)?;
        assert!(all_op(&equal_op(&plus_zero, &x)?, REDUCE_ALL)?.item::<bool>()?);
        assert!(all_op(&equal_op(&times_one, &x)?, REDUCE_ALL)?.item::<bool>()?);
    }
    Ok(())
}

#[test]
fn test_identity_holds_for_every_dtype() -> Result<(), StridedError> {
    let values = vec![-3.0, 0.0, 1.0, 2.5, 7.0, 250.0];
    for dtype in DType::ALL {
        let a = create_test_tensor(values.clone(), vec![2, 3]).to_dtype(dtype)?;
        let plus_zero = add_op(&a, &full(&[2, 3], 0, dtype)?)?;
        let zero_plus = add_op(&full(&[2, 3], 0, dtype)?, &a)?;
        let times_one = mul_op(&a, &full(&[2, 3], 1, dtype)?)?;
        assert_eq!(plus_zero, a, "{} + 0", dtype);
        assert_eq!(zero_plus, a, "0 + {}", dtype);
        assert_eq!(times_one, a, "{} * 1", dtype);
    }
    Ok(())
}

#[test]
fn test_boolean_arithmetic_stays_boolean() -> Result<(), StridedError> {
    let a = Tensor::new(vec![true, false, true], vec![3])?;
    let b = Tensor::new(vec![true, true, false], vec![3])?;
    assert_eq!(add_op(&a, &b)?.to_vec::<bool>()?, vec![true, true, true]);
    assert_eq!(sub_op(&a, &b)?.to_vec::<bool>()?, vec![false, true, true]);
    assert_eq!(mul_op(&a, &b)?.to_vec::<bool>()?, vec![true, false, false]);
    assert_eq!(div_op(&a, &a), Err(StridedError::DivisionByZero));
    assert_eq!(div_op(&a, &full(&[1], true, DType::Bool)?)?, a);
    Ok(())
}

#[test]
fn test_subtract_self_is_zero() -> Result<(), StridedError> {
    let x = create_test_tensor(sample_values(6, 3), vec![2, 3]);
    let diff = sub_op(&x, &x)?;
    let nonzero = ne_op(&diff, &zeros(&[], DType::F64)?)?;
    assert_eq!(nonzero.shape(), vec![2, 3]);
    assert!(!nonzero.to_vec::<bool>()?.contains(&true));
    Ok(())
}

#[test]
fn test_promotion_table() -> Result<(), StridedError> {
    let dtypes = [DType::Bool, DType::U8, DType::I32, DType::F64, DType::C128];
    for &a in &dtypes {
        for &b in &dtypes {
            let x = ones(&[1], a)?;
            let y = ones(&[1], b)?;
            let sum = add_op(&x, &y)?;
            assert_eq!(sum.dtype(), a.result_type(b), "{} + {}", a, b);
            let expected = if sum.dtype() == DType::Bool { 1.0 } else { 2.0 };
            assert_eq!(sum.to_vec::<f64>()?, vec![expected]);
            assert_eq!(equal_op(&x, &y)?.dtype(), DType::Bool);
        }
    }
    Ok(())
}

#[test]
fn test_complex_division() -> Result<(), StridedError> {
    let a = Tensor::new(vec![Complex64::new(1.0, 1.0)], vec![1])?;
    let b = full(&[1], 2.0, DType::F64)?;
    let q = div_op(&a, &b)?;
    assert_eq!(q.item::<Complex64>()?, Complex64::new(0.5, 0.5));
    Ok(())
}

#[test]
fn test_integer_division_by_zero() {
    let a = ones(&[2], DType::U8).unwrap();
    let b = zeros(&[2], DType::I32).unwrap();
    assert_eq!(div_op(&a, &b), Err(StridedError::DivisionByZero));
}
