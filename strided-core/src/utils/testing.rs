use crate::tensor::Tensor;

/// Checks that `actual` has `expected_shape` and that every element, read as
/// `f64`, is within `tolerance` of `expected_data`.
/// Panics on the first difference.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data_vec = actual
        .to_vec::<f64>()
        .expect("Failed to read tensor data in check_tensor_near");

    assert_eq!(
        actual_data_vec.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data_vec.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a simple f64 tensor for testing purposes.
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

/// Helper to create an f64 leaf tensor that requires gradient.
pub fn create_test_tensor_with_grad(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    let tensor = Tensor::new(data, shape).expect("Failed to create test tensor with grad");
    tensor
        .set_requires_grad(true)
        .expect("Failed to enable gradients on test tensor");
    tensor
}
