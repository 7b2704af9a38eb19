use strided_core::tensor::Tensor;

// Shared by several test crates; not every crate uses every helper.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub(crate) fn create_grad_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    let t = create_test_tensor(data, shape);
    t.set_requires_grad(true).expect("Enabling gradients failed");
    t
}

/// Deterministic pseudo-random values in `[-1, 1)`.
#[allow(dead_code)]
pub(crate) fn sample_values(n: usize, seed: u64) -> Vec<f64> {
    let t = strided_core::randn_seeded(&[n], seed).expect("randn failed");
    t.to_vec::<f64>()
        .expect("read failed")
        .into_iter()
        .map(|x| x.tanh())
        .collect()
}
