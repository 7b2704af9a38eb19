// src/tensor/create.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::buffer::{try_alloc, Buffer};
use crate::dispatch::{dispatch_with_dtype, ConvertVisitor};
use crate::element::{cast, Element};
use crate::error::StridedError;
use crate::tensor::utils::shape_to_size;
use crate::tensor::Tensor;
use crate::types::{DType, Scalar};

/// Fills `n` slots with the single source element, converted to the target type.
struct FillFactory {
    n: usize,
}

impl ConvertVisitor for FillFactory {
    type Output = Result<Buffer, StridedError>;

    fn visit<S: Element, D: Element>(&mut self, src: &[S]) -> Self::Output {
        let value = src.first().copied().map(cast::<S, D>).ok_or_else(|| {
            StridedError::InternalError("fill value buffer is empty".to_string())
        })?;
        Ok(D::wrap(try_alloc(self.n, value)?))
    }
}

/// Creates a zero-initialized tensor of `dtype`.
pub fn empty(shape: &[usize], dtype: DType) -> Result<Tensor, StridedError> {
    let buffer = Buffer::allocate(dtype, shape_to_size(shape))?;
    Tensor::from_buffer(buffer, shape.to_vec())
}

/// Creates a tensor of `dtype` with every element set to `value`.
///
/// Resolves both the Rust type of `value` and the `dtype` tag before filling.
pub fn full(shape: &[usize], value: impl Into<Scalar>, dtype: DType) -> Result<Tensor, StridedError> {
    let value = value.into();
    let source = Buffer::filled(value.dtype(), 1, value)?;
    let mut factory = FillFactory {
        n: shape_to_size(shape),
    };
    let buffer = dispatch_with_dtype(&source, dtype, &mut factory)??;
    Tensor::from_buffer(buffer, shape.to_vec())
}

pub fn zeros(shape: &[usize], dtype: DType) -> Result<Tensor, StridedError> {
    full(shape, false, dtype)
}

pub fn ones(shape: &[usize], dtype: DType) -> Result<Tensor, StridedError> {
    full(shape, true, dtype)
}

/// Zeros with the shape and dtype of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, StridedError> {
    zeros(&tensor.shape(), tensor.dtype())
}

/// Ones with the shape and dtype of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, StridedError> {
    ones(&tensor.shape(), tensor.dtype())
}

pub fn full_like(tensor: &Tensor, value: impl Into<Scalar>) -> Result<Tensor, StridedError> {
    full(&tensor.shape(), value, tensor.dtype())
}

/// 1-D tensor `start, start + step, ...` stopping before `stop`.
///
/// # Errors
/// `InvalidRange` for a non-positive step or an empty range.
pub fn arange(start: f64, stop: f64, step: f64, dtype: DType) -> Result<Tensor, StridedError> {
    let buffer = Buffer::from_range(start, stop, step, dtype)?;
    let len = buffer.len();
    Tensor::from_buffer(buffer, vec![len])
}

fn normal_samples<R: Rng>(rng: &mut R, shape: &[usize]) -> Result<Tensor, StridedError> {
    let mut values = try_alloc(shape_to_size(shape), 0.0f64)?;
    for v in values.iter_mut() {
        *v = StandardNormal.sample(rng);
    }
    Tensor::new(values, shape.to_vec())
}

/// `f64` samples from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, StridedError> {
    let mut rng = rand::thread_rng();
    normal_samples(&mut rng, shape)
}

/// Same as [`randn`], drawn from a generator seeded with `seed`.
pub fn randn_seeded(shape: &[usize], seed: u64) -> Result<Tensor, StridedError> {
    let mut rng = StdRng::seed_from_u64(seed);
    normal_samples(&mut rng, shape)
}

pub fn from_vec<T: Element>(data: Vec<T>, shape: Vec<usize>) -> Result<Tensor, StridedError> {
    Tensor::new(data, shape)
}

/// Rank-0 tensor holding `value`.
pub fn scalar(value: impl Into<Scalar>) -> Result<Tensor, StridedError> {
    let value = value.into();
    full(&[], value, value.dtype())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
