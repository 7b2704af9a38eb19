use crate::autograd::GraphContext;
use crate::error::StridedError;
use crate::nn::module::Module;
use crate::ops::arithmetic::add;
use crate::ops::linalg::matmul;
use crate::tensor::{randn, zeros, Tensor};
use crate::types::DType;

/// Affine map over column samples: `y = weight @ x + bias`.
///
/// `weight` has shape `[out_features, in_features]` and `bias` has shape
/// `[out_features, 1]`, so an input of shape `[in_features, batch]` gives an
/// output of shape `[out_features, batch]` with the bias broadcast across the
/// batch. A 1-D input of length `in_features` is treated as a single column.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Tensor,
    bias: Option<Tensor>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Weights drawn from a standard normal, bias zero-initialized.
    pub fn new(in_features: usize, out_features: usize, has_bias: bool) -> Result<Self, StridedError> {
        let weight = randn(&[out_features, in_features])?;
        let bias = if has_bias {
            Some(zeros(&[out_features, 1], DType::F64)?)
        } else {
            None
        };
        Linear::from_parameters(weight, bias)
    }

    /// Builds a layer around existing tensors and enables gradients on them.
    ///
    /// # Errors
    /// - `RankMismatch` if `weight` is not 2-D.
    /// - `ShapeMismatch` if `bias` is not `[out_features, 1]`.
    pub fn from_parameters(weight: Tensor, bias: Option<Tensor>) -> Result<Self, StridedError> {
        if weight.rank() != 2 {
            return Err(StridedError::RankMismatch {
                expected: 2,
                actual: weight.rank(),
            });
        }
        let (out_features, in_features) = (weight.shape()[0], weight.shape()[1]);
        if let Some(bias) = &bias {
            if bias.shape() != [out_features, 1] {
                return Err(StridedError::ShapeMismatch {
                    expected: vec![out_features, 1],
                    actual: bias.shape(),
                    operation: "linear bias".to_string(),
                });
            }
            bias.set_requires_grad(true)?;
        }
        weight.set_requires_grad(true)?;
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Tensor> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    /// # Errors
    /// `MatmulInnerMismatch` if the leading dim of `input` is not `in_features`.
    fn forward(&self, graph: &mut GraphContext, input: &Tensor) -> Result<Tensor, StridedError> {
        let product = matmul(graph, &self.weight, input)?;
        match &self.bias {
            Some(bias) => add(graph, &product, bias),
            None => Ok(product),
        }
    }

    fn parameters(&self) -> Vec<Tensor> {
        let mut params = vec![self.weight.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, Tensor)> {
        let mut params = vec![("weight".to_string(), self.weight.clone())];
        if let Some(bias) = &self.bias {
            params.push(("bias".to_string(), bias.clone()));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
