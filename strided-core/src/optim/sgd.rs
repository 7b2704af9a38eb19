use crate::error::StridedError;
use crate::ops::arithmetic::{mul_op, sub_op};
use crate::optim::optimizer_trait::Optimizer;
use crate::tensor::{scalar, Tensor};

/// Plain stochastic gradient descent: `p = p - lr * p.grad`.
///
/// Holds handles on the parameters, so the update is visible through every
/// handle sharing their storage (a layer's own fields included). Each
/// parameter keeps its dtype.
#[derive(Debug)]
pub struct SGD {
    params: Vec<Tensor>,
    lr: f64,
}

impl SGD {
    pub fn new(params: impl IntoIterator<Item = Tensor>, lr: f64) -> Self {
        SGD {
            params: params.into_iter().collect(),
            lr,
        }
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.lr = lr;
    }

    pub fn params(&self) -> &[Tensor] {
        &self.params
    }
}

impl Optimizer for SGD {
    /// Parameters that do not require gradients, or have none, are skipped.
    fn step(&mut self) -> Result<(), StridedError> {
        let lr = scalar(self.lr)?;
        let mut updated = 0;
        for param in &self.params {
            if !param.requires_grad() {
                continue;
            }
            let grad = match param.grad() {
                Ok(grad) => grad,
                Err(StridedError::NoGradient) => continue,
                Err(e) => return Err(e),
            };
            let next = sub_op(param, &mul_op(&grad, &lr)?)?;
            param.assign_unchecked(&next)?;
            updated += 1;
        }
        log::debug!("sgd: updated {} parameters with lr {}", updated, self.lr);
        Ok(())
    }

    fn zero_grad(&mut self) -> Result<(), StridedError> {
        for param in &self.params {
            match param.zero_grad() {
                Ok(()) | Err(StridedError::NoGradient) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
